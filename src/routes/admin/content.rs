use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Agreement, Event, News, Partner};
use crate::state::SharedState;

fn check_status(status: &str, allowed: &[&str]) -> Result<(), AppError> {
    if allowed.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Unknown status: {status}")))
    }
}

// ── Agreements ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AgreementRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub status: String,
}

fn default_active() -> String {
    "ACTIVE".to_string()
}

pub async fn list_agreements(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Agreement>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::agreements::list_all(&state.pool).await?))
}

pub async fn create_agreement(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<AgreementRequest>,
) -> Result<Json<Agreement>, AppError> {
    auth.require_admin()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    check_status(&req.status, &["ACTIVE", "INACTIVE"])?;

    let agreement = db::agreements::create(
        &state.pool,
        req.name.trim(),
        &req.description,
        &req.category,
        &req.icon_url,
        &req.image_url,
        req.featured,
        &req.status,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "agreement.created",
        "agreement",
        Some(agreement.id),
        None,
    )
    .await;

    Ok(Json(agreement))
}

pub async fn update_agreement(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AgreementRequest>,
) -> Result<Json<Agreement>, AppError> {
    auth.require_admin()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    check_status(&req.status, &["ACTIVE", "INACTIVE"])?;

    let agreement = db::agreements::update(
        &state.pool,
        id,
        req.name.trim(),
        &req.description,
        &req.category,
        &req.icon_url,
        &req.image_url,
        req.featured,
        &req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Agreement not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "agreement.updated",
        "agreement",
        Some(agreement.id),
        None,
    )
    .await;

    Ok(Json(agreement))
}

pub async fn delete_agreement(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::agreements::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "agreement.deleted",
        "agreement",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Partners ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PartnerRequest {
    pub agreement_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub details: String,
    #[serde(default = "default_active")]
    pub status: String,
}

pub async fn list_partners(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Partner>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::partners::list_all(&state.pool).await?))
}

pub async fn create_partner(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<PartnerRequest>,
) -> Result<Json<Partner>, AppError> {
    auth.require_admin()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    check_status(&req.status, &["ACTIVE", "INACTIVE"])?;

    if let Some(agreement_id) = req.agreement_id {
        db::agreements::find_by_id(&state.pool, agreement_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agreement not found".to_string()))?;
    }

    let partner = db::partners::create(
        &state.pool,
        req.agreement_id,
        req.name.trim(),
        &req.contact_name,
        &req.email,
        &req.phone,
        &req.website,
        &req.address,
        &req.details,
        &req.status,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "partner.created",
        "partner",
        Some(partner.id),
        None,
    )
    .await;

    Ok(Json(partner))
}

pub async fn update_partner(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PartnerRequest>,
) -> Result<Json<Partner>, AppError> {
    auth.require_admin()?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    check_status(&req.status, &["ACTIVE", "INACTIVE"])?;

    let partner = db::partners::update(
        &state.pool,
        id,
        req.agreement_id,
        req.name.trim(),
        &req.contact_name,
        &req.email,
        &req.phone,
        &req.website,
        &req.address,
        &req.details,
        &req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Partner not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "partner.updated",
        "partner",
        Some(partner.id),
        None,
    )
    .await;

    Ok(Json(partner))
}

pub async fn delete_partner(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::partners::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "partner.deleted",
        "partner",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── News ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct NewsRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_draft")]
    pub status: String,
}

fn default_draft() -> String {
    "DRAFT".to_string()
}

pub async fn list_news(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<News>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::news::list_all(&state.pool).await?))
}

pub async fn create_news(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<NewsRequest>,
) -> Result<Json<News>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    check_status(&req.status, &["PUBLISHED", "DRAFT"])?;

    let news = db::news::create(
        &state.pool,
        req.title.trim(),
        &req.body,
        &req.image_url,
        &req.tags,
        req.featured,
        &req.status,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "news.created",
        "news",
        Some(news.id),
        None,
    )
    .await;

    Ok(Json(news))
}

pub async fn update_news(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewsRequest>,
) -> Result<Json<News>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    check_status(&req.status, &["PUBLISHED", "DRAFT"])?;

    let news = db::news::update(
        &state.pool,
        id,
        req.title.trim(),
        &req.body,
        &req.image_url,
        &req.tags,
        req.featured,
        &req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("News item not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "news.updated",
        "news",
        Some(news.id),
        None,
    )
    .await;

    Ok(Json(news))
}

pub async fn delete_news(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::news::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "news.deleted",
        "news",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Events ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_scheduled")]
    pub status: String,
}

fn default_scheduled() -> String {
    "SCHEDULED".to_string()
}

pub async fn list_events(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Event>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::events::list_all(&state.pool).await?))
}

pub async fn create_event(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<EventRequest>,
) -> Result<Json<Event>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    check_status(&req.status, &["SCHEDULED", "CANCELLED"])?;

    let event = db::events::create(
        &state.pool,
        req.title.trim(),
        &req.description,
        req.event_date,
        &req.event_time,
        &req.location,
        &req.image_url,
        &req.status,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "event.created",
        "event",
        Some(event.id),
        None,
    )
    .await;

    Ok(Json(event))
}

pub async fn update_event(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EventRequest>,
) -> Result<Json<Event>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    check_status(&req.status, &["SCHEDULED", "CANCELLED"])?;

    let event = db::events::update(
        &state.pool,
        id,
        req.title.trim(),
        &req.description,
        req.event_date,
        &req.event_time,
        &req.location,
        &req.image_url,
        &req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Event not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "event.updated",
        "event",
        Some(event.id),
        None,
    )
    .await;

    Ok(Json(event))
}

pub async fn delete_event(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::events::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "event.deleted",
        "event",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
