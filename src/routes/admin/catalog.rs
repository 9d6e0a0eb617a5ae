use axum::extract::{Path, State};
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::db::org_profile::OrgProfileInput;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Benefit, FaqEntry, OrgProfile, Service};
use crate::state::SharedState;

// ── Services ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub monthly_price: Decimal,
    #[serde(default)]
    pub dependent_price: Decimal,
    #[serde(default)]
    pub monthly_coupon: Decimal,
    #[serde(default)]
    pub semiannual_coupon_pct: Decimal,
    #[serde(default)]
    pub annual_coupon_pct: Decimal,
}

fn validate_service(req: &ServiceRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Service name is required".to_string()));
    }
    if req.monthly_price < Decimal::ZERO
        || req.dependent_price < Decimal::ZERO
        || req.monthly_coupon < Decimal::ZERO
    {
        return Err(AppError::BadRequest("Prices cannot be negative".to_string()));
    }
    for pct in [req.semiannual_coupon_pct, req.annual_coupon_pct] {
        if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
            return Err(AppError::BadRequest(
                "Coupon percentages must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn create_service(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    auth.require_admin()?;
    validate_service(&req)?;

    let service = db::services::create(
        &state.pool,
        req.name.trim(),
        &req.description,
        req.monthly_price,
        req.dependent_price,
        req.monthly_coupon,
        req.semiannual_coupon_pct,
        req.annual_coupon_pct,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A service with this name already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "service.created",
        "service",
        Some(service.id),
        None,
    )
    .await;

    Ok(Json(service))
}

pub async fn update_service(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<Service>, AppError> {
    auth.require_admin()?;
    validate_service(&req)?;

    let service = db::services::update(
        &state.pool,
        id,
        req.name.trim(),
        &req.description,
        req.monthly_price,
        req.dependent_price,
        req.monthly_coupon,
        req.semiannual_coupon_pct,
        req.annual_coupon_pct,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Service not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "service.updated",
        "service",
        Some(service.id),
        None,
    )
    .await;

    Ok(Json(service))
}

pub async fn delete_service(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::services::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "service.deleted",
        "service",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Benefits ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BenefitRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

pub async fn create_benefit(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<BenefitRequest>,
) -> Result<Json<Benefit>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let benefit =
        db::benefits::create(&state.pool, req.title.trim(), &req.description, &req.icon).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "benefit.created",
        "benefit",
        Some(benefit.id),
        None,
    )
    .await;

    Ok(Json(benefit))
}

pub async fn update_benefit(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BenefitRequest>,
) -> Result<Json<Benefit>, AppError> {
    auth.require_admin()?;
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let benefit =
        db::benefits::update(&state.pool, id, req.title.trim(), &req.description, &req.icon)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => AppError::NotFound("Benefit not found".to_string()),
                _ => AppError::Database(e),
            })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "benefit.updated",
        "benefit",
        Some(benefit.id),
        None,
    )
    .await;

    Ok(Json(benefit))
}

pub async fn delete_benefit(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::benefits::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "benefit.deleted",
        "benefit",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── FAQ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default = "default_active")]
    pub status: String,
}

fn default_active() -> String {
    "ACTIVE".to_string()
}

fn validate_faq(req: &FaqRequest) -> Result<(), AppError> {
    if req.question.trim().is_empty() || req.answer.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Question and answer are required".to_string(),
        ));
    }
    if req.status != "ACTIVE" && req.status != "INACTIVE" {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }
    Ok(())
}

pub async fn list_faq(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<FaqEntry>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::faq::list_all(&state.pool).await?))
}

pub async fn create_faq(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<FaqRequest>,
) -> Result<Json<FaqEntry>, AppError> {
    auth.require_admin()?;
    validate_faq(&req)?;

    let entry =
        db::faq::create(&state.pool, req.question.trim(), req.answer.trim(), &req.status).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "faq.created",
        "faq_entry",
        Some(entry.id),
        None,
    )
    .await;

    Ok(Json(entry))
}

pub async fn update_faq(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FaqRequest>,
) -> Result<Json<FaqEntry>, AppError> {
    auth.require_admin()?;
    validate_faq(&req)?;

    let entry = db::faq::update(
        &state.pool,
        id,
        req.question.trim(),
        req.answer.trim(),
        &req.status,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("FAQ entry not found".to_string()),
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "faq.updated",
        "faq_entry",
        Some(entry.id),
        None,
    )
    .await;

    Ok(Json(entry))
}

pub async fn delete_faq(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::faq::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "faq.deleted",
        "faq_entry",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Institutional profile ───────────────────────────────────────

#[derive(Deserialize)]
pub struct OrgProfileRequest {
    pub site_title: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub founded_on: String,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub org_values: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub address: String,
}

/// Upsert the singleton institutional row.
pub async fn update_org_profile(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<OrgProfileRequest>,
) -> Result<Json<OrgProfile>, AppError> {
    auth.require_admin()?;

    if req.site_title.trim().is_empty() {
        return Err(AppError::BadRequest("Site title is required".to_string()));
    }

    let profile = db::org_profile::upsert(
        &state.pool,
        &OrgProfileInput {
            site_title: req.site_title.trim(),
            logo_url: &req.logo_url,
            tax_id: &req.tax_id,
            founded_on: &req.founded_on,
            history: &req.history,
            mission: &req.mission,
            vision: &req.vision,
            org_values: &req.org_values,
            contact_email: &req.contact_email,
            contact_phone: &req.contact_phone,
            address: &req.address,
        },
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "org_profile.updated",
        "org_profile",
        None,
        None,
    )
    .await;

    Ok(Json(profile))
}
