use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::documents;
use crate::error::AppError;
use crate::models::{Charge, Member, News};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Deserialize)]
pub struct TagFollowsRequest {
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct NotificationsQuery {
    /// Defaults to the member's recorded last access.
    pub since: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct NotificationsResponse {
    pub followed_tags: Vec<String>,
    pub news: Vec<News>,
}

async fn current_member(state: &SharedState, auth: &AuthMember) -> Result<Member, AppError> {
    db::members::find_by_id(&state.pool, auth.member_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Member not found".to_string()))
}

pub async fn profile(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Member>, AppError> {
    Ok(Json(current_member(&state, &auth).await?))
}

/// Self-service edit. Email and tax id stay as registered.
pub async fn update_profile(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Member>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let member = db::members::update_profile(
        &state.pool,
        auth.member_id,
        req.name.trim(),
        &req.phone,
        &req.postal_code,
        &req.street,
        &req.number,
        &req.complement,
        &req.district,
        &req.city,
        &req.state,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::Unauthorized("Member not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(member))
}

pub async fn charges(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Charge>>, AppError> {
    let charges = db::charges::list_by_member(&state.pool, auth.member_id).await?;
    Ok(Json(charges))
}

/// Receipt download. Only PAID charges have one.
pub async fn receipt(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(charge_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let charge = db::charges::find_for_member(&state.pool, charge_id, auth.member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Charge not found".to_string()))?;

    if charge.status != "PAID" {
        return Err(AppError::BadRequest(
            "Receipts are only available for paid charges".to_string(),
        ));
    }

    let member = current_member(&state, &auth).await?;
    let org = db::org_profile::get(&state.pool)
        .await?
        .ok_or_else(|| AppError::Internal("Institutional profile is not configured".to_string()))?;

    let doc = documents::render_receipt(&charge, &member, &org);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"receipt_{}.html\"", charge.id),
            ),
        ],
        doc,
    )
        .into_response())
}

pub async fn tag_follows(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<String>>, AppError> {
    let follows = db::tag_follows::list_for_member(&state.pool, auth.member_id).await?;
    Ok(Json(follows.into_iter().map(|f| f.tag).collect()))
}

/// Replace the followed-tag set wholesale, the way the preferences form
/// submits it.
pub async fn update_tag_follows(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<TagFollowsRequest>,
) -> Result<Json<Vec<String>>, AppError> {
    let tags: Vec<String> = req
        .tags
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    db::tag_follows::replace_for_member(&state.pool, auth.member_id, &tags).await?;
    Ok(Json(tags))
}

/// News published since the member's previous visit that carry a
/// followed tag.
pub async fn notifications(
    auth: AuthMember,
    State(state): State<SharedState>,
    Query(q): Query<NotificationsQuery>,
) -> Result<Json<NotificationsResponse>, AppError> {
    let member = current_member(&state, &auth).await?;
    let follows = db::tag_follows::list_for_member(&state.pool, auth.member_id).await?;
    let followed_tags: Vec<String> = follows.into_iter().map(|f| f.tag).collect();

    let since = q.since.or(member.last_access);
    let news = match (since, followed_tags.is_empty()) {
        (Some(since), false) => {
            let recent = db::news::list_published_since(&state.pool, since).await?;
            recent
                .into_iter()
                .filter(|n| n.tag_list().iter().any(|t| followed_tags.contains(t)))
                .collect()
        }
        _ => Vec::new(),
    };

    Ok(Json(NotificationsResponse {
        followed_tags,
        news,
    }))
}
