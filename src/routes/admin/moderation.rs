use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{AuditEvent, Classified, ContactMessage, NewsComment};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct FeatureRequest {
    pub featured: bool,
}

#[derive(Deserialize)]
pub struct CommentListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ── News comments ───────────────────────────────────────────────

pub async fn list_comments(
    auth: AuthMember,
    State(state): State<SharedState>,
    Query(q): Query<CommentListQuery>,
) -> Result<Json<Vec<NewsComment>>, AppError> {
    auth.require_admin()?;
    let status = q.status.as_deref().unwrap_or("PENDING");
    Ok(Json(db::news_comments::list_by_status(&state.pool, status).await?))
}

pub async fn set_comment_status(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<NewsComment>, AppError> {
    auth.require_admin()?;

    if !["PENDING", "APPROVED", "REJECTED"].contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let comment = db::news_comments::update_status(&state.pool, id, &req.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Comment not found".to_string()),
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "comment.moderated",
        "news_comment",
        Some(comment.id),
        Some(serde_json::json!({ "status": req.status })),
    )
    .await;

    Ok(Json(comment))
}

pub async fn delete_comment(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::news_comments::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "comment.deleted",
        "news_comment",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Classifieds ─────────────────────────────────────────────────

pub async fn list_classifieds(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Classified>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::classifieds::list_all(&state.pool).await?))
}

pub async fn set_classified_status(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Classified>, AppError> {
    auth.require_admin()?;

    if !["PENDING", "ACTIVE", "REJECTED"].contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let ad = db::classifieds::update_status(&state.pool, id, &req.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Classified not found".to_string()),
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "classified.moderated",
        "classified",
        Some(ad.id),
        Some(serde_json::json!({ "status": req.status })),
    )
    .await;

    Ok(Json(ad))
}

pub async fn set_classified_featured(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FeatureRequest>,
) -> Result<Json<Classified>, AppError> {
    auth.require_admin()?;

    let ad = db::classifieds::set_featured(&state.pool, id, req.featured)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Classified not found".to_string()),
            _ => AppError::Database(e),
        })?;

    Ok(Json(ad))
}

pub async fn delete_classified(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::classifieds::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "classified.deleted",
        "classified",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Contact messages ────────────────────────────────────────────

pub async fn list_contacts(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::contacts::list_all(&state.pool).await?))
}

pub async fn set_contact_status(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<ContactMessage>, AppError> {
    auth.require_admin()?;

    if !["NEW", "READ", "ANSWERED"].contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let message = db::contacts::update_status(&state.pool, id, &req.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Contact message not found".to_string()),
            _ => AppError::Database(e),
        })?;

    Ok(Json(message))
}

pub async fn delete_contact(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::contacts::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "contact.deleted",
        "contact_message",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// ── Activity log ────────────────────────────────────────────────

pub async fn list_audit(
    auth: AuthMember,
    State(state): State<SharedState>,
    Query(q): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEvent>>, AppError> {
    auth.require_admin()?;

    let limit = q.limit.unwrap_or(100).clamp(1, 500);
    let offset = q.offset.unwrap_or(0).max(0);
    Ok(Json(db::audit::list(&state.pool, limit, offset).await?))
}
