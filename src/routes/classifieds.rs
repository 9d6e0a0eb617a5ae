use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::db::classifieds::PublicFilter;
use crate::error::AppError;
use crate::models::{
    Classified, CLASSIFIED_CATEGORIES, CLASSIFIED_EXPIRY_DAYS, CLASSIFIED_LIMIT_PER_MEMBER,
};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    pub contact: String,
    pub category: String,
}

/// Public board. Ads created more than 30 days ago have expired and are
/// filtered out here, independent of their stored status.
pub async fn list(
    State(state): State<SharedState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Classified>>, AppError> {
    let category = match q.category.as_deref().filter(|c| !c.is_empty()) {
        Some(c) if !CLASSIFIED_CATEGORIES.contains(&c) => {
            return Err(AppError::BadRequest(format!("Unknown category: {c}")));
        }
        other => other,
    };

    let filter = PublicFilter {
        cutoff: Utc::now() - Duration::days(CLASSIFIED_EXPIRY_DAYS),
        category,
        search: q.search.as_deref().filter(|s| !s.is_empty()),
    };

    Ok(Json(db::classifieds::list_public(&state.pool, &filter).await?))
}

/// Members submit ads for moderation, capped at 3 live (PENDING or
/// ACTIVE) ads each.
pub async fn create(
    auth: AuthMember,
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Classified>, AppError> {
    if state
        .post_limiter
        .check("classified", addr.ip(), 5, 60 * 60)
        .is_err()
    {
        return Err(AppError::RateLimited(
            "Too many ads submitted. Please try again later.".to_string(),
        ));
    }

    if req.title.trim().is_empty()
        || req.description.trim().is_empty()
        || req.contact.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Title, description and contact are required".to_string(),
        ));
    }
    if !CLASSIFIED_CATEGORIES.contains(&req.category.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown category: {}",
            req.category
        )));
    }

    let live = db::classifieds::count_live_for_member(&state.pool, auth.member_id).await?;
    if live >= CLASSIFIED_LIMIT_PER_MEMBER {
        return Err(AppError::Conflict(format!(
            "You already have {CLASSIFIED_LIMIT_PER_MEMBER} active or pending ads"
        )));
    }

    let member = db::members::find_by_id(&state.pool, auth.member_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Member not found".to_string()))?;

    let ad = db::classifieds::create(
        &state.pool,
        member.id,
        &member.name,
        req.title.trim(),
        req.description.trim(),
        req.contact.trim(),
        &req.category,
    )
    .await?;

    Ok(Json(ad))
}
