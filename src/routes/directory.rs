use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Agreement, Benefit, Event, FaqEntry, OrgProfile, Partner, Service};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct AgreementDetail {
    #[serde(flatten)]
    pub agreement: Agreement,
    pub partners: Vec<Partner>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

#[derive(Deserialize)]
pub struct RatingRequest {
    pub rating: i32,
}

#[derive(Serialize)]
pub struct EventsResponse {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

/// Institutional profile shown on the public pages.
pub async fn org_profile(
    State(state): State<SharedState>,
) -> Result<Json<OrgProfile>, AppError> {
    db::org_profile::get(&state.pool)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Institutional profile not configured yet".to_string()))
}

pub async fn benefits(State(state): State<SharedState>) -> Result<Json<Vec<Benefit>>, AppError> {
    Ok(Json(db::benefits::list(&state.pool).await?))
}

/// Service catalog drives the signup wizard's plan cards.
pub async fn services(State(state): State<SharedState>) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(db::services::list(&state.pool).await?))
}

pub async fn agreements(
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Agreement>>, AppError> {
    let agreements = db::agreements::list_active(&state.pool, q.search.as_deref()).await?;
    Ok(Json(agreements))
}

pub async fn featured_agreements(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Agreement>>, AppError> {
    Ok(Json(db::agreements::list_featured(&state.pool).await?))
}

pub async fn agreement_detail(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgreementDetail>, AppError> {
    let agreement = db::agreements::find_by_id(&state.pool, id)
        .await?
        .filter(|a| a.status == "ACTIVE")
        .ok_or_else(|| AppError::NotFound("Agreement not found".to_string()))?;

    let partners = db::partners::list_active_by_agreement(&state.pool, id).await?;
    let (average_rating, rating_count) = db::agreement_ratings::summary(&state.pool, id).await?;

    Ok(Json(AgreementDetail {
        agreement,
        partners,
        average_rating,
        rating_count,
    }))
}

/// Members rate an agreement 1..=5; voting again replaces the earlier
/// vote.
pub async fn rate_agreement(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RatingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    db::agreements::find_by_id(&state.pool, id)
        .await?
        .filter(|a| a.status == "ACTIVE")
        .ok_or_else(|| AppError::NotFound("Agreement not found".to_string()))?;

    db::agreement_ratings::upsert(&state.pool, id, auth.member_id, req.rating).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "agreement.rated",
        "agreement",
        Some(id),
        Some(serde_json::json!({ "rating": req.rating })),
    )
    .await;

    let (average_rating, rating_count) = db::agreement_ratings::summary(&state.pool, id).await?;
    Ok(Json(serde_json::json!({
        "average_rating": average_rating,
        "rating_count": rating_count,
    })))
}

/// Scheduled events split around today.
pub async fn events(State(state): State<SharedState>) -> Result<Json<EventsResponse>, AppError> {
    let all = db::events::list_scheduled(&state.pool).await?;
    let today = Utc::now().date_naive();

    let (upcoming, mut past): (Vec<Event>, Vec<Event>) =
        all.into_iter().partition(|e| e.event_date >= today);
    past.sort_by(|a, b| b.event_date.cmp(&a.event_date));

    Ok(Json(EventsResponse { upcoming, past }))
}

pub async fn faq(
    State(state): State<SharedState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<FaqEntry>>, AppError> {
    Ok(Json(
        db::faq::list_active(&state.pool, q.search.as_deref()).await?,
    ))
}
