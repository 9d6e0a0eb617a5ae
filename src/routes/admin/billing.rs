use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::Charge;
use crate::state::SharedState;

const CHARGE_STATUSES: &[&str] = &["PENDING", "PAID", "OVERDUE"];

#[derive(Deserialize)]
pub struct CreateChargeRequest {
    pub member_id: Uuid,
    /// Defaults to the member's contracted service name.
    pub description: Option<String>,
    /// Defaults to the contracted service's monthly price.
    pub amount: Option<Decimal>,
    pub due_on: NaiveDate,
    #[serde(default = "default_pending")]
    pub status: String,
}

fn default_pending() -> String {
    "PENDING".to_string()
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct BillingSummary {
    pub pending: Decimal,
    pub paid: Decimal,
    pub overdue: Decimal,
}

pub async fn list(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Charge>>, AppError> {
    auth.require_admin()?;
    Ok(Json(db::charges::list_all(&state.pool).await?))
}

pub async fn summary(
    auth: AuthMember,
    State(state): State<SharedState>,
) -> Result<Json<BillingSummary>, AppError> {
    auth.require_admin()?;

    let totals = db::charges::totals_by_status(&state.pool).await?;
    let mut summary = BillingSummary {
        pending: Decimal::ZERO,
        paid: Decimal::ZERO,
        overdue: Decimal::ZERO,
    };
    for (status, total) in totals {
        match status.as_str() {
            "PENDING" => summary.pending = total,
            "PAID" => summary.paid = total,
            "OVERDUE" => summary.overdue = total,
            _ => {}
        }
    }
    Ok(Json(summary))
}

/// Issue a charge. Description and amount fall back to the member's
/// contracted service.
pub async fn create(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<CreateChargeRequest>,
) -> Result<Json<Charge>, AppError> {
    auth.require_admin()?;

    if !CHARGE_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let member = db::members::find_by_id(&state.pool, req.member_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    let service = match member.service_id {
        Some(service_id) => db::services::find_by_id(&state.pool, service_id).await?,
        None => None,
    };

    let description = match req.description.filter(|d| !d.trim().is_empty()) {
        Some(d) => d,
        None => service
            .as_ref()
            .map(|s| s.name.clone())
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Member has no contracted service; a description is required".to_string(),
                )
            })?,
    };

    let amount = match req.amount {
        Some(a) => a,
        None => service
            .as_ref()
            .map(|s| s.monthly_price)
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Member has no contracted service; an amount is required".to_string(),
                )
            })?,
    };

    if amount <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Amount must be greater than zero".to_string(),
        ));
    }

    let charge = db::charges::create(
        &state.pool,
        member.id,
        description.trim(),
        amount,
        req.due_on,
        &req.status,
    )
    .await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "charge.created",
        "charge",
        Some(charge.id),
        Some(serde_json::json!({ "member_id": member.id, "amount": amount })),
    )
    .await;

    Ok(Json(charge))
}

pub async fn update_status(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Charge>, AppError> {
    auth.require_admin()?;

    if !CHARGE_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let charge = db::charges::update_status(&state.pool, id, &req.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Charge not found".to_string()),
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "charge.status_changed",
        "charge",
        Some(charge.id),
        Some(serde_json::json!({ "status": req.status })),
    )
    .await;

    Ok(Json(charge))
}

pub async fn delete(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    db::charges::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "charge.deleted",
        "charge",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
