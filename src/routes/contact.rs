use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::Json;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::ContactMessage;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Public contact form. Messages land as NEW for admin triage.
pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactMessage>, AppError> {
    if state
        .post_limiter
        .check("contact", addr.ip(), 5, 15 * 60)
        .is_err()
    {
        return Err(AppError::RateLimited(
            "Too many messages. Please try again later.".to_string(),
        ));
    }

    if req.name.trim().is_empty()
        || req.email.trim().is_empty()
        || req.subject.trim().is_empty()
        || req.message.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "Name, email, subject and message are required".to_string(),
        ));
    }

    let message = db::contacts::create(
        &state.pool,
        req.name.trim(),
        req.email.trim(),
        req.phone.trim(),
        req.subject.trim(),
        req.message.trim(),
    )
    .await?;

    Ok(Json(message))
}
