use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::auth::jwt;
use crate::auth::password;
use crate::db;
use crate::db::members::NewMember;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::Member;
use crate::state::SharedState;

const MEMBER_STATUSES: &[&str] = &["PENDING", "ACTIVE", "BLOCKED", "INACTIVE"];

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub tax_id: String,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateMemberRequest {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

pub async fn list(
    auth: AuthMember,
    State(state): State<SharedState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Member>>, AppError> {
    auth.require_admin()?;

    let members = match q.status.as_deref() {
        Some(status) => db::members::list_by_status(&state.pool, status).await?,
        None => db::members::list_all(&state.pool).await?,
    };
    Ok(Json(members))
}

/// Direct creation from the back-office skips the wizard and starts
/// ACTIVE.
pub async fn create(
    auth: AuthMember,
    State(state): State<SharedState>,
    Json(req): Json<CreateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    auth.require_admin()?;

    if req.name.trim().is_empty() || req.email.trim().is_empty() {
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    let role = req.role.as_deref().unwrap_or(jwt::ROLE_MEMBER);
    if role != jwt::ROLE_MEMBER && role != jwt::ROLE_ADMIN {
        return Err(AppError::BadRequest(format!("Unknown role: {role}")));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let member = db::members::create(
        &state.pool,
        &NewMember {
            name: req.name.trim(),
            tax_id: &req.tax_id,
            email: req.email.trim(),
            phone: "",
            postal_code: "",
            street: "",
            number: "",
            complement: "",
            district: "",
            city: "",
            state: "",
            password_hash: &pw_hash,
            status: "ACTIVE",
            role,
            plan: None,
            service_id: None,
            dependent_names: "",
            contract_path: None,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A member with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "member.created",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(member))
}

pub async fn update(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<Member>, AppError> {
    auth.require_admin()?;

    if req.role != jwt::ROLE_MEMBER && req.role != jwt::ROLE_ADMIN {
        return Err(AppError::BadRequest(format!("Unknown role: {}", req.role)));
    }

    let member = db::members::update_account(&state.pool, id, &req.name, &req.email, &req.role)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Member not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A member with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "member.updated",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(member))
}

/// Approve a PENDING signup. Sends the activation email when SMTP is up.
pub async fn approve(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, AppError> {
    auth.require_admin()?;

    let existing = db::members::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

    if existing.status != "PENDING" {
        return Err(AppError::Conflict(format!(
            "Member is {}, not awaiting approval",
            existing.status
        )));
    }

    let member = db::members::update_status(&state.pool, id, "ACTIVE").await?;

    if let Some(mailer) = state.system_mailer.clone() {
        let approved = member.clone();
        let base_url = state.config.base_url.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_membership_approved(&approved, &base_url).await {
                tracing::error!("Failed to send approval email: {e}");
            }
        });
    }

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "member.approved",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(member))
}

/// Block, reactivate or retire an account.
pub async fn set_status(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Member>, AppError> {
    auth.require_admin()?;

    if !MEMBER_STATUSES.contains(&req.status.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            req.status
        )));
    }

    let member = db::members::update_status(&state.pool, id, &req.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Member not found".to_string()),
            _ => AppError::Database(e),
        })?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "member.status_changed",
        "member",
        Some(member.id),
        Some(serde_json::json!({ "status": req.status })),
    )
    .await;

    Ok(Json(member))
}

pub async fn delete(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if id == auth.member_id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    db::members::delete(&state.pool, id).await?;

    audit::log_event(
        &state.pool,
        Some(auth.member_id),
        "member.deleted",
        "member",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
