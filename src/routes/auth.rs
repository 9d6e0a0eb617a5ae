use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::extractor::AuthMember;
use crate::auth::jwt::{self, encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::db::members::NewMember;
use crate::error::AppError;
use crate::middleware::audit;
use crate::state::SharedState;

/// Reset tokens live for 15 minutes.
const RESET_TOKEN_TTL_MINUTES: i64 = 15;

#[derive(Deserialize)]
pub struct BootstrapRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub role: String,
    /// The member's access timestamp before this login; lets the client
    /// ask for notifications since the previous visit.
    pub previous_access: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(access_token: &str) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(8))
        .build();

    CookieJar::new().add(access)
}

fn clear_auth_cookie() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access)
}

fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Create the first ADMIN account. Only works while the members table is
/// empty; everyone else arrives through the signup wizard.
pub async fn bootstrap(
    State(state): State<SharedState>,
    Json(req): Json<BootstrapRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.email.is_empty() || req.password.is_empty() || req.name.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock prevents concurrent bootstrap attempts
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::members::count_all(&mut *tx).await?;
    if count > 0 {
        return Err(AppError::Forbidden(
            "The portal is already set up. Sign up through the membership wizard.".to_string(),
        ));
    }

    let member = db::members::create(
        &mut *tx,
        &NewMember {
            name: &req.name,
            tax_id: "",
            email: &req.email,
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
            role: jwt::ROLE_ADMIN,
            plan: None,
            service_id: None,
            dependent_names: "",
            contract_path: None,
        },
    )
    .await?;

    tx.commit().await?;

    let claims = Claims::new(member.id, jwt::ROLE_ADMIN.to_string());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    audit::log_event(
        &state.pool,
        Some(member.id),
        "member.bootstrap",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok((
        auth_cookie(&access_token),
        Json(AuthResponse {
            access_token,
            role: jwt::ROLE_ADMIN.to_string(),
            previous_access: None,
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let member = db::members::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid =
        password::verify(&req.password, &member.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    // PENDING signups and BLOCKED/INACTIVE members cannot enter; keep
    // the message in the same shape as bad credentials plus the hint the
    // portal has always shown.
    if member.status != "ACTIVE" {
        return Err(AppError::Unauthorized(
            "Invalid credentials, or your membership is not yet approved".to_string(),
        ));
    }

    let previous_access = member.last_access;
    db::members::touch_last_access(&state.pool, member.id).await?;

    let claims = Claims::new(member.id, member.role.clone());
    let access_token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    audit::log_event(
        &state.pool,
        Some(member.id),
        "member.login",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok((
        auth_cookie(&access_token),
        Json(AuthResponse {
            access_token,
            role: member.role,
            previous_access,
        }),
    ))
}

pub async fn logout() -> (CookieJar, Json<MessageResponse>) {
    (
        clear_auth_cookie(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    // Always 200 so the endpoint cannot be used to probe for accounts
    let response = Json(MessageResponse {
        message: "If that email is registered, a recovery link has been sent.".to_string(),
    });

    let pool = state.pool.clone();
    let mailer = state.system_mailer.clone();
    let base_url = state.config.base_url.clone();

    tokio::spawn(async move {
        if let Ok(Some(member)) = db::members::find_by_email(&pool, &req.email).await {
            let token = generate_reset_token();
            let token_hash = hash_token(&token);

            if db::password_reset_tokens::create(
                &pool,
                member.id,
                &token_hash,
                Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
            )
            .await
            .is_ok()
            {
                if let Some(mailer) = mailer {
                    let reset_url = format!("{base_url}/reset-password?token={token}");
                    if let Err(e) = mailer.send_password_reset(&member.email, &reset_url).await {
                        tracing::error!("Failed to send password reset email: {e}");
                    }
                } else {
                    tracing::warn!("System SMTP not configured. Password reset token: {token}");
                }
            }
        }
    });

    Ok(response)
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let token_hash = hash_token(&req.token);

    let reset_token = db::password_reset_tokens::find_valid_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".to_string()))?;

    db::password_reset_tokens::mark_used(&state.pool, reset_token.id).await?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    db::members::update_password(&state.pool, reset_token.member_id, &pw_hash).await?;

    audit::log_event(
        &state.pool,
        Some(reset_token.member_id),
        "member.password_reset",
        "member",
        Some(reset_token.member_id),
        None,
    )
    .await;

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthMember,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.new_password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let member = db::members::find_by_id(&state.pool, auth.member_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Member not found".to_string()))?;

    let valid = password::verify(&req.current_password, &member.password_hash)
        .map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::members::update_password(&state.pool, member.id, &pw_hash).await?;

    audit::log_event(
        &state.pool,
        Some(member.id),
        "member.password_changed",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
