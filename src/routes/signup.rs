use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password;
use crate::db;
use crate::db::members::NewMember;
use crate::documents;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{OrgProfile, SignupSession};
use crate::pricing::{self, PlanKey, PlanQuote};
use crate::signup::{self, DetailsInput, SignupForm, SignupStep};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct WizardState {
    pub id: Uuid,
    pub step: SignupStep,
    pub form: SignupForm,
}

#[derive(Deserialize)]
pub struct PlanRequest {
    pub service_id: Uuid,
    pub plan: PlanKey,
    #[serde(default)]
    pub dependent_count: u32,
    #[serde(default)]
    pub dependent_names: Vec<String>,
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub service_id: Uuid,
    pub plan: PlanKey,
    #[serde(default)]
    pub dependents: u32,
}

#[derive(Serialize)]
pub struct ConfirmResponse {
    pub member_id: Uuid,
    pub status: String,
    pub message: String,
}

fn parse_step(session: &SignupSession) -> Result<SignupStep, AppError> {
    session
        .step
        .parse()
        .map_err(|e: String| AppError::Internal(e))
}

fn parse_form(session: &SignupSession) -> Result<SignupForm, AppError> {
    serde_json::from_value(session.data.clone())
        .map_err(|e| AppError::Internal(format!("Corrupt wizard session: {e}")))
}

async fn load_session(
    state: &SharedState,
    id: Uuid,
) -> Result<(SignupSession, SignupStep, SignupForm), AppError> {
    let session = db::signup_sessions::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Signup session not found".to_string()))?;
    let step = parse_step(&session)?;
    let form = parse_form(&session)?;
    Ok((session, step, form))
}

async fn save_session(
    state: &SharedState,
    id: Uuid,
    step: SignupStep,
    form: &SignupForm,
) -> Result<WizardState, AppError> {
    let data = serde_json::to_value(form)
        .map_err(|e| AppError::Internal(format!("Failed to serialize wizard form: {e}")))?;
    db::signup_sessions::save(&state.pool, id, step.as_str(), &data).await?;
    Ok(WizardState {
        id,
        step,
        form: form.sanitized(),
    })
}

/// Open a fresh wizard session.
pub async fn start(State(state): State<SharedState>) -> Result<Json<WizardState>, AppError> {
    let session = db::signup_sessions::create(&state.pool).await?;
    Ok(Json(WizardState {
        id: session.id,
        step: SignupStep::SelectPlan,
        form: SignupForm::default(),
    }))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardState>, AppError> {
    let (session, step, form) = load_session(&state, id).await?;
    Ok(Json(WizardState {
        id: session.id,
        step,
        form: form.sanitized(),
    }))
}

/// Pricing preview for a service under a plan, used by the plan cards.
pub async fn quote(
    State(state): State<SharedState>,
    Query(q): Query<QuoteQuery>,
) -> Result<Json<PlanQuote>, AppError> {
    let service = db::services::find_by_id(&state.pool, q.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(pricing::quote(&service, q.plan, q.dependents)))
}

pub async fn submit_plan(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<WizardState>, AppError> {
    let (_, step, mut form) = load_session(&state, id).await?;
    if step != SignupStep::SelectPlan {
        return Err(AppError::BadRequest(
            "Plan selection is not the current step".to_string(),
        ));
    }

    let service = db::services::find_by_id(&state.pool, req.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let next = signup::select_plan(
        &mut form,
        service.id,
        req.plan,
        req.dependent_count,
        req.dependent_names,
    )
    .map_err(AppError::BadRequest)?;

    Ok(Json(save_session(&state, id, next, &form).await?))
}

pub async fn submit_details(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DetailsInput>,
) -> Result<Json<WizardState>, AppError> {
    let (_, step, mut form) = load_session(&state, id).await?;
    if step != SignupStep::EnterDetails {
        return Err(AppError::BadRequest(
            "Personal details are not the current step".to_string(),
        ));
    }

    // Validate before paying for the hash.
    req.validate().map_err(AppError::BadRequest)?;

    if db::members::find_by_email(&state.pool, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A member with this email already exists".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;
    let next = signup::enter_details(&mut form, &req, pw_hash).map_err(AppError::BadRequest)?;

    Ok(Json(save_session(&state, id, next, &form).await?))
}

/// Accept the signed contract as a multipart upload. The stored path
/// lands in the wizard snapshot; nothing touches the members table yet.
pub async fn upload_contract(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WizardState>, AppError> {
    let (_, step, mut form) = load_session(&state, id).await?;
    if step != SignupStep::UploadContract {
        return Err(AppError::BadRequest(
            "Contract upload is not the current step".to_string(),
        ));
    }

    let (filename, bytes) = read_file_field(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let stored = crate::uploads::save(&state.config.uploads_dir, "contracts", &filename, &bytes)
        .await
        .map_err(AppError::Internal)?;

    let next = signup::attach_contract(&mut form, stored);
    Ok(Json(save_session(&state, id, next, &form).await?))
}

/// The adhesion contract the applicant downloads, signs and re-uploads.
pub async fn contract_document(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (_, _, form) = load_session(&state, id).await?;

    let (service_id, plan) = match (form.service_id, form.plan) {
        (Some(s), Some(p)) => (s, p),
        _ => {
            return Err(AppError::BadRequest(
                "Select a service and plan first".to_string(),
            ))
        }
    };
    if form.name.is_empty() {
        return Err(AppError::BadRequest(
            "Fill in your personal details first".to_string(),
        ));
    }

    let service = db::services::find_by_id(&state.pool, service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    let org = org_or_default(&state).await?;

    let plan_quote = pricing::quote(&service, plan, form.dependent_count);
    let doc = documents::render_adhesion_contract(&form, &service, &plan_quote, &org);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"adhesion_contract.html\"".to_string(),
            ),
        ],
        doc,
    )
        .into_response())
}

/// Step back one stage. Always allowed while the wizard is open.
pub async fn back(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardState>, AppError> {
    let (_, step, form) = load_session(&state, id).await?;
    let previous = step
        .back()
        .ok_or_else(|| AppError::BadRequest("There is no previous step".to_string()))?;
    Ok(Json(save_session(&state, id, previous, &form).await?))
}

/// Terminal transition: one transaction writes the PENDING member row
/// and drops the wizard session.
pub async fn confirm(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let (_, step, form) = load_session(&state, id).await?;
    if step != SignupStep::Review {
        return Err(AppError::BadRequest(
            "Finish the previous steps before confirming".to_string(),
        ));
    }
    signup::ready_to_confirm(&form).map_err(AppError::BadRequest)?;

    let plan = form
        .plan
        .ok_or_else(|| AppError::Internal("Wizard form lost its plan".to_string()))?;
    let password_hash = form
        .password_hash
        .as_deref()
        .ok_or_else(|| AppError::Internal("Wizard form lost its credential".to_string()))?;
    let dependent_names = form.dependent_names.join(", ");

    let mut tx = state.pool.begin().await?;

    let member = db::members::create(
        &mut *tx,
        &NewMember {
            name: &form.name,
            tax_id: &form.tax_id,
            email: &form.email,
            phone: &form.phone,
            postal_code: &form.postal_code,
            street: &form.street,
            number: &form.number,
            complement: &form.complement,
            district: &form.district,
            city: &form.city,
            state: &form.state,
            password_hash,
            status: "PENDING",
            role: "MEMBER",
            plan: Some(plan.as_str()),
            service_id: form.service_id,
            dependent_names: &dependent_names,
            contract_path: form.contract_path.as_deref(),
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A member with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    db::signup_sessions::delete(&mut *tx, id).await?;
    tx.commit().await?;

    audit::log_event(
        &state.pool,
        None,
        "member.signup",
        "member",
        Some(member.id),
        None,
    )
    .await;

    Ok(Json(ConfirmResponse {
        member_id: member.id,
        status: member.status,
        message: "Request received. You will be notified by email once your membership is approved."
            .to_string(),
    }))
}

async fn org_or_default(state: &SharedState) -> Result<OrgProfile, AppError> {
    Ok(db::org_profile::get(&state.pool).await?.unwrap_or(OrgProfile {
        id: 1,
        site_title: "Member Portal".to_string(),
        logo_url: String::new(),
        tax_id: String::new(),
        founded_on: String::new(),
        history: String::new(),
        mission: String::new(),
        vision: String::new(),
        org_values: String::new(),
        contact_email: String::new(),
        contact_phone: String::new(),
        address: String::new(),
        updated_at: chrono::Utc::now(),
    }))
}

/// Pull the first file field out of a multipart body using multer.
async fn read_file_field(headers: &HeaderMap, body: Bytes) -> Result<(String, Bytes), String> {
    let boundary = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| "Expected a multipart/form-data upload".to_string())?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        if let Some(filename) = field.file_name().map(|f| f.to_string()) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| format!("Upload read error: {e}"))?;
            if bytes.is_empty() {
                return Err("The uploaded file is empty".to_string());
            }
            return Ok((filename, bytes));
        }
    }

    Err("No file attached".to_string())
}
