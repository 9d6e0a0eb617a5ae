use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::PlanKey;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"))
}

/// Wizard steps, in order. Forward transitions are gated by validation;
/// stepping back is always allowed (except out of Done).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignupStep {
    SelectPlan,
    EnterDetails,
    UploadContract,
    Review,
    Done,
}

impl SignupStep {
    pub fn as_str(self) -> &'static str {
        match self {
            SignupStep::SelectPlan => "SELECT_PLAN",
            SignupStep::EnterDetails => "ENTER_DETAILS",
            SignupStep::UploadContract => "UPLOAD_CONTRACT",
            SignupStep::Review => "REVIEW",
            SignupStep::Done => "DONE",
        }
    }

    pub fn back(self) -> Option<SignupStep> {
        match self {
            SignupStep::SelectPlan => None,
            SignupStep::EnterDetails => Some(SignupStep::SelectPlan),
            SignupStep::UploadContract => Some(SignupStep::EnterDetails),
            SignupStep::Review => Some(SignupStep::UploadContract),
            SignupStep::Done => None,
        }
    }
}

impl std::str::FromStr for SignupStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SELECT_PLAN" => Ok(SignupStep::SelectPlan),
            "ENTER_DETAILS" => Ok(SignupStep::EnterDetails),
            "UPLOAD_CONTRACT" => Ok(SignupStep::UploadContract),
            "REVIEW" => Ok(SignupStep::Review),
            "DONE" => Ok(SignupStep::Done),
            other => Err(format!("Unknown signup step: {other}")),
        }
    }
}

/// Everything collected across the wizard, persisted as the session's
/// JSON snapshot. The password is hashed the moment the details step is
/// accepted; the plaintext never reaches storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    pub service_id: Option<Uuid>,
    pub plan: Option<PlanKey>,
    #[serde(default)]
    pub dependent_count: u32,
    #[serde(default)]
    pub dependent_names: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub email: String,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_path: Option<String>,
}

impl SignupForm {
    /// Copy for API responses: the stored credential hash never leaves
    /// the server.
    pub fn sanitized(&self) -> SignupForm {
        SignupForm {
            password_hash: None,
            ..self.clone()
        }
    }
}

/// Raw input for the details step. Phone and complement are the only
/// optional fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsInput {
    pub name: String,
    pub tax_id: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub password: String,
    pub password_confirm: String,
}

impl DetailsInput {
    /// Field completeness and password checks for the details gate.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("tax_id", &self.tax_id),
            ("email", &self.email),
            ("postal_code", &self.postal_code),
            ("street", &self.street),
            ("number", &self.number),
            ("district", &self.district),
            ("city", &self.city),
            ("state", &self.state),
            ("password", &self.password),
            ("password_confirm", &self.password_confirm),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("Field '{field}' is required"));
            }
        }
        if !email_regex().is_match(self.email.trim()) {
            return Err("Email address is not valid".to_string());
        }
        if self.password.len() < 8 {
            return Err("Password must be at least 8 characters".to_string());
        }
        if self.password != self.password_confirm {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

/// Accept the plan selection and move to the details step. The caller
/// has already resolved `service_id` to an existing service.
pub fn select_plan(
    form: &mut SignupForm,
    service_id: Uuid,
    plan: PlanKey,
    dependent_count: u32,
    dependent_names: Vec<String>,
) -> Result<SignupStep, String> {
    if dependent_count as usize != dependent_names.len() {
        return Err("One name per dependent is required".to_string());
    }
    if dependent_names.iter().any(|n| n.trim().is_empty()) {
        return Err("Dependent names cannot be empty".to_string());
    }
    form.service_id = Some(service_id);
    form.plan = Some(plan);
    form.dependent_count = dependent_count;
    form.dependent_names = dependent_names;
    Ok(SignupStep::EnterDetails)
}

/// Accept validated personal details and move to the contract step.
/// `password_hash` is the already-hashed password.
pub fn enter_details(
    form: &mut SignupForm,
    input: &DetailsInput,
    password_hash: String,
) -> Result<SignupStep, String> {
    input.validate()?;
    form.name = input.name.trim().to_string();
    form.tax_id = input.tax_id.trim().to_string();
    form.email = input.email.trim().to_string();
    form.phone = input.phone.trim().to_string();
    form.postal_code = input.postal_code.trim().to_string();
    form.street = input.street.trim().to_string();
    form.number = input.number.trim().to_string();
    form.complement = input.complement.trim().to_string();
    form.district = input.district.trim().to_string();
    form.city = input.city.trim().to_string();
    form.state = input.state.trim().to_string();
    form.password_hash = Some(password_hash);
    Ok(SignupStep::UploadContract)
}

/// Record the stored path of the signed contract and move to review.
pub fn attach_contract(form: &mut SignupForm, path: String) -> SignupStep {
    form.contract_path = Some(path);
    SignupStep::Review
}

/// Final gate before the member row is written. Everything the earlier
/// steps were supposed to collect must be present.
pub fn ready_to_confirm(form: &SignupForm) -> Result<(), String> {
    if form.service_id.is_none() || form.plan.is_none() {
        return Err("No plan selected".to_string());
    }
    if form.name.is_empty() || form.email.is_empty() || form.password_hash.is_none() {
        return Err("Personal details are incomplete".to_string());
    }
    if form.contract_path.is_none() {
        return Err("The signed contract has not been uploaded".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> DetailsInput {
        DetailsInput {
            name: "Maria Silva".into(),
            tax_id: "123.456.789-00".into(),
            email: "maria@example.com".into(),
            phone: String::new(),
            postal_code: "01001-000".into(),
            street: "Rua A".into(),
            number: "42".into(),
            complement: String::new(),
            district: "Centro".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            password: "hunter2hunter2".into(),
            password_confirm: "hunter2hunter2".into(),
        }
    }

    #[test]
    fn full_walk_reaches_review() {
        let mut form = SignupForm::default();

        let step = select_plan(
            &mut form,
            Uuid::now_v7(),
            PlanKey::Semiannual,
            1,
            vec!["João Silva".into()],
        )
        .unwrap();
        assert_eq!(step, SignupStep::EnterDetails);

        let step = enter_details(&mut form, &details(), "hash".into()).unwrap();
        assert_eq!(step, SignupStep::UploadContract);

        let step = attach_contract(&mut form, "uploads/contracts/x.pdf".into());
        assert_eq!(step, SignupStep::Review);

        assert!(ready_to_confirm(&form).is_ok());
    }

    #[test]
    fn details_gate_rejects_missing_required_field() {
        let mut input = details();
        input.city = "  ".into();
        assert!(input.validate().unwrap_err().contains("city"));
    }

    #[test]
    fn details_gate_rejects_malformed_email() {
        let mut input = details();
        input.email = "not-an-email".into();
        assert!(input.validate().unwrap_err().contains("Email"));
    }

    #[test]
    fn details_gate_rejects_password_mismatch() {
        let mut input = details();
        input.password_confirm = "something-else".into();
        assert_eq!(input.validate().unwrap_err(), "Passwords do not match");
    }

    #[test]
    fn optional_fields_may_stay_empty() {
        let input = details();
        assert!(input.phone.is_empty());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn dependent_names_must_match_count() {
        let mut form = SignupForm::default();
        let err = select_plan(&mut form, Uuid::now_v7(), PlanKey::Monthly, 2, vec!["A".into()])
            .unwrap_err();
        assert!(err.contains("per dependent"));
    }

    #[test]
    fn back_transitions_are_unconditional_until_done() {
        assert_eq!(SignupStep::Review.back(), Some(SignupStep::UploadContract));
        assert_eq!(
            SignupStep::UploadContract.back(),
            Some(SignupStep::EnterDetails)
        );
        assert_eq!(SignupStep::EnterDetails.back(), Some(SignupStep::SelectPlan));
        assert_eq!(SignupStep::SelectPlan.back(), None);
        assert_eq!(SignupStep::Done.back(), None);
    }

    #[test]
    fn confirm_requires_contract() {
        let mut form = SignupForm::default();
        select_plan(&mut form, Uuid::now_v7(), PlanKey::Monthly, 0, vec![]).unwrap();
        enter_details(&mut form, &details(), "hash".into()).unwrap();
        assert!(ready_to_confirm(&form).is_err());
    }

    #[test]
    fn step_strings_round_trip() {
        for step in [
            SignupStep::SelectPlan,
            SignupStep::EnterDetails,
            SignupStep::UploadContract,
            SignupStep::Review,
            SignupStep::Done,
        ] {
            assert_eq!(step.as_str().parse::<SignupStep>().unwrap(), step);
        }
    }
}
