use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side wizard state, keyed by the session id handed to the
/// client. `data` is the JSON snapshot of everything collected so far;
/// no member row exists until the final confirmation step.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SignupSession {
    pub id: Uuid,
    pub step: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
