use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle: created PENDING by the signup wizard, moved to ACTIVE by
/// admin approval, then BLOCKED or INACTIVE. Only an explicit admin
/// delete removes the row.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub tax_id: String,
    pub email: String,
    pub phone: String,
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub district: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: String,
    pub role: String,
    pub plan: Option<String>,
    pub service_id: Option<Uuid>,
    pub dependent_names: String,
    pub contract_path: Option<String>,
    pub last_access: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
