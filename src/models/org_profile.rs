use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Institutional record. Exactly one row exists; writes go through an
/// upsert against the fixed id.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct OrgProfile {
    pub id: i32,
    pub site_title: String,
    pub logo_url: String,
    pub tax_id: String,
    pub founded_on: String,
    pub history: String,
    pub mission: String,
    pub vision: String,
    pub org_values: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub updated_at: DateTime<Utc>,
}
