use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub agreement_id: Option<Uuid>,
    pub name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub details: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
