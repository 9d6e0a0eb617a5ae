use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Agreement {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon_url: String,
    pub image_url: String,
    pub featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AgreementRating {
    pub id: Uuid,
    pub agreement_id: Uuid,
    pub member_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}
