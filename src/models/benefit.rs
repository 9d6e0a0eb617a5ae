use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Benefit {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}
