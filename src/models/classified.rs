use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Member-submitted ads. Moderation moves PENDING to ACTIVE or REJECTED;
/// ACTIVE ads drop out of the public listing 30 days after creation.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Classified {
    pub id: Uuid,
    pub member_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub description: String,
    pub contact: String,
    pub category: String,
    pub featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub const CLASSIFIED_CATEGORIES: &[&str] = &["SALE", "SERVICE", "RENTAL", "DONATION", "OTHER"];

/// Ads a member may hold in PENDING or ACTIVE state at once.
pub const CLASSIFIED_LIMIT_PER_MEMBER: i64 = 3;

/// Days an ACTIVE ad remains publicly listed.
pub const CLASSIFIED_EXPIRY_DAYS: i64 = 30;
