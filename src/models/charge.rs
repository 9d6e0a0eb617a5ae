use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status is PENDING, PAID or OVERDUE. A receipt can be issued only for
/// a PAID charge.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Charge {
    pub id: Uuid,
    pub member_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub paid_on: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
