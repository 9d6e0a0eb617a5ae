use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A membership service with its pricing knobs: the monthly base price,
/// the per-dependent surcharge, a flat coupon for the monthly plan and
/// percentage coupons for the semiannual/annual plans.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub monthly_price: Decimal,
    pub dependent_price: Decimal,
    pub monthly_coupon: Decimal,
    pub semiannual_coupon_pct: Decimal,
    pub annual_coupon_pct: Decimal,
    pub created_at: DateTime<Utc>,
}
