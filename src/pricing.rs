use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Service;

/// Billing cadence. The three fixed keys guarantee `months() >= 1`, so
/// the per-month division below can never hit zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanKey {
    Monthly,
    Semiannual,
    Annual,
}

impl PlanKey {
    pub fn months(self) -> u32 {
        match self {
            PlanKey::Monthly => 1,
            PlanKey::Semiannual => 6,
            PlanKey::Annual => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanKey::Monthly => "MONTHLY",
            PlanKey::Semiannual => "SEMIANNUAL",
            PlanKey::Annual => "ANNUAL",
        }
    }
}

impl std::str::FromStr for PlanKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONTHLY" => Ok(PlanKey::Monthly),
            "SEMIANNUAL" => Ok(PlanKey::Semiannual),
            "ANNUAL" => Ok(PlanKey::Annual),
            other => Err(format!("Unknown plan: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanQuote {
    pub plan: PlanKey,
    pub months: u32,
    /// What the coupon shaves off the base price over the whole term.
    pub discount: Decimal,
    /// Surcharge for dependents over the whole term.
    pub dependents_total: Decimal,
    pub total: Decimal,
    pub per_month: Decimal,
}

/// Price a service under a plan:
///   discount = monthly_coupon (flat)            for MONTHLY
///            = pct/100 * monthly_price * months for SEMIANNUAL / ANNUAL
///   total    = monthly_price * months - discount + dependents * dependent_price * months
///   per_month = total / months
pub fn quote(service: &Service, plan: PlanKey, dependents: u32) -> PlanQuote {
    let months = Decimal::from(plan.months());
    let base_total = service.monthly_price * months;

    let discount = match plan {
        PlanKey::Monthly => service.monthly_coupon,
        PlanKey::Semiannual => service.semiannual_coupon_pct / Decimal::ONE_HUNDRED * base_total,
        PlanKey::Annual => service.annual_coupon_pct / Decimal::ONE_HUNDRED * base_total,
    };

    let dependents_total = Decimal::from(dependents) * service.dependent_price * months;
    let total = base_total - discount + dependents_total;
    let per_month = (total / months).round_dp(2);

    PlanQuote {
        plan,
        months: plan.months(),
        discount: discount.round_dp(2),
        dependents_total,
        total: total.round_dp(2),
        per_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn service(monthly: &str, dependent: &str, flat: &str, semi_pct: &str, annual_pct: &str) -> Service {
        Service {
            id: Uuid::now_v7(),
            name: "Health plan".into(),
            description: String::new(),
            monthly_price: dec(monthly),
            dependent_price: dec(dependent),
            monthly_coupon: dec(flat),
            semiannual_coupon_pct: dec(semi_pct),
            annual_coupon_pct: dec(annual_pct),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn semiannual_percentage_discount() {
        // base 100.00, 10% over 6 months: discount 60, total 540, 90/month
        let s = service("100.00", "0", "0", "10", "0");
        let q = quote(&s, PlanKey::Semiannual, 0);
        assert_eq!(q.discount, dec("60.00"));
        assert_eq!(q.total, dec("540.00"));
        assert_eq!(q.per_month, dec("90.00"));
    }

    #[test]
    fn monthly_flat_coupon() {
        // base 50.00, flat 5.00 off: total 45, 45/month
        let s = service("50.00", "0", "5.00", "0", "0");
        let q = quote(&s, PlanKey::Monthly, 0);
        assert_eq!(q.discount, dec("5.00"));
        assert_eq!(q.total, dec("45.00"));
        assert_eq!(q.per_month, dec("45.00"));
    }

    #[test]
    fn annual_percentage_discount() {
        let s = service("100.00", "0", "0", "10", "20");
        let q = quote(&s, PlanKey::Annual, 0);
        assert_eq!(q.months, 12);
        assert_eq!(q.discount, dec("240.00"));
        assert_eq!(q.total, dec("960.00"));
        assert_eq!(q.per_month, dec("80.00"));
    }

    #[test]
    fn dependents_add_surcharge_over_term() {
        let s = service("100.00", "20.00", "0", "10", "0");
        let q = quote(&s, PlanKey::Semiannual, 2);
        // 600 - 60 + 2 * 20 * 6
        assert_eq!(q.dependents_total, dec("240.00"));
        assert_eq!(q.total, dec("780.00"));
        assert_eq!(q.per_month, dec("130.00"));
    }

    #[test]
    fn per_month_rounds_to_cents() {
        let s = service("33.33", "0", "0", "0", "0");
        let q = quote(&s, PlanKey::Annual, 0);
        assert_eq!(q.total, dec("399.96"));
        assert_eq!(q.per_month, dec("33.33"));
    }

    #[test]
    fn plan_key_parses_round_trip() {
        for key in [PlanKey::Monthly, PlanKey::Semiannual, PlanKey::Annual] {
            assert_eq!(key.as_str().parse::<PlanKey>().unwrap(), key);
        }
        assert!("WEEKLY".parse::<PlanKey>().is_err());
    }
}
