use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Service;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
    monthly_price: Decimal,
    dependent_price: Decimal,
    monthly_coupon: Decimal,
    semiannual_coupon_pct: Decimal,
    annual_coupon_pct: Decimal,
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "INSERT INTO services (name, description, monthly_price, dependent_price,
                               monthly_coupon, semiannual_coupon_pct, annual_coupon_pct)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(monthly_price)
    .bind(dependent_price)
    .bind(monthly_coupon)
    .bind(semiannual_coupon_pct)
    .bind(annual_coupon_pct)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
        .fetch_all(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
    monthly_price: Decimal,
    dependent_price: Decimal,
    monthly_coupon: Decimal,
    semiannual_coupon_pct: Decimal,
    annual_coupon_pct: Decimal,
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "UPDATE services SET name = $2, description = $3, monthly_price = $4,
                             dependent_price = $5, monthly_coupon = $6,
                             semiannual_coupon_pct = $7, annual_coupon_pct = $8
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(monthly_price)
    .bind(dependent_price)
    .bind(monthly_coupon)
    .bind(semiannual_coupon_pct)
    .bind(annual_coupon_pct)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
