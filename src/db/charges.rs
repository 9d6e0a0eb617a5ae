use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Charge;

pub async fn create(
    pool: &PgPool,
    member_id: Uuid,
    description: &str,
    amount: Decimal,
    due_on: NaiveDate,
    status: &str,
) -> Result<Charge, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "INSERT INTO charges (member_id, description, amount, due_on, status)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(member_id)
    .bind(description)
    .bind(amount)
    .bind(due_on)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>("SELECT * FROM charges WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Scoped lookup so a member can only ever reach their own charges.
pub async fn find_for_member(
    pool: &PgPool,
    id: Uuid,
    member_id: Uuid,
) -> Result<Option<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>("SELECT * FROM charges WHERE id = $1 AND member_id = $2")
        .bind(id)
        .bind(member_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_member(pool: &PgPool, member_id: Uuid) -> Result<Vec<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges WHERE member_id = $1 ORDER BY due_on DESC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>("SELECT * FROM charges ORDER BY due_on DESC")
        .fetch_all(pool)
        .await
}

/// Sum of amounts per status, for the admin dashboard header.
pub async fn totals_by_status(pool: &PgPool) -> Result<Vec<(String, Decimal)>, sqlx::Error> {
    sqlx::query_as::<_, (String, Decimal)>(
        "SELECT status, COALESCE(SUM(amount), 0) FROM charges GROUP BY status",
    )
    .fetch_all(pool)
    .await
}

/// Marking PAID stamps the payment date; any other status clears it.
pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<Charge, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "UPDATE charges
         SET status = $2,
             paid_on = CASE WHEN $2 = 'PAID' THEN CURRENT_DATE ELSE NULL END
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM charges WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Flip PENDING charges past their due date to OVERDUE. Returns how many
/// rows changed.
pub async fn mark_overdue(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE charges SET status = 'OVERDUE'
         WHERE status = 'PENDING' AND due_on < CURRENT_DATE",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// PENDING charges whose due date falls within the next `window_days`.
pub async fn list_due_within(
    pool: &PgPool,
    window_days: i64,
) -> Result<Vec<Charge>, sqlx::Error> {
    sqlx::query_as::<_, Charge>(
        "SELECT * FROM charges
         WHERE status = 'PENDING'
           AND due_on >= CURRENT_DATE
           AND due_on <= CURRENT_DATE + $1::int
         ORDER BY due_on",
    )
    .bind(window_days as i32)
    .fetch_all(pool)
    .await
}
