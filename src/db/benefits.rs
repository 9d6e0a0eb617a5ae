use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Benefit;

pub async fn create(
    pool: &PgPool,
    title: &str,
    description: &str,
    icon: &str,
) -> Result<Benefit, sqlx::Error> {
    sqlx::query_as::<_, Benefit>(
        "INSERT INTO benefits (title, description, icon) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(icon)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Benefit>, sqlx::Error> {
    sqlx::query_as::<_, Benefit>("SELECT * FROM benefits WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Benefit>, sqlx::Error> {
    sqlx::query_as::<_, Benefit>("SELECT * FROM benefits ORDER BY created_at")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    description: &str,
    icon: &str,
) -> Result<Benefit, sqlx::Error> {
    sqlx::query_as::<_, Benefit>(
        "UPDATE benefits SET title = $2, description = $3, icon = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(icon)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM benefits WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
