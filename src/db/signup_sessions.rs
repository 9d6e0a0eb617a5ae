use sqlx::PgPool;
use uuid::Uuid;

use crate::models::SignupSession;

pub async fn create(pool: &PgPool) -> Result<SignupSession, sqlx::Error> {
    sqlx::query_as::<_, SignupSession>(
        "INSERT INTO signup_sessions DEFAULT VALUES RETURNING *",
    )
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<SignupSession>, sqlx::Error> {
    sqlx::query_as::<_, SignupSession>("SELECT * FROM signup_sessions WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn save(
    pool: &PgPool,
    id: Uuid,
    step: &str,
    data: &serde_json::Value,
) -> Result<SignupSession, sqlx::Error> {
    sqlx::query_as::<_, SignupSession>(
        "UPDATE signup_sessions SET step = $2, data = $3, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(step)
    .bind(data)
    .fetch_one(pool)
    .await
}

pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM signup_sessions WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
