use sqlx::PgPool;
use uuid::Uuid;

use crate::models::FaqEntry;

pub async fn create(
    pool: &PgPool,
    question: &str,
    answer: &str,
    status: &str,
) -> Result<FaqEntry, sqlx::Error> {
    sqlx::query_as::<_, FaqEntry>(
        "INSERT INTO faq_entries (question, answer, status) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(question)
    .bind(answer)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<FaqEntry>, sqlx::Error> {
    sqlx::query_as::<_, FaqEntry>("SELECT * FROM faq_entries WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<FaqEntry>, sqlx::Error> {
    sqlx::query_as::<_, FaqEntry>("SELECT * FROM faq_entries ORDER BY created_at")
        .fetch_all(pool)
        .await
}

/// ACTIVE entries, optionally keyword-filtered across question and answer.
pub async fn list_active(pool: &PgPool, search: Option<&str>) -> Result<Vec<FaqEntry>, sqlx::Error> {
    match search {
        Some(term) => {
            let pattern = format!("%{term}%");
            sqlx::query_as::<_, FaqEntry>(
                "SELECT * FROM faq_entries
                 WHERE status = 'ACTIVE' AND (question ILIKE $1 OR answer ILIKE $1)
                 ORDER BY created_at",
            )
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, FaqEntry>(
                "SELECT * FROM faq_entries WHERE status = 'ACTIVE' ORDER BY created_at",
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    question: &str,
    answer: &str,
    status: &str,
) -> Result<FaqEntry, sqlx::Error> {
    sqlx::query_as::<_, FaqEntry>(
        "UPDATE faq_entries SET question = $2, answer = $3, status = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(question)
    .bind(answer)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM faq_entries WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
