use sqlx::PgPool;
use uuid::Uuid;

use crate::models::NewsComment;

pub async fn create(
    pool: &PgPool,
    news_id: Uuid,
    member_id: Uuid,
    author_name: &str,
    body: &str,
) -> Result<NewsComment, sqlx::Error> {
    sqlx::query_as::<_, NewsComment>(
        "INSERT INTO news_comments (news_id, member_id, author_name, body)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(news_id)
    .bind(member_id)
    .bind(author_name)
    .bind(body)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<NewsComment>, sqlx::Error> {
    sqlx::query_as::<_, NewsComment>("SELECT * FROM news_comments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_approved_for_news(
    pool: &PgPool,
    news_id: Uuid,
) -> Result<Vec<NewsComment>, sqlx::Error> {
    sqlx::query_as::<_, NewsComment>(
        "SELECT * FROM news_comments WHERE news_id = $1 AND status = 'APPROVED'
         ORDER BY created_at",
    )
    .bind(news_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<NewsComment>, sqlx::Error> {
    sqlx::query_as::<_, NewsComment>(
        "SELECT * FROM news_comments WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<NewsComment, sqlx::Error> {
    sqlx::query_as::<_, NewsComment>(
        "UPDATE news_comments SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM news_comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
