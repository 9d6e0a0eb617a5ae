use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::News;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    title: &str,
    body: &str,
    image_url: &str,
    tags: &str,
    featured: bool,
    status: &str,
) -> Result<News, sqlx::Error> {
    sqlx::query_as::<_, News>(
        "INSERT INTO news (title, body, image_url, tags, featured, status)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(title)
    .bind(body)
    .bind(image_url)
    .bind(tags)
    .bind(featured)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<News>, sqlx::Error> {
    sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<News>, sqlx::Error> {
    sqlx::query_as::<_, News>("SELECT * FROM news ORDER BY published_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_published(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<News>, sqlx::Error> {
    sqlx::query_as::<_, News>(
        "SELECT * FROM news WHERE status = 'PUBLISHED'
         ORDER BY published_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_published(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news WHERE status = 'PUBLISHED'")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

/// Published items newer than the given instant. Feeds the
/// followed-tags notification check at login.
pub async fn list_published_since(
    pool: &PgPool,
    since: DateTime<Utc>,
) -> Result<Vec<News>, sqlx::Error> {
    sqlx::query_as::<_, News>(
        "SELECT * FROM news WHERE status = 'PUBLISHED' AND published_at > $1
         ORDER BY published_at DESC",
    )
    .bind(since)
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    body: &str,
    image_url: &str,
    tags: &str,
    featured: bool,
    status: &str,
) -> Result<News, sqlx::Error> {
    sqlx::query_as::<_, News>(
        "UPDATE news SET title = $2, body = $3, image_url = $4, tags = $5,
                         featured = $6, status = $7
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(image_url)
    .bind(tags)
    .bind(featured)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
