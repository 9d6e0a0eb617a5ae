use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Classified;

pub async fn create(
    pool: &PgPool,
    member_id: Uuid,
    author_name: &str,
    title: &str,
    description: &str,
    contact: &str,
    category: &str,
) -> Result<Classified, sqlx::Error> {
    sqlx::query_as::<_, Classified>(
        "INSERT INTO classifieds (member_id, author_name, title, description, contact, category)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(member_id)
    .bind(author_name)
    .bind(title)
    .bind(description)
    .bind(contact)
    .bind(category)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Classified>, sqlx::Error> {
    sqlx::query_as::<_, Classified>("SELECT * FROM classifieds WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct PublicFilter<'a> {
    /// Ads created before this instant have expired out of the listing.
    pub cutoff: DateTime<Utc>,
    pub category: Option<&'a str>,
    pub search: Option<&'a str>,
}

/// Public board: ACTIVE ads inside the expiry window, featured first,
/// newest first.
pub async fn list_public(
    pool: &PgPool,
    filter: &PublicFilter<'_>,
) -> Result<Vec<Classified>, sqlx::Error> {
    let pattern = filter.search.map(|s| format!("%{s}%"));
    sqlx::query_as::<_, Classified>(
        "SELECT * FROM classifieds
         WHERE status = 'ACTIVE'
           AND created_at >= $1
           AND ($2::text IS NULL OR category = $2)
           AND ($3::text IS NULL OR title ILIKE $3 OR description ILIKE $3)
         ORDER BY featured DESC, created_at DESC",
    )
    .bind(filter.cutoff)
    .bind(filter.category)
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Ads that count against the per-member cap: anything still PENDING or
/// ACTIVE.
pub async fn count_live_for_member(pool: &PgPool, member_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM classifieds
         WHERE member_id = $1 AND status IN ('PENDING', 'ACTIVE')",
    )
    .bind(member_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Classified>, sqlx::Error> {
    sqlx::query_as::<_, Classified>("SELECT * FROM classifieds ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Classified, sqlx::Error> {
    sqlx::query_as::<_, Classified>(
        "UPDATE classifieds SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn set_featured(
    pool: &PgPool,
    id: Uuid,
    featured: bool,
) -> Result<Classified, sqlx::Error> {
    sqlx::query_as::<_, Classified>(
        "UPDATE classifieds SET featured = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(featured)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM classifieds WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
