use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Agreement;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
    category: &str,
    icon_url: &str,
    image_url: &str,
    featured: bool,
    status: &str,
) -> Result<Agreement, sqlx::Error> {
    sqlx::query_as::<_, Agreement>(
        "INSERT INTO agreements (name, description, category, icon_url, image_url, featured, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(category)
    .bind(icon_url)
    .bind(image_url)
    .bind(featured)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Agreement>, sqlx::Error> {
    sqlx::query_as::<_, Agreement>("SELECT * FROM agreements WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Agreement>, sqlx::Error> {
    sqlx::query_as::<_, Agreement>("SELECT * FROM agreements ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Public directory: ACTIVE agreements, optionally filtered by a
/// name/category search term.
pub async fn list_active(
    pool: &PgPool,
    search: Option<&str>,
) -> Result<Vec<Agreement>, sqlx::Error> {
    match search {
        Some(term) => {
            let pattern = format!("%{term}%");
            sqlx::query_as::<_, Agreement>(
                "SELECT * FROM agreements
                 WHERE status = 'ACTIVE' AND (name ILIKE $1 OR category ILIKE $1)
                 ORDER BY name",
            )
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Agreement>(
                "SELECT * FROM agreements WHERE status = 'ACTIVE' ORDER BY name",
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn list_featured(pool: &PgPool) -> Result<Vec<Agreement>, sqlx::Error> {
    sqlx::query_as::<_, Agreement>(
        "SELECT * FROM agreements WHERE status = 'ACTIVE' AND featured ORDER BY name",
    )
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
    category: &str,
    icon_url: &str,
    image_url: &str,
    featured: bool,
    status: &str,
) -> Result<Agreement, sqlx::Error> {
    sqlx::query_as::<_, Agreement>(
        "UPDATE agreements SET name = $2, description = $3, category = $4, icon_url = $5,
                               image_url = $6, featured = $7, status = $8
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(category)
    .bind(icon_url)
    .bind(image_url)
    .bind(featured)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM agreements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
