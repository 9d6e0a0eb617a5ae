use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Event;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    title: &str,
    description: &str,
    event_date: NaiveDate,
    event_time: &str,
    location: &str,
    image_url: &str,
    status: &str,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "INSERT INTO events (title, description, event_date, event_time, location, image_url, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(event_date)
    .bind(event_time)
    .bind(location)
    .bind(image_url)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_scheduled(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT * FROM events WHERE status = 'SCHEDULED' ORDER BY event_date",
    )
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    description: &str,
    event_date: NaiveDate,
    event_time: &str,
    location: &str,
    image_url: &str,
    status: &str,
) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "UPDATE events SET title = $2, description = $3, event_date = $4, event_time = $5,
                           location = $6, image_url = $7, status = $8
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(event_date)
    .bind(event_time)
    .bind(location)
    .bind(image_url)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
