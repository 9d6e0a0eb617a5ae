use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Partner;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    agreement_id: Option<Uuid>,
    name: &str,
    contact_name: &str,
    email: &str,
    phone: &str,
    website: &str,
    address: &str,
    details: &str,
    status: &str,
) -> Result<Partner, sqlx::Error> {
    sqlx::query_as::<_, Partner>(
        "INSERT INTO partners (agreement_id, name, contact_name, email, phone, website,
                               address, details, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(agreement_id)
    .bind(name)
    .bind(contact_name)
    .bind(email)
    .bind(phone)
    .bind(website)
    .bind(address)
    .bind(details)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Partner>, sqlx::Error> {
    sqlx::query_as::<_, Partner>("SELECT * FROM partners WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Partner>, sqlx::Error> {
    sqlx::query_as::<_, Partner>("SELECT * FROM partners ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn list_active_by_agreement(
    pool: &PgPool,
    agreement_id: Uuid,
) -> Result<Vec<Partner>, sqlx::Error> {
    sqlx::query_as::<_, Partner>(
        "SELECT * FROM partners WHERE agreement_id = $1 AND status = 'ACTIVE' ORDER BY name",
    )
    .bind(agreement_id)
    .fetch_all(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    agreement_id: Option<Uuid>,
    name: &str,
    contact_name: &str,
    email: &str,
    phone: &str,
    website: &str,
    address: &str,
    details: &str,
    status: &str,
) -> Result<Partner, sqlx::Error> {
    sqlx::query_as::<_, Partner>(
        "UPDATE partners SET agreement_id = $2, name = $3, contact_name = $4, email = $5,
                             phone = $6, website = $7, address = $8, details = $9, status = $10
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(agreement_id)
    .bind(name)
    .bind(contact_name)
    .bind(email)
    .bind(phone)
    .bind(website)
    .bind(address)
    .bind(details)
    .bind(status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM partners WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
