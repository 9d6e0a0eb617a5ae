use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Member;

pub struct NewMember<'a> {
    pub name: &'a str,
    pub tax_id: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub postal_code: &'a str,
    pub street: &'a str,
    pub number: &'a str,
    pub complement: &'a str,
    pub district: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub password_hash: &'a str,
    pub status: &'a str,
    pub role: &'a str,
    pub plan: Option<&'a str>,
    pub service_id: Option<Uuid>,
    pub dependent_names: &'a str,
    pub contract_path: Option<&'a str>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    new: &NewMember<'_>,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "INSERT INTO members (name, tax_id, email, phone, postal_code, street, number,
                              complement, district, city, state, password_hash, status,
                              role, plan, service_id, dependent_names, contract_path)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
         RETURNING *",
    )
    .bind(new.name)
    .bind(new.tax_id)
    .bind(new.email)
    .bind(new.phone)
    .bind(new.postal_code)
    .bind(new.street)
    .bind(new.number)
    .bind(new.complement)
    .bind(new.district)
    .bind(new.city)
    .bind(new.state)
    .bind(new.password_hash)
    .bind(new.status)
    .bind(new.role)
    .bind(new.plan)
    .bind(new.service_id)
    .bind(new.dependent_names)
    .bind(new.contract_path)
    .fetch_one(executor)
    .await
}

pub async fn count_all<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM members")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "SELECT * FROM members WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(status)
    .fetch_all(pool)
    .await
}

/// Self-service profile update. Email and tax id are deliberately not
/// part of the column list.
#[allow(clippy::too_many_arguments)]
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    phone: &str,
    postal_code: &str,
    street: &str,
    number: &str,
    complement: &str,
    district: &str,
    city: &str,
    state: &str,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "UPDATE members SET name = $2, phone = $3, postal_code = $4, street = $5,
                            number = $6, complement = $7, district = $8, city = $9, state = $10
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(postal_code)
    .bind(street)
    .bind(number)
    .bind(complement)
    .bind(district)
    .bind(city)
    .bind(state)
    .fetch_one(pool)
    .await
}

pub async fn update_account(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    email: &str,
    role: &str,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "UPDATE members SET name = $2, email = $3, role = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await
}

pub async fn update_status(pool: &PgPool, id: Uuid, status: &str) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>("UPDATE members SET status = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await
}

pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE members SET password_hash = $2 WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn touch_last_access(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE members SET last_access = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
