use sqlx::PgPool;

use crate::models::OrgProfile;

pub struct OrgProfileInput<'a> {
    pub site_title: &'a str,
    pub logo_url: &'a str,
    pub tax_id: &'a str,
    pub founded_on: &'a str,
    pub history: &'a str,
    pub mission: &'a str,
    pub vision: &'a str,
    pub org_values: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: &'a str,
    pub address: &'a str,
}

pub async fn get(pool: &PgPool) -> Result<Option<OrgProfile>, sqlx::Error> {
    sqlx::query_as::<_, OrgProfile>("SELECT * FROM org_profile WHERE id = 1")
        .fetch_optional(pool)
        .await
}

/// The table holds exactly one row; every write is an upsert against the
/// fixed id.
pub async fn upsert(pool: &PgPool, input: &OrgProfileInput<'_>) -> Result<OrgProfile, sqlx::Error> {
    sqlx::query_as::<_, OrgProfile>(
        "INSERT INTO org_profile (id, site_title, logo_url, tax_id, founded_on, history,
                                  mission, vision, org_values, contact_email, contact_phone, address)
         VALUES (1, $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         ON CONFLICT (id) DO UPDATE SET
             site_title = EXCLUDED.site_title,
             logo_url = EXCLUDED.logo_url,
             tax_id = EXCLUDED.tax_id,
             founded_on = EXCLUDED.founded_on,
             history = EXCLUDED.history,
             mission = EXCLUDED.mission,
             vision = EXCLUDED.vision,
             org_values = EXCLUDED.org_values,
             contact_email = EXCLUDED.contact_email,
             contact_phone = EXCLUDED.contact_phone,
             address = EXCLUDED.address,
             updated_at = now()
         RETURNING *",
    )
    .bind(input.site_title)
    .bind(input.logo_url)
    .bind(input.tax_id)
    .bind(input.founded_on)
    .bind(input.history)
    .bind(input.mission)
    .bind(input.vision)
    .bind(input.org_values)
    .bind(input.contact_email)
    .bind(input.contact_phone)
    .bind(input.address)
    .fetch_one(pool)
    .await
}
