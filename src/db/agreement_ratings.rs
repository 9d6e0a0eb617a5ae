use sqlx::PgPool;
use uuid::Uuid;

use crate::models::AgreementRating;

/// One rating per member per agreement; re-rating overwrites in place.
pub async fn upsert(
    pool: &PgPool,
    agreement_id: Uuid,
    member_id: Uuid,
    rating: i32,
) -> Result<AgreementRating, sqlx::Error> {
    sqlx::query_as::<_, AgreementRating>(
        "INSERT INTO agreement_ratings (agreement_id, member_id, rating)
         VALUES ($1, $2, $3)
         ON CONFLICT (agreement_id, member_id) DO UPDATE SET rating = EXCLUDED.rating
         RETURNING *",
    )
    .bind(agreement_id)
    .bind(member_id)
    .bind(rating)
    .fetch_one(pool)
    .await
}

/// Average rating and vote count for an agreement.
pub async fn summary(
    pool: &PgPool,
    agreement_id: Uuid,
) -> Result<(Option<f64>, i64), sqlx::Error> {
    sqlx::query_as::<_, (Option<f64>, i64)>(
        "SELECT AVG(rating)::float8, COUNT(*) FROM agreement_ratings WHERE agreement_id = $1",
    )
    .bind(agreement_id)
    .fetch_one(pool)
    .await
}

pub async fn find_for_member(
    pool: &PgPool,
    agreement_id: Uuid,
    member_id: Uuid,
) -> Result<Option<AgreementRating>, sqlx::Error> {
    sqlx::query_as::<_, AgreementRating>(
        "SELECT * FROM agreement_ratings WHERE agreement_id = $1 AND member_id = $2",
    )
    .bind(agreement_id)
    .bind(member_id)
    .fetch_optional(pool)
    .await
}
