use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TagFollow;

pub async fn list_for_member(pool: &PgPool, member_id: Uuid) -> Result<Vec<TagFollow>, sqlx::Error> {
    sqlx::query_as::<_, TagFollow>(
        "SELECT * FROM tag_follows WHERE member_id = $1 ORDER BY tag",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await
}

/// Replace the member's followed-tag set wholesale.
pub async fn replace_for_member(
    pool: &PgPool,
    member_id: Uuid,
    tags: &[String],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tag_follows WHERE member_id = $1")
        .bind(member_id)
        .execute(&mut *tx)
        .await?;

    for tag in tags {
        sqlx::query("INSERT INTO tag_follows (member_id, tag) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(member_id)
            .bind(tag)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await
}
