use sqlx::PgPool;
use uuid::Uuid;

pub async fn add(pool: &PgPool, news_id: Uuid, member_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO news_likes (news_id, member_id) VALUES ($1, $2)
         ON CONFLICT (news_id, member_id) DO NOTHING",
    )
    .bind(news_id)
    .bind(member_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove(pool: &PgPool, news_id: Uuid, member_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM news_likes WHERE news_id = $1 AND member_id = $2")
        .bind(news_id)
        .bind(member_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn count_for_news(pool: &PgPool, news_id: Uuid) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM news_likes WHERE news_id = $1")
        .bind(news_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn exists(pool: &PgPool, news_id: Uuid, member_id: Uuid) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM news_likes WHERE news_id = $1 AND member_id = $2)",
    )
    .bind(news_id)
    .bind(member_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}
