use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tags are stored as a comma-separated list, mirroring how editors
/// enter them.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub tags: String,
    pub featured: bool,
    pub status: String,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl News {
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Comments enter PENDING and only show publicly once APPROVED.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct NewsComment {
    pub id: Uuid,
    pub news_id: Uuid,
    pub member_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct NewsLike {
    pub id: Uuid,
    pub news_id: Uuid,
    pub member_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TagFollow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_list_trims_and_drops_empties() {
        let news = News {
            id: Uuid::now_v7(),
            title: "t".into(),
            body: String::new(),
            image_url: String::new(),
            tags: " health , , sports,".into(),
            featured: false,
            status: "PUBLISHED".into(),
            published_at: Utc::now(),
            created_at: Utc::now(),
        };
        assert_eq!(news.tag_list(), vec!["health", "sports"]);
    }
}
