use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthMember;
use crate::db;
use crate::error::AppError;
use crate::models::{News, NewsComment};
use crate::state::SharedState;

const DEFAULT_PAGE_SIZE: i64 = 5;
const MAX_PAGE_SIZE: i64 = 50;

#[derive(Deserialize)]
pub struct ListQuery {
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct NewsListResponse {
    pub items: Vec<News>,
    pub total: i64,
}

#[derive(Serialize)]
pub struct NewsDetail {
    #[serde(flatten)]
    pub news: News,
    pub like_count: i64,
    pub comments: Vec<NewsComment>,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// Published feed, newest first. Tag filtering happens over the parsed
/// tag list so partial matches don't leak through.
pub async fn list(
    State(state): State<SharedState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<NewsListResponse>, AppError> {
    let limit = q.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = q.offset.unwrap_or(0).max(0);

    match q.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => {
            // Tag filter walks the full published set; the feed is small.
            let all = db::news::list_published(&state.pool, i64::MAX, 0).await?;
            let filtered: Vec<News> = all
                .into_iter()
                .filter(|n| n.tag_list().iter().any(|t| t == tag))
                .collect();
            let total = filtered.len() as i64;
            let items = filtered
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
            Ok(Json(NewsListResponse { items, total }))
        }
        None => {
            let total = db::news::count_published(&state.pool).await?;
            let items = db::news::list_published(&state.pool, limit, offset).await?;
            Ok(Json(NewsListResponse { items, total }))
        }
    }
}

pub async fn detail(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsDetail>, AppError> {
    let news = db::news::find_by_id(&state.pool, id)
        .await?
        .filter(|n| n.status == "PUBLISHED")
        .ok_or_else(|| AppError::NotFound("News item not found".to_string()))?;

    let like_count = db::news_likes::count_for_news(&state.pool, id).await?;
    let comments = db::news_comments::list_approved_for_news(&state.pool, id).await?;

    Ok(Json(NewsDetail {
        news,
        like_count,
        comments,
    }))
}

/// Comments go to moderation; they appear publicly once approved.
pub async fn comment(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<NewsComment>, AppError> {
    let body = req.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".to_string()));
    }

    db::news::find_by_id(&state.pool, id)
        .await?
        .filter(|n| n.status == "PUBLISHED")
        .ok_or_else(|| AppError::NotFound("News item not found".to_string()))?;

    let member = db::members::find_by_id(&state.pool, auth.member_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Member not found".to_string()))?;

    let comment =
        db::news_comments::create(&state.pool, id, member.id, &member.name, body).await?;
    Ok(Json(comment))
}

pub async fn like(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::news::find_by_id(&state.pool, id)
        .await?
        .filter(|n| n.status == "PUBLISHED")
        .ok_or_else(|| AppError::NotFound("News item not found".to_string()))?;

    db::news_likes::add(&state.pool, id, auth.member_id).await?;
    let like_count = db::news_likes::count_for_news(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "like_count": like_count })))
}

pub async fn unlike(
    auth: AuthMember,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::news_likes::remove(&state.pool, id, auth.member_id).await?;
    let like_count = db::news_likes::count_for_news(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "like_count": like_count })))
}
