//! Chapter HTTP Handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    CreateChapter, DeleteChapter, GetChapter, GetChapterLockState, ListChapters, UpdateChapter,
};
use crate::domain::novel::AgeRating;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    pub novel_id: Uuid,
    pub chapter_number: i32,
    #[serde(default)]
    pub part_number: Option<i32>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author_thoughts: Option<String>,
    #[serde(default)]
    pub coins: Option<u32>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub volume_id: Option<Uuid>,
    #[serde(default)]
    pub age_rating: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateChapterResponse {
    pub id: Uuid,
    pub publish_at: Option<String>,
    pub coins: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateChapterRequest {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author_thoughts: Option<String>,
    #[serde(default)]
    pub coins: Option<u32>,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reschedule: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    pub novel_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub novel_id: Uuid,
    pub chapter_number: u32,
    pub part_number: Option<i32>,
    pub is_draft: bool,
    pub title: String,
    pub content: String,
    pub author_thoughts: Option<String>,
    pub publish_at: Option<String>,
    pub coins: u32,
    pub lock_state: String,
    pub volume_id: Option<Uuid>,
    pub age_rating: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterSummaryResponse {
    pub id: Uuid,
    pub chapter_number: u32,
    pub part_number: Option<i32>,
    pub is_draft: bool,
    pub title: String,
    pub publish_at: Option<String>,
    pub coins: u32,
    pub lock_state: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterListResponse {
    pub novel_id: Uuid,
    pub total: usize,
    pub chapters: Vec<ChapterSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct LockStateResponse {
    pub id: Uuid,
    pub lock_state: String,
}

fn parse_age_rating(value: Option<&str>) -> Result<AgeRating, ApiError> {
    match value {
        None => Ok(AgeRating::default()),
        Some(s) => AgeRating::from_str(s)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown age rating: {}", s))),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 创建章节
pub async fn create_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateChapterRequest>,
) -> Result<Json<ApiResponse<CreateChapterResponse>>, ApiError> {
    let age_rating = parse_age_rating(req.age_rating.as_deref())?;

    let command = CreateChapter {
        novel_id: req.novel_id,
        chapter_number: req.chapter_number,
        part_number: req.part_number,
        title: req.title,
        content: req.content,
        author_thoughts: req.author_thoughts,
        coins_override: req.coins,
        publish_at: req.publish_at,
        volume_id: req.volume_id,
        age_rating,
    };

    let result = state.create_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(CreateChapterResponse {
        id: result.id,
        publish_at: result.publish_at.map(|at| at.to_rfc3339()),
        coins: result.coins,
    })))
}

/// 更新章节
pub async fn update_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let command = UpdateChapter {
        chapter_id: req.id,
        title: req.title,
        content: req.content,
        author_thoughts: req.author_thoughts,
        coins_override: req.coins,
        publish_at: req.publish_at,
        reschedule: req.reschedule,
    };

    state.update_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::ok()))
}

/// 删除章节
pub async fn delete_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteChapterRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_chapter_handler
        .handle(DeleteChapter { chapter_id: req.id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 获取章节详情
pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let result = state
        .get_chapter_handler
        .handle(GetChapter { chapter_id: req.id })
        .await?;

    Ok(Json(ApiResponse::success(ChapterResponse {
        id: result.id,
        novel_id: result.novel_id,
        chapter_number: result.chapter_number,
        part_number: result.part_number,
        is_draft: result.is_draft,
        title: result.title,
        content: result.content,
        author_thoughts: result.author_thoughts,
        publish_at: result.publish_at,
        coins: result.coins,
        lock_state: result.lock_state,
        volume_id: result.volume_id,
        age_rating: result.age_rating,
        created_at: result.created_at,
        updated_at: result.updated_at,
    })))
}

/// 列出小说章节
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<ChapterListResponse>>, ApiError> {
    let result = state
        .list_chapters_handler
        .handle(ListChapters {
            novel_id: req.novel_id,
        })
        .await?;

    let chapters: Vec<ChapterSummaryResponse> = result
        .into_iter()
        .map(|c| ChapterSummaryResponse {
            id: c.id,
            chapter_number: c.chapter_number,
            part_number: c.part_number,
            is_draft: c.is_draft,
            title: c.title,
            publish_at: c.publish_at,
            coins: c.coins,
            lock_state: c.lock_state,
        })
        .collect();

    Ok(Json(ApiResponse::success(ChapterListResponse {
        novel_id: req.novel_id,
        total: chapters.len(),
        chapters,
    })))
}

/// 获取章节锁定状态
pub async fn get_lock_state(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<LockStateResponse>>, ApiError> {
    let lock_state = state
        .get_lock_state_handler
        .handle(GetChapterLockState { chapter_id: req.id })
        .await?;

    Ok(Json(ApiResponse::success(LockStateResponse {
        id: req.id,
        lock_state: lock_state.as_str().to_string(),
    })))
}
