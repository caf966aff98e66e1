//! Chapter Query Handlers - 章节读侧

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ChapterRepositoryPort};
use crate::application::queries::{GetChapter, GetChapterLockState, ListChapters};
use crate::domain::novel::ChapterKey;
use crate::domain::scheduling::{classify_lock_state, LockState};

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节详情响应
#[derive(Debug, Clone)]
pub struct ChapterResponse {
    pub id: Uuid,
    pub novel_id: Uuid,
    /// 展示编号（草稿取绝对值）
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

impl From<ChapterRecord> for ChapterResponse {
    fn from(record: ChapterRecord) -> Self {
        let key = ChapterKey::new(record.chapter_number, record.part_number);
        let lock_state = classify_lock_state(record.publish_at, record.coins, Utc::now());
        Self {
            id: record.id,
            novel_id: record.novel_id,
            chapter_number: key.display_number(),
            part_number: key.part,
            is_draft: key.is_draft(),
            title: record.title,
            content: record.content,
            author_thoughts: record.author_thoughts,
            publish_at: record.publish_at.map(|at| at.to_rfc3339()),
            coins: record.coins,
            lock_state: lock_state.as_str().to_string(),
            volume_id: record.volume_id,
            age_rating: record.age_rating.as_str().to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// 章节列表项响应（不含正文）
#[derive(Debug, Clone)]
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

impl From<ChapterRecord> for ChapterSummaryResponse {
    fn from(record: ChapterRecord) -> Self {
        let key = ChapterKey::new(record.chapter_number, record.part_number);
        let lock_state = classify_lock_state(record.publish_at, record.coins, Utc::now());
        Self {
            id: record.id,
            chapter_number: key.display_number(),
            part_number: key.part,
            is_draft: key.is_draft(),
            title: record.title,
            publish_at: record.publish_at.map(|at| at.to_rfc3339()),
            coins: record.coins,
            lock_state: lock_state.as_str().to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetChapter Handler
pub struct GetChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterResponse, ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_id(query.chapter_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.chapter_id))?;

        Ok(ChapterResponse::from(chapter))
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl ListChaptersHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(
        &self,
        query: ListChapters,
    ) -> Result<Vec<ChapterSummaryResponse>, ApplicationError> {
        let mut chapters = self.chapter_repo.find_by_novel(query.novel_id).await?;
        // 草稿排在末尾，其余按 (章节号, 分部号) 升序
        chapters.sort_by_key(|c| {
            let key = ChapterKey::new(c.chapter_number, c.part_number);
            (
                key.is_draft(),
                key.display_number(),
                key.part.unwrap_or(0),
            )
        });

        Ok(chapters
            .into_iter()
            .map(ChapterSummaryResponse::from)
            .collect())
    }
}

/// GetChapterLockState Handler
pub struct GetChapterLockStateHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl GetChapterLockStateHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(
        &self,
        query: GetChapterLockState,
    ) -> Result<LockState, ApplicationError> {
        let chapter = self
            .chapter_repo
            .find_by_id(query.chapter_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", query.chapter_id))?;

        Ok(classify_lock_state(
            chapter.publish_at,
            chapter.coins,
            Utc::now(),
        ))
    }
}
