//! Chapter Command Handlers - 单章创建/更新/删除
//!
//! 单章路径与批量导入共享同一套领域逻辑：排期（scheduler）、
//! 定价（pricing）、章节键唯一性校验。

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateChapter, DeleteChapter, UpdateChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{ChapterRecord, ChapterRepositoryPort, ReleasePolicyRepositoryPort};
use crate::domain::novel::ChapterKey;
use crate::domain::scheduling::{resolve_price, schedule_release};

// ============================================================================
// CreateChapter
// ============================================================================

/// 创建章节响应
#[derive(Debug, Clone)]
pub struct CreateChapterResponse {
    pub id: Uuid,
    pub publish_at: Option<DateTime<Utc>>,
    pub coins: u32,
}

/// CreateChapter Handler
pub struct CreateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
}

impl CreateChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            policy_repo,
        }
    }

    pub async fn handle(
        &self,
        command: CreateChapter,
    ) -> Result<CreateChapterResponse, ApplicationError> {
        let key = ChapterKey::new(command.chapter_number, command.part_number);
        let now = Utc::now();

        // 非草稿章节校验 (章节号, 分部号) 唯一；草稿不与已发布章冲突
        if !key.is_draft() {
            let existing = self
                .chapter_repo
                .find_by_key(command.novel_id, key.chapter, key.part)
                .await?;
            if existing.is_some() {
                return Err(ApplicationError::business_rule(format!(
                    "chapter {} already exists for this novel",
                    key
                )));
            }
        }

        let policy = self
            .policy_repo
            .find_by_novel(command.novel_id)
            .await?
            .unwrap_or_default();

        // 草稿不排期；其余走排期 + 定价
        let (publish_at, coins) = if key.is_draft() {
            (None, resolve_price(&policy, command.coins_override, false))
        } else {
            let advanced: Vec<DateTime<Utc>> = self
                .chapter_repo
                .find_advanced(command.novel_id, now)
                .await?
                .iter()
                .map(|r| r.publish_at)
                .collect();
            let outcome = schedule_release(&policy, &advanced, command.publish_at, None, now);
            let coins = resolve_price(&policy, command.coins_override, outcome.auto_scheduled);
            (Some(outcome.publish_at), coins)
        };

        let record = ChapterRecord {
            id: Uuid::new_v4(),
            novel_id: command.novel_id,
            chapter_number: command.chapter_number,
            part_number: command.part_number,
            title: command.title,
            content: command.content,
            author_thoughts: command.author_thoughts,
            publish_at,
            coins,
            volume_id: command.volume_id,
            age_rating: command.age_rating,
            created_at: now,
            updated_at: now,
        };

        self.chapter_repo.create(&record).await?;

        tracing::info!(
            novel_id = %record.novel_id,
            chapter_id = %record.id,
            chapter = %key,
            publish_at = ?record.publish_at,
            coins = record.coins,
            "Chapter created"
        );

        Ok(CreateChapterResponse {
            id: record.id,
            publish_at: record.publish_at,
            coins: record.coins,
        })
    }
}

// ============================================================================
// UpdateChapter
// ============================================================================

/// UpdateChapter Handler
pub struct UpdateChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
}

impl UpdateChapterHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
    ) -> Self {
        Self {
            chapter_repo,
            policy_repo,
        }
    }

    pub async fn handle(&self, command: UpdateChapter) -> Result<(), ApplicationError> {
        let mut record = self
            .chapter_repo
            .find_by_id(command.chapter_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        let now = Utc::now();

        if let Some(title) = command.title {
            record.title = title;
        }
        if let Some(content) = command.content {
            record.content = content;
        }
        if let Some(thoughts) = command.author_thoughts {
            record.author_thoughts = Some(thoughts);
        }

        if command.reschedule || command.publish_at.is_some() {
            let policy = self
                .policy_repo
                .find_by_novel(record.novel_id)
                .await?
                .unwrap_or_default();
            // 重排期时自身不作为锚点
            let advanced: Vec<DateTime<Utc>> = self
                .chapter_repo
                .find_advanced(record.novel_id, now)
                .await?
                .iter()
                .filter(|r| r.id != record.id)
                .map(|r| r.publish_at)
                .collect();
            let outcome = schedule_release(&policy, &advanced, command.publish_at, None, now);
            record.publish_at = Some(outcome.publish_at);
            record.coins = resolve_price(&policy, command.coins_override, outcome.auto_scheduled);
        } else if let Some(coins) = command.coins_override {
            let policy = self
                .policy_repo
                .find_by_novel(record.novel_id)
                .await?
                .unwrap_or_default();
            // 未重排期的纯定价修改：仍处于未来排期中的章节必须非免费
            let still_scheduled = record
                .publish_at
                .map(|at| at > now && record.coins > 0)
                .unwrap_or(false);
            record.coins = resolve_price(&policy, Some(coins), still_scheduled);
        }

        record.updated_at = now;
        self.chapter_repo.update(&record).await?;

        tracing::info!(
            chapter_id = %record.id,
            publish_at = ?record.publish_at,
            coins = record.coins,
            "Chapter updated"
        );

        Ok(())
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
}

impl DeleteChapterHandler {
    pub fn new(chapter_repo: Arc<dyn ChapterRepositoryPort>) -> Self {
        Self { chapter_repo }
    }

    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let record = self
            .chapter_repo
            .find_by_id(command.chapter_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Chapter", command.chapter_id))?;

        self.chapter_repo.delete(record.id).await?;

        tracing::info!(
            chapter_id = %record.id,
            novel_id = %record.novel_id,
            "Chapter deleted"
        );

        Ok(())
    }
}
