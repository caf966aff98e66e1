//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::novel::AgeRating;
use crate::domain::scheduling::ReleasePolicy;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Chapter Repository
// ============================================================================

/// 章节实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub id: Uuid,
    pub novel_id: Uuid,
    /// 负数为草稿标记，绝对值为展示编号
    pub chapter_number: i32,
    /// None 无分部；-1 为番外哨兵
    pub part_number: Option<i32>,
    pub title: String,
    pub content: String,
    pub author_thoughts: Option<String>,
    /// None 表示从未排期（草稿）
    pub publish_at: Option<DateTime<Utc>>,
    pub coins: u32,
    pub volume_id: Option<Uuid>,
    pub age_rating: AgeRating,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 提前章投影（锚点计算用）：发布时间在未来且金币 > 0 的章节
#[derive(Debug, Clone, Copy)]
pub struct AdvancedChapterRecord {
    pub id: Uuid,
    pub publish_at: DateTime<Utc>,
    pub coins: u32,
}

/// Chapter Repository Port
#[async_trait]
pub trait ChapterRepositoryPort: Send + Sync {
    /// 新建章节
    async fn create(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    /// 更新章节
    async fn update(&self, chapter: &ChapterRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找章节
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 小说的全部章节（按章节号、分部号排序）
    async fn find_by_novel(&self, novel_id: Uuid) -> Result<Vec<ChapterRecord>, RepositoryError>;

    /// 按业务键查找（分部缺失按 0 匹配）
    async fn find_by_key(
        &self,
        novel_id: Uuid,
        chapter_number: i32,
        part_number: Option<i32>,
    ) -> Result<Option<ChapterRecord>, RepositoryError>;

    /// 小说的提前章集合（publish_at > now 且 coins > 0），每次调用重读当前状态
    async fn find_advanced(
        &self,
        novel_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdvancedChapterRecord>, RepositoryError>;

    /// 删除章节（硬删除，无软删除语义）
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Release Policy Repository
// ============================================================================

/// Release Policy Repository Port
///
/// 策略本身是纯值对象（domain::scheduling::ReleasePolicy），
/// 每部小说至多一份。
#[async_trait]
pub trait ReleasePolicyRepositoryPort: Send + Sync {
    /// 小说的发布策略，未配置时为 None（调用方回退默认值）
    async fn find_by_novel(&self, novel_id: Uuid)
        -> Result<Option<ReleasePolicy>, RepositoryError>;

    /// 保存（插入或整体覆盖）
    async fn save(&self, novel_id: Uuid, policy: &ReleasePolicy) -> Result<(), RepositoryError>;
}
