//! Chapter Commands - 单章写操作

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::novel::AgeRating;

/// 创建章节命令（单章编辑器路径）
#[derive(Debug, Clone)]
pub struct CreateChapter {
    pub novel_id: Uuid,
    pub chapter_number: i32,
    pub part_number: Option<i32>,
    pub title: String,
    pub content: String,
    pub author_thoughts: Option<String>,
    /// 章节显式金币覆盖（固定价策略下被无视）
    pub coins_override: Option<u32>,
    /// 作者显式选择的发布时间，自动放出不会覆盖它
    pub publish_at: Option<DateTime<Utc>>,
    pub volume_id: Option<Uuid>,
    pub age_rating: AgeRating,
}

/// 更新章节命令
///
/// 字段为 None 表示保持原值；`reschedule` 为 true 时重新走排期与
/// 定价（显式 `publish_at` 依旧优先）。
#[derive(Debug, Clone)]
pub struct UpdateChapter {
    pub chapter_id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_thoughts: Option<String>,
    pub coins_override: Option<u32>,
    pub publish_at: Option<DateTime<Utc>>,
    pub reschedule: bool,
}

/// 删除章节命令（硬删除）
#[derive(Debug, Clone)]
pub struct DeleteChapter {
    pub chapter_id: Uuid,
}
