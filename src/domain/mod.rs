//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Manuscript Context: 书稿解析与批量排序
//! - Scheduling Context: 发布排期、定价、锁定状态
//! - Novel Context: 章节标识（草稿标记、分部编号、年龄分级）

pub mod manuscript;
pub mod novel;
pub mod scheduling;

pub use manuscript::{order_batch, parse_manuscript, ManuscriptEntry};
pub use scheduling::{
    classify_lock_state, resolve_price, schedule_release, LockState, PublishingDays,
    ReleasePolicy, ScheduledRelease,
};
