//! Scheduling Context - 发布排期上下文
//!
//! 章节发布排期引擎：
//! - policy: 小说级发布策略（自动放出、发布日、固定价、时区偏移）
//! - pricing: 金币定价决策
//! - scheduler: 发布时间计算（间隔模式 / 发布日模式 / 同日分组）
//! - lock_state: 章节可见性/解锁状态分类

mod lock_state;
mod policy;
mod pricing;
mod scheduler;

pub use lock_state::{
    classify_lock_state, is_indefinitely_locked, LockState, INDEFINITE_LOCK_YEARS,
};
pub use policy::{PolicyError, PublishingDays, ReleasePolicy};
pub use pricing::resolve_price;
pub use scheduler::{
    max_interval_hours, offset_within_group, schedule_release, select_anchor, ScheduledRelease,
};
