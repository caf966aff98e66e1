//! Queries - 读操作查询定义（CQRS 读侧）

mod chapter_queries;
mod policy_queries;

pub mod handlers;

pub use chapter_queries::{GetChapter, GetChapterLockState, ListChapters};
pub use policy_queries::GetReleasePolicy;
