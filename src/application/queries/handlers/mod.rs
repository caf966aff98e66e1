//! Query Handlers - 查询处理器

mod chapter_handlers;
mod policy_handlers;

pub use chapter_handlers::{
    ChapterResponse, ChapterSummaryResponse, GetChapterHandler, GetChapterLockStateHandler,
    ListChaptersHandler,
};
pub use policy_handlers::GetReleasePolicyHandler;
