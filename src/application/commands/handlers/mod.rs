//! Command Handlers - 命令处理器

mod chapter_handlers;
mod import_handlers;
mod policy_handlers;

pub use chapter_handlers::{
    CreateChapterHandler, CreateChapterResponse, DeleteChapterHandler, UpdateChapterHandler,
};
pub use import_handlers::{BulkImportHandler, BulkImportReport};
pub use policy_handlers::SetReleasePolicyHandler;
