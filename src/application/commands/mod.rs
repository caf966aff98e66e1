//! Commands - 写操作命令定义（CQRS 写侧）

mod chapter_commands;
mod import_commands;
mod policy_commands;

pub mod handlers;

pub use chapter_commands::{CreateChapter, DeleteChapter, UpdateChapter};
pub use import_commands::{BatchReleaseOptions, ManuscriptFile, RunBulkImport};
pub use policy_commands::SetReleasePolicy;
