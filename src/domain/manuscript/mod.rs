//! Manuscript Context - 书稿解析上下文
//!
//! 将上传的书稿文件解析为章节候选（章节号、分部号、标题、正文），
//! 并对整批书稿做严格排序，供批量导入流水线使用。

mod entry;
mod orderer;
mod parser;

pub use entry::ManuscriptEntry;
pub use orderer::order_batch;
pub use parser::parse_manuscript;
