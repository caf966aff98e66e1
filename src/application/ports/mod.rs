//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod archive_expander;
mod document_converter;
mod repositories;

pub use archive_expander::{is_archive, ArchiveEntry, ArchiveError, ArchiveExpanderPort};
pub use document_converter::{
    detect_format, ConversionError, DocumentConverterPort, ManuscriptFormat,
};
pub use repositories::{
    AdvancedChapterRecord, ChapterRecord, ChapterRepositoryPort, ReleasePolicyRepositoryPort,
    RepositoryError,
};
