//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、DocumentConverter、ArchiveExpander）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Chapter commands
    CreateChapter,
    DeleteChapter,
    UpdateChapter,
    // Import commands
    BatchReleaseOptions,
    ManuscriptFile,
    RunBulkImport,
    // Policy commands
    SetReleasePolicy,
    // Handlers
    handlers::{
        BulkImportHandler, BulkImportReport, CreateChapterHandler, CreateChapterResponse,
        DeleteChapterHandler, SetReleasePolicyHandler, UpdateChapterHandler,
    },
};

pub use error::{ApplicationError, ImportError};

pub use ports::{
    // Archive expander
    is_archive,
    ArchiveEntry,
    ArchiveError,
    ArchiveExpanderPort,
    // Document converter
    detect_format,
    ConversionError,
    DocumentConverterPort,
    ManuscriptFormat,
    // Repositories
    AdvancedChapterRecord,
    ChapterRecord,
    ChapterRepositoryPort,
    ReleasePolicyRepositoryPort,
    RepositoryError,
};

pub use queries::{
    // Chapter queries
    GetChapter,
    GetChapterLockState,
    ListChapters,
    // Policy queries
    GetReleasePolicy,
    // Handlers
    handlers::{
        ChapterResponse, ChapterSummaryResponse, GetChapterHandler, GetChapterLockStateHandler,
        GetReleasePolicyHandler, ListChaptersHandler,
    },
};
