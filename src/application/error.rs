//! 应用层错误定义
//!
//! 统一的命令/查询错误类型与批量导入错误分类

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{ArchiveError, ConversionError, RepositoryError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: Uuid,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 业务规则违反
    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建业务规则违反错误
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRuleViolation(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<crate::domain::scheduling::PolicyError> for ApplicationError {
    fn from(err: crate::domain::scheduling::PolicyError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

/// 批量导入错误
///
/// 每个变体都携带定位出错文件/条目的信息。批量导入遇到首个错误即
/// 中止剩余条目，此前已持久化的章节保留（不回滚）。
#[derive(Debug, Error)]
pub enum ImportError {
    /// 内容与文件名均无法解析出章节号
    #[error("cannot derive a chapter number from content or filename: {file}")]
    UnresolvableChapterNumber { file: String },

    /// (章节号, 分部号) 已存在
    #[error("chapter number already exists for this novel: {file} (chapter {key})")]
    DuplicateChapterNumber {
        file: String,
        key: crate::domain::novel::ChapterKey,
    },

    /// 同日间隔小时数超过每日章数允许的上限（进入排期前拒绝）
    #[error(
        "interval_hours {interval_hours} exceeds the maximum {max_allowed} for chapters_per_day {chapters_per_day}"
    )]
    InvalidIntervalConfiguration {
        chapters_per_day: u32,
        interval_hours: u32,
        max_allowed: u32,
    },

    /// 底层存储错误，原样上抛
    #[error("persistence failure on {file}: {source}")]
    Persistence {
        file: String,
        #[source]
        source: RepositoryError,
    },

    /// 文档转换失败
    #[error("document conversion failed for {file}: {source}")]
    Conversion {
        file: String,
        #[source]
        source: ConversionError,
    },

    /// 压缩包展开失败
    #[error("archive expansion failed for {file}: {source}")]
    Archive {
        file: String,
        #[source]
        source: ArchiveError,
    },
}

impl ImportError {
    /// 出错文件名（用于调用方上报）
    pub fn file(&self) -> Option<&str> {
        match self {
            ImportError::UnresolvableChapterNumber { file }
            | ImportError::DuplicateChapterNumber { file, .. }
            | ImportError::Persistence { file, .. }
            | ImportError::Conversion { file, .. }
            | ImportError::Archive { file, .. } => Some(file),
            ImportError::InvalidIntervalConfiguration { .. } => None,
        }
    }
}
