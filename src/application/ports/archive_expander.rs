//! Archive Expander Port - 出站端口
//!
//! 压缩包（zip）单层展开的抽象接口。展开结果按支持的书稿扩展名
//! 过滤后，每个文件作为独立书稿条目进入解析。

use async_trait::async_trait;
use thiserror::Error;

/// 展开出的单个文件
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

/// 展开错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Unsupported archive: {0}")]
    Unsupported(String),

    #[error("Unreadable archive: {0}")]
    Unreadable(String),
}

/// 文件名是否为压缩包
pub fn is_archive(name: &str) -> bool {
    name.to_lowercase().ends_with(".zip")
}

/// Archive Expander Port
#[async_trait]
pub trait ArchiveExpanderPort: Send + Sync {
    /// 单层展开压缩包，返回内部文件列表（不递归）
    async fn list_entries(
        &self,
        name: &str,
        data: &[u8],
    ) -> Result<Vec<ArchiveEntry>, ArchiveError>;
}
