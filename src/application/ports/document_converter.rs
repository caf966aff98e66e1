//! Document Converter Port - 出站端口
//!
//! 二进制书稿格式（docx 等）转纯文本的抽象接口。转换必须保留段落
//! 结构（段落之间空行分隔），转换结果直接进入书稿解析器。

use async_trait::async_trait;
use thiserror::Error;

/// 书稿文件格式（按扩展名检测）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManuscriptFormat {
    PlainText,
    Markdown,
    Docx,
}

/// 从文件名检测书稿格式
pub fn detect_format(name: &str) -> Option<ManuscriptFormat> {
    let lower = name.to_lowercase();
    if lower.ends_with(".txt") {
        Some(ManuscriptFormat::PlainText)
    } else if lower.ends_with(".md") {
        Some(ManuscriptFormat::Markdown)
    } else if lower.ends_with(".docx") {
        Some(ManuscriptFormat::Docx)
    } else {
        None
    }
}

/// 转换错误
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Unsupported manuscript format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(String),

    #[error("Conversion failed: {0}")]
    Failed(String),
}

/// Document Converter Port
#[async_trait]
pub trait DocumentConverterPort: Send + Sync {
    /// 将原始文件内容提取为纯文本
    async fn extract_plain_text(
        &self,
        name: &str,
        data: &[u8],
    ) -> Result<String, ConversionError>;
}
