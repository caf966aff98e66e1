//! Plain Text Converter - 文本书稿转换适配器
//!
//! 内置适配器只处理文本型书稿（txt/md）。docx 的抽取依赖外部转换
//! 服务，不在本进程内实现，遇到时返回 UnsupportedFormat。

use async_trait::async_trait;

use crate::application::ports::{
    detect_format, ConversionError, DocumentConverterPort, ManuscriptFormat,
};

/// 文本书稿转换器
pub struct PlainTextConverter;

impl PlainTextConverter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentConverterPort for PlainTextConverter {
    async fn extract_plain_text(
        &self,
        name: &str,
        data: &[u8],
    ) -> Result<String, ConversionError> {
        match detect_format(name) {
            Some(ManuscriptFormat::PlainText) | Some(ManuscriptFormat::Markdown) => {
                let text = std::str::from_utf8(data)
                    .map_err(|e| ConversionError::InvalidEncoding(format!("{name}: {e}")))?;
                // 去除 BOM，统一换行
                Ok(text.trim_start_matches('\u{feff}').replace("\r\n", "\n"))
            }
            Some(ManuscriptFormat::Docx) | None => {
                Err(ConversionError::UnsupportedFormat(name.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn converts_utf8_text() {
        let converter = PlainTextConverter::new();
        let text = converter
            .extract_plain_text("ch1.txt", "Chapter 1\r\nBody.".as_bytes())
            .await
            .unwrap();
        assert_eq!(text, "Chapter 1\nBody.");
    }

    #[tokio::test]
    async fn strips_bom() {
        let converter = PlainTextConverter::new();
        let text = converter
            .extract_plain_text("ch1.md", "\u{feff}Chapter 1".as_bytes())
            .await
            .unwrap();
        assert_eq!(text, "Chapter 1");
    }

    #[tokio::test]
    async fn rejects_invalid_utf8() {
        let converter = PlainTextConverter::new();
        let result = converter
            .extract_plain_text("ch1.txt", &[0xff, 0xfe, 0x00])
            .await;
        assert!(matches!(result, Err(ConversionError::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn rejects_docx_without_external_service() {
        let converter = PlainTextConverter::new();
        let result = converter.extract_plain_text("ch1.docx", &[]).await;
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat(_))));
    }
}
