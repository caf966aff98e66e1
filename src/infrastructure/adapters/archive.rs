//! Archive Expander 适配器
//!
//! zip 展开依赖外部解包服务。未接入该服务的部署使用
//! `DisabledArchiveExpander`，对任何压缩包返回 Unsupported。

use async_trait::async_trait;

use crate::application::ports::{ArchiveEntry, ArchiveError, ArchiveExpanderPort};

/// 禁用的压缩包展开器
pub struct DisabledArchiveExpander;

impl DisabledArchiveExpander {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DisabledArchiveExpander {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveExpanderPort for DisabledArchiveExpander {
    async fn list_entries(
        &self,
        name: &str,
        _data: &[u8],
    ) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        Err(ArchiveError::Unsupported(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_reports_unsupported() {
        let expander = DisabledArchiveExpander::new();
        let result = expander.list_entries("batch.zip", &[]).await;
        assert!(matches!(result, Err(ArchiveError::Unsupported(_))));
    }
}
