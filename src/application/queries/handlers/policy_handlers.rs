//! Policy Query Handlers - 发布策略读侧

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ReleasePolicyRepositoryPort;
use crate::application::queries::GetReleasePolicy;
use crate::domain::scheduling::ReleasePolicy;

/// GetReleasePolicy Handler
pub struct GetReleasePolicyHandler {
    policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
}

impl GetReleasePolicyHandler {
    pub fn new(policy_repo: Arc<dyn ReleasePolicyRepositoryPort>) -> Self {
        Self { policy_repo }
    }

    pub async fn handle(
        &self,
        query: GetReleasePolicy,
    ) -> Result<ReleasePolicy, ApplicationError> {
        // 从未设置过策略的小说返回默认策略
        Ok(self
            .policy_repo
            .find_by_novel(query.novel_id)
            .await?
            .unwrap_or_default())
    }
}
