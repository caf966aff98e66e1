//! Policy Command Handlers - 发布策略写操作

use std::sync::Arc;

use crate::application::commands::SetReleasePolicy;
use crate::application::error::ApplicationError;
use crate::application::ports::ReleasePolicyRepositoryPort;

/// SetReleasePolicy Handler
pub struct SetReleasePolicyHandler {
    policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
}

impl SetReleasePolicyHandler {
    pub fn new(policy_repo: Arc<dyn ReleasePolicyRepositoryPort>) -> Self {
        Self { policy_repo }
    }

    pub async fn handle(&self, command: SetReleasePolicy) -> Result<(), ApplicationError> {
        // 入库前整体校验，非法策略不落盘
        command.policy.validate()?;

        self.policy_repo
            .save(command.novel_id, &command.policy)
            .await?;

        tracing::info!(
            novel_id = %command.novel_id,
            auto_release = command.policy.auto_release_enabled,
            interval_days = command.policy.interval_days,
            release_hour = command.policy.release_hour,
            "Release policy saved"
        );

        Ok(())
    }
}
