//! Policy Commands - 发布策略写操作

use uuid::Uuid;

use crate::domain::scheduling::ReleasePolicy;

/// 设置小说发布策略命令（整体覆盖）
#[derive(Debug, Clone)]
pub struct SetReleasePolicy {
    pub novel_id: Uuid,
    pub policy: ReleasePolicy,
}
