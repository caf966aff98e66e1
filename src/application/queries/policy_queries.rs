//! Policy Queries - 发布策略读操作

use uuid::Uuid;

/// 获取小说发布策略查询（未设置时返回默认策略）
#[derive(Debug, Clone)]
pub struct GetReleasePolicy {
    pub novel_id: Uuid,
}
