//! Policy HTTP Handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{GetReleasePolicy, SetReleasePolicy};
use crate::domain::scheduling::{PublishingDays, ReleasePolicy};
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GetPolicyRequest {
    pub novel_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetPolicyRequest {
    pub novel_id: Uuid,
    pub auto_release_enabled: bool,
    pub interval_days: u32,
    #[serde(default)]
    pub fixed_price_enabled: bool,
    #[serde(default)]
    pub fixed_price_amount: u32,
    #[serde(default)]
    pub use_publishing_days: bool,
    /// 周几名称列表（全称或三字母缩写）
    #[serde(default)]
    pub publishing_days: Vec<String>,
    pub release_hour: u32,
    pub default_coins: u32,
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub novel_id: Uuid,
    pub auto_release_enabled: bool,
    pub interval_days: u32,
    pub fixed_price_enabled: bool,
    pub fixed_price_amount: u32,
    pub use_publishing_days: bool,
    pub publishing_days: Vec<&'static str>,
    pub release_hour: u32,
    pub default_coins: u32,
    pub utc_offset_minutes: i32,
}

impl PolicyResponse {
    fn from_policy(novel_id: Uuid, policy: &ReleasePolicy) -> Self {
        Self {
            novel_id,
            auto_release_enabled: policy.auto_release_enabled,
            interval_days: policy.interval_days,
            fixed_price_enabled: policy.fixed_price_enabled,
            fixed_price_amount: policy.fixed_price_amount,
            use_publishing_days: policy.use_publishing_days,
            publishing_days: policy.publishing_days.names(),
            release_hour: policy.release_hour,
            default_coins: policy.default_coins,
            utc_offset_minutes: policy.utc_offset_minutes,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// 获取发布策略
pub async fn get_policy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetPolicyRequest>,
) -> Result<Json<ApiResponse<PolicyResponse>>, ApiError> {
    let policy = state
        .get_policy_handler
        .handle(GetReleasePolicy {
            novel_id: req.novel_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(PolicyResponse::from_policy(
        req.novel_id,
        &policy,
    ))))
}

/// 设置发布策略（整体覆盖）
pub async fn set_policy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetPolicyRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let publishing_days = PublishingDays::from_names(&req.publishing_days)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let policy = ReleasePolicy {
        auto_release_enabled: req.auto_release_enabled,
        interval_days: req.interval_days,
        fixed_price_enabled: req.fixed_price_enabled,
        fixed_price_amount: req.fixed_price_amount,
        use_publishing_days: req.use_publishing_days,
        publishing_days,
        release_hour: req.release_hour,
        default_coins: req.default_coins,
        utc_offset_minutes: req.utc_offset_minutes,
    };

    state
        .set_policy_handler
        .handle(SetReleasePolicy {
            novel_id: req.novel_id,
            policy,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
