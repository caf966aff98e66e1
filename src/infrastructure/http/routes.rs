//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                GET   健康检查
//! - /api/chapter/create      POST  创建章节（排期 + 定价）
//! - /api/chapter/update      POST  更新章节（可选重排期）
//! - /api/chapter/delete      POST  删除章节
//! - /api/chapter/get         POST  获取章节详情
//! - /api/chapter/list        POST  列出小说章节（含锁定状态）
//! - /api/chapter/lock_state  POST  获取章节锁定状态
//! - /api/policy/get          POST  获取发布策略
//! - /api/policy/set          POST  设置发布策略
//! - /api/import/bulk         POST  批量导入书稿（multipart）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/chapter", chapter_routes())
        .nest("/policy", policy_routes())
        .nest("/import", import_routes())
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_chapter))
        .route("/update", post(handlers::update_chapter))
        .route("/delete", post(handlers::delete_chapter))
        .route("/get", post(handlers::get_chapter))
        .route("/list", post(handlers::list_chapters))
        .route("/lock_state", post(handlers::get_lock_state))
}

/// Policy 路由
fn policy_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get", post(handlers::get_policy))
        .route("/set", post(handlers::set_policy))
}

/// Import 路由
fn import_routes() -> Router<Arc<AppState>> {
    Router::new().route("/bulk", post(handlers::bulk_import))
}
