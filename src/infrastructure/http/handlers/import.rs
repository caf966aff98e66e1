//! Bulk Import HTTP Handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{BatchReleaseOptions, ManuscriptFile, RunBulkImport};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 批量导入响应
///
/// 部分成功时 `succeeded` 为中止前已导入的章数，`error` 描述
/// 首个错误，`failed_file` 为出错文件名。
#[derive(Debug, Serialize)]
pub struct BulkImportResponse {
    pub succeeded: usize,
    pub error: Option<String>,
    pub failed_file: Option<String>,
}

/// 批量导入书稿（multipart）
///
/// 字段:
/// - `novel_id`          必填
/// - `file`              可重复，书稿文件或 zip 压缩包
/// - `chapters_per_day`  可选，默认 1
/// - `interval_hours`    可选，默认 0
/// - `publish_at`        可选，rfc3339，仅自动放出关闭时生效
pub async fn bulk_import(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<BulkImportResponse>>, ApiError> {
    let mut novel_id: Option<Uuid> = None;
    let mut files: Vec<ManuscriptFile> = Vec::new();
    let mut options = BatchReleaseOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "novel_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read novel_id: {}", e)))?;
                novel_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|e| ApiError::BadRequest(format!("Invalid novel_id: {}", e)))?,
                );
            }
            "file" => {
                let name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| ApiError::BadRequest("File field missing a filename".into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                files.push(ManuscriptFile {
                    name,
                    data: bytes.to_vec(),
                });
            }
            "chapters_per_day" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read chapters_per_day: {}", e))
                })?;
                options.chapters_per_day = text.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid chapters_per_day: {}", text))
                })?;
            }
            "interval_hours" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read interval_hours: {}", e))
                })?;
                options.interval_hours = text.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid interval_hours: {}", text))
                })?;
            }
            "publish_at" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read publish_at: {}", e))
                })?;
                let parsed: DateTime<Utc> = text
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid publish_at: {}", text)))?;
                options.publish_at = Some(parsed);
            }
            _ => {}
        }
    }

    let novel_id =
        novel_id.ok_or_else(|| ApiError::BadRequest("novel_id is required".to_string()))?;
    if files.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one file is required".to_string(),
        ));
    }

    tracing::info!(
        novel_id = %novel_id,
        files = files.len(),
        chapters_per_day = options.chapters_per_day,
        interval_hours = options.interval_hours,
        "Bulk import started"
    );

    let report = state
        .bulk_import_handler
        .handle(RunBulkImport {
            novel_id,
            files,
            options,
        })
        .await?;

    // 部分成功也按 errno=0 返回，错误细节在响应体内
    let (error, failed_file) = match &report.first_error {
        Some(e) => (
            Some(e.to_string()),
            e.file().map(|f| f.to_string()),
        ),
        None => (None, None),
    };

    Ok(Json(ApiResponse::success(BulkImportResponse {
        succeeded: report.succeeded,
        error,
        failed_file,
    })))
}
