//! Import Commands - 批量导入写操作

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 待导入的单个上传文件（纯文本、docx 或 zip 压缩包）
#[derive(Debug, Clone)]
pub struct ManuscriptFile {
    pub name: String,
    pub data: Vec<u8>,
}

/// 批次级放出参数（不持久化，仅本次导入有效）
#[derive(Debug, Clone)]
pub struct BatchReleaseOptions {
    /// 每日放出章数（日组大小）
    pub chapters_per_day: u32,
    /// 同日组内章节的间隔小时数，上限 floor(24 / chapters_per_day)
    pub interval_hours: u32,
    /// 显式批量发布时间，仅自动放出关闭时使用
    pub publish_at: Option<DateTime<Utc>>,
}

impl Default for BatchReleaseOptions {
    fn default() -> Self {
        Self {
            chapters_per_day: 1,
            interval_hours: 0,
            publish_at: None,
        }
    }
}

/// 批量导入命令
#[derive(Debug, Clone)]
pub struct RunBulkImport {
    pub novel_id: Uuid,
    pub files: Vec<ManuscriptFile>,
    pub options: BatchReleaseOptions,
}
