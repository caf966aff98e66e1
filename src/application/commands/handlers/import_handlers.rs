//! Bulk Import Handler - 批量导入流水线
//!
//! 解析 → 排序 → 逐条（定价 + 排期 + 持久化）的严格串行折叠。
//! 每条的锚点依赖前一条已提交的结果，因此不做并行扇出；遇到首个
//! 错误即中止剩余条目，已持久化的章节保留（无批次事务语义）。

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::RunBulkImport;
use crate::application::error::{ApplicationError, ImportError};
use crate::application::ports::{
    detect_format, is_archive, ArchiveExpanderPort, ChapterRecord, ChapterRepositoryPort,
    DocumentConverterPort, ReleasePolicyRepositoryPort,
};
use crate::domain::manuscript::{order_batch, parse_manuscript, ManuscriptEntry};
use crate::domain::novel::ChapterKey;
use crate::domain::scheduling::{
    max_interval_hours, offset_within_group, resolve_price, schedule_release, ReleasePolicy,
};

/// 批量导入结果
///
/// `first_error` 非空时 `succeeded` 为中止前已成功导入的章数。
#[derive(Debug)]
pub struct BulkImportReport {
    pub succeeded: usize,
    pub first_error: Option<ImportError>,
}

impl BulkImportReport {
    fn aborted(succeeded: usize, error: ImportError) -> Self {
        Self {
            succeeded,
            first_error: Some(error),
        }
    }

    fn completed(succeeded: usize) -> Self {
        Self {
            succeeded,
            first_error: None,
        }
    }
}

/// 日组游标：在折叠中显式传递的排期状态
///
/// `started` 为已开启的日组数（用于显式批量日期的逐日平移），
/// `base` 为当前组基准时间，组内章节仅按小时平移。
#[derive(Debug, Clone, Copy)]
struct GroupCursor {
    base: DateTime<Utc>,
    auto_scheduled: bool,
    position: u32,
    started: i64,
}

/// RunBulkImport Handler
pub struct BulkImportHandler {
    chapter_repo: Arc<dyn ChapterRepositoryPort>,
    policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
    converter: Arc<dyn DocumentConverterPort>,
    archive: Arc<dyn ArchiveExpanderPort>,
}

impl BulkImportHandler {
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
        converter: Arc<dyn DocumentConverterPort>,
        archive: Arc<dyn ArchiveExpanderPort>,
    ) -> Self {
        Self {
            chapter_repo,
            policy_repo,
            converter,
            archive,
        }
    }

    pub async fn handle(
        &self,
        command: RunBulkImport,
    ) -> Result<BulkImportReport, ApplicationError> {
        let chapters_per_day = command.options.chapters_per_day.max(1);
        let max_allowed = max_interval_hours(chapters_per_day);

        // 间隔配置在任何排期发生前校验
        if command.options.interval_hours > max_allowed {
            return Ok(BulkImportReport::aborted(
                0,
                ImportError::InvalidIntervalConfiguration {
                    chapters_per_day,
                    interval_hours: command.options.interval_hours,
                    max_allowed,
                },
            ));
        }

        // 展开压缩包 + 转纯文本 + 解析（此阶段尚无任何持久化）
        let entries = match self.collect_entries(&command).await {
            Ok(entries) => entries,
            Err(error) => return Ok(BulkImportReport::aborted(0, error)),
        };
        let ordered = order_batch(entries);

        let policy = self
            .policy_repo
            .find_by_novel(command.novel_id)
            .await?
            .unwrap_or_default();
        // 显式批量日期仅在自动放出关闭时生效
        let explicit_base = command
            .options
            .publish_at
            .filter(|_| !policy.auto_release_enabled);

        let mut cursor: Option<GroupCursor> = None;
        let mut succeeded = 0usize;

        for entry in ordered {
            match self
                .import_entry(
                    &command,
                    &policy,
                    entry,
                    cursor,
                    chapters_per_day,
                    explicit_base,
                )
                .await
            {
                Ok(next_cursor) => {
                    cursor = Some(next_cursor);
                    succeeded += 1;
                }
                Err(error) => {
                    tracing::warn!(
                        novel_id = %command.novel_id,
                        succeeded = succeeded,
                        error = %error,
                        "Bulk import aborted"
                    );
                    return Ok(BulkImportReport::aborted(succeeded, error));
                }
            }
        }

        tracing::info!(
            novel_id = %command.novel_id,
            succeeded = succeeded,
            "Bulk import completed"
        );

        Ok(BulkImportReport::completed(succeeded))
    }

    /// 展开并解析整批文件
    async fn collect_entries(
        &self,
        command: &RunBulkImport,
    ) -> Result<Vec<ManuscriptEntry>, ImportError> {
        let mut entries = Vec::new();

        for file in &command.files {
            if is_archive(&file.name) {
                let inner = self
                    .archive
                    .list_entries(&file.name, &file.data)
                    .await
                    .map_err(|source| ImportError::Archive {
                        file: file.name.clone(),
                        source,
                    })?;
                for inner_file in inner {
                    // 压缩包内只接受支持的书稿扩展名
                    if detect_format(&inner_file.name).is_some() {
                        entries
                            .push(self.to_entry(&inner_file.name, &inner_file.data).await?);
                    }
                }
            } else {
                entries.push(self.to_entry(&file.name, &file.data).await?);
            }
        }

        Ok(entries)
    }

    async fn to_entry(&self, name: &str, data: &[u8]) -> Result<ManuscriptEntry, ImportError> {
        let text = self
            .converter
            .extract_plain_text(name, data)
            .await
            .map_err(|source| ImportError::Conversion {
                file: name.to_string(),
                source,
            })?;
        Ok(parse_manuscript(name, &text))
    }

    /// 导入单条：编号校验 → 冲突检测 → 排期 → 定价 → 持久化
    async fn import_entry(
        &self,
        command: &RunBulkImport,
        policy: &ReleasePolicy,
        entry: ManuscriptEntry,
        cursor: Option<GroupCursor>,
        chapters_per_day: u32,
        explicit_base: Option<DateTime<Utc>>,
    ) -> Result<GroupCursor, ImportError> {
        let file = entry.source_name.clone();

        let Some(number) = entry
            .parsed_chapter_number
            .and_then(|n| i32::try_from(n).ok())
        else {
            return Err(ImportError::UnresolvableChapterNumber { file });
        };
        let part = entry
            .parsed_part_number
            .and_then(|p| i32::try_from(p).ok());
        let key = ChapterKey::new(number, part);

        // 对已持久化状态做冲突检测（含本批次此前写入的章节）
        let existing = self
            .chapter_repo
            .find_by_key(command.novel_id, key.chapter, key.part)
            .await
            .map_err(|source| ImportError::Persistence {
                file: file.clone(),
                source,
            })?;
        if existing.is_some() {
            return Err(ImportError::DuplicateChapterNumber { file, key });
        }

        // 仅日组首章走完整排期；组内后续章只平移小时
        let group = match cursor {
            Some(group) if group.position < chapters_per_day => group,
            prev => {
                self.start_group(command, policy, prev, explicit_base)
                    .await
                    .map_err(|source| ImportError::Persistence {
                        file: file.clone(),
                        source,
                    })?
            }
        };

        let publish_at =
            offset_within_group(group.base, group.position, command.options.interval_hours);
        let coins = resolve_price(policy, None, group.auto_scheduled);

        let now = Utc::now();
        let record = ChapterRecord {
            id: Uuid::new_v4(),
            novel_id: command.novel_id,
            chapter_number: key.chapter,
            part_number: key.part,
            title: entry
                .parsed_title
                .unwrap_or_else(|| format!("Chapter {}", key)),
            content: entry.body,
            author_thoughts: None,
            publish_at: Some(publish_at),
            coins,
            volume_id: None,
            age_rating: Default::default(),
            created_at: now,
            updated_at: now,
        };

        self.chapter_repo
            .create(&record)
            .await
            .map_err(|source| ImportError::Persistence {
                file: file.clone(),
                source,
            })?;

        tracing::info!(
            novel_id = %command.novel_id,
            chapter = %key,
            file = %file,
            publish_at = %publish_at,
            coins = coins,
            "Chapter imported"
        );

        Ok(GroupCursor {
            position: group.position + 1,
            ..group
        })
    }

    /// 开启新日组并计算组基准时间
    async fn start_group(
        &self,
        command: &RunBulkImport,
        policy: &ReleasePolicy,
        prev: Option<GroupCursor>,
        explicit_base: Option<DateTime<Utc>>,
    ) -> Result<GroupCursor, crate::application::ports::RepositoryError> {
        let started = prev.map(|g| g.started).unwrap_or(0);
        let prev_base = prev.map(|g| g.base);
        let now = Utc::now();

        let (base, auto_scheduled) = if policy.auto_release_enabled {
            // 每次开组重读当前提前章状态；同批次内前组基准优先作锚
            let advanced: Vec<DateTime<Utc>> = self
                .chapter_repo
                .find_advanced(command.novel_id, now)
                .await?
                .iter()
                .map(|r| r.publish_at)
                .collect();
            let outcome = schedule_release(policy, &advanced, None, prev_base, now);
            (outcome.publish_at, outcome.auto_scheduled)
        } else if let Some(explicit) = explicit_base {
            // 显式批量日期：第 k 个日组 = 显式日期 + k 天
            (explicit + Duration::days(started), false)
        } else {
            // 自动放出关闭且无显式日期：立即发布
            (now, false)
        };

        Ok(GroupCursor {
            base,
            auto_scheduled,
            position: 0,
            started: started + 1,
        })
    }
}
