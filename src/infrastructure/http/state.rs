//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    BulkImportHandler, CreateChapterHandler, DeleteChapterHandler, SetReleasePolicyHandler,
    UpdateChapterHandler,
    // Query handlers
    GetChapterHandler, GetChapterLockStateHandler, GetReleasePolicyHandler, ListChaptersHandler,
    // Ports
    ArchiveExpanderPort, ChapterRepositoryPort, DocumentConverterPort,
    ReleasePolicyRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub chapter_repo: Arc<dyn ChapterRepositoryPort>,
    pub policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
    pub converter: Arc<dyn DocumentConverterPort>,
    pub archive: Arc<dyn ArchiveExpanderPort>,

    // ========== Command Handlers ==========
    pub create_chapter_handler: CreateChapterHandler,
    pub update_chapter_handler: UpdateChapterHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub bulk_import_handler: BulkImportHandler,
    pub set_policy_handler: SetReleasePolicyHandler,

    // ========== Query Handlers ==========
    pub get_chapter_handler: GetChapterHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub get_lock_state_handler: GetChapterLockStateHandler,
    pub get_policy_handler: GetReleasePolicyHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        chapter_repo: Arc<dyn ChapterRepositoryPort>,
        policy_repo: Arc<dyn ReleasePolicyRepositoryPort>,
        converter: Arc<dyn DocumentConverterPort>,
        archive: Arc<dyn ArchiveExpanderPort>,
    ) -> Self {
        Self {
            // Ports
            chapter_repo: chapter_repo.clone(),
            policy_repo: policy_repo.clone(),
            converter: converter.clone(),
            archive: archive.clone(),

            // Command handlers
            create_chapter_handler: CreateChapterHandler::new(
                chapter_repo.clone(),
                policy_repo.clone(),
            ),
            update_chapter_handler: UpdateChapterHandler::new(
                chapter_repo.clone(),
                policy_repo.clone(),
            ),
            delete_chapter_handler: DeleteChapterHandler::new(chapter_repo.clone()),
            bulk_import_handler: BulkImportHandler::new(
                chapter_repo.clone(),
                policy_repo.clone(),
                converter.clone(),
                archive.clone(),
            ),
            set_policy_handler: SetReleasePolicyHandler::new(policy_repo.clone()),

            // Query handlers
            get_chapter_handler: GetChapterHandler::new(chapter_repo.clone()),
            list_chapters_handler: ListChaptersHandler::new(chapter_repo.clone()),
            get_lock_state_handler: GetChapterLockStateHandler::new(chapter_repo.clone()),
            get_policy_handler: GetReleasePolicyHandler::new(policy_repo.clone()),
        }
    }
}
