//! Chapter Queries - 章节读操作

use uuid::Uuid;

/// 获取章节详情查询
#[derive(Debug, Clone)]
pub struct GetChapter {
    pub chapter_id: Uuid,
}

/// 列出小说全部章节查询（含草稿）
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub novel_id: Uuid,
}

/// 获取章节锁定状态查询
#[derive(Debug, Clone)]
pub struct GetChapterLockState {
    pub chapter_id: Uuid,
}
