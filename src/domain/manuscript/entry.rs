//! Manuscript Context - 书稿条目

/// 单个书稿文件的解析结果
///
/// 不变量:
/// - 仅为解析中间态，不直接持久化
/// - `body` 为段落连接后的正文（段落之间空行分隔）
/// - 数字字段缺失时由流水线后续阶段报错，解析本身不失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManuscriptEntry {
    /// 来源文件名（含扩展名）
    pub source_name: String,
    /// 原始文本（未过滤）
    pub raw_text: String,
    /// 解析出的章节号
    pub parsed_chapter_number: Option<u32>,
    /// 解析出的分部号
    pub parsed_part_number: Option<u32>,
    /// 解析出的标题
    pub parsed_title: Option<String>,
    /// 正文（段落连接）
    pub body: String,
}

impl ManuscriptEntry {
    /// 章节号是否可解析（不可解析的条目会使批量导入中止）
    pub fn has_chapter_number(&self) -> bool {
        self.parsed_chapter_number.is_some()
    }
}
