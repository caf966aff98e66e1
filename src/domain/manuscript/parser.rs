//! Manuscript Context - 书稿解析器
//!
//! 分层启发式解析，按固定顺序尝试，首个命中即生效:
//! 1. 正文首个非空行的章节头（`Chapter N`、`Ch. N.M`、`Chapter N Part M`，可带标题）
//! 2. 文件名中的章节模式（`chapter 3 - title.txt`）
//! 3. 文件名中的裸编号（`10 - title.txt`、`10_title.md`）
//! 4. 全部失败时数字字段缺失，由导入流水线报错
//!
//! 每个匹配器相互独立、单独可测，返回 Option，由 `parse_manuscript` 级联。

use std::sync::LazyLock;

use regex::Regex;

use super::ManuscriptEntry;

/// 支持的书稿扩展名（压缩包展开后按此过滤）
pub const MANUSCRIPT_EXTENSIONS: &[&str] = &["txt", "md", "docx"];

/// 正文章节头: `chapter|ch. N` + 可选分部（`.M` / `-M` / `part M` 等价）+ 可选标题（冒号/破折号后）
static RE_CONTENT_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:chapter|ch\.?)\s*(\d+)(?:\s*[.\-]\s*(\d+)\b|\s+part\s+(\d+)\b)?(?:\s*[:\-–—]\s*(\S.*?))?\s*$",
    )
    .unwrap()
});

/// 文件名章节模式（作用于去扩展名后的文件名）
static RE_FILENAME_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:chapter|ch)\.?\s*(\d+)(?:\s*[.\-]\s*(\d+)\b)?(?:\s*(?:[-_:]|\s)\s*(\S.*?))?\s*$",
    )
    .unwrap()
});

/// 文件名裸编号模式: `10 - title`、`10_title`、`103`
static RE_FILENAME_ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)(?:\s*(?:[-_.]|\s)\s*(\S.*?))?\s*$").unwrap()
});

/// 单个匹配器的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedHeading {
    pub chapter: u32,
    pub part: Option<u32>,
    pub title: Option<String>,
}

/// 解析单个书稿文件
///
/// 永不失败：无法解析出章节号时数字字段为 None，
/// 由批量导入流水线判定为 `UnresolvableChapterNumber`。
pub fn parse_manuscript(source_name: &str, raw_text: &str) -> ManuscriptEntry {
    let lines = significant_lines(raw_text);

    // 规则 1: 正文首行章节头，命中则剥离首行，剩余行做段落连接
    if let Some((first, rest)) = lines.split_first() {
        if let Some(heading) = match_content_heading(first) {
            return ManuscriptEntry {
                source_name: source_name.to_string(),
                raw_text: raw_text.to_string(),
                parsed_chapter_number: Some(heading.chapter),
                parsed_part_number: heading.part,
                parsed_title: heading.title,
                body: rest.join("\n\n"),
            };
        }
    }

    // 规则 2/3: 文件名启发式，正文整体保留（无章节头可剥离）
    let body = lines.join("\n\n");
    let stem = file_stem(source_name);
    let heading = match_filename_heading(stem).or_else(|| match_filename_ordinal(stem));

    match heading {
        Some(heading) => ManuscriptEntry {
            source_name: source_name.to_string(),
            raw_text: raw_text.to_string(),
            parsed_chapter_number: Some(heading.chapter),
            parsed_part_number: heading.part,
            parsed_title: heading.title,
            body,
        },
        // 规则 4: 不可解析
        None => ManuscriptEntry {
            source_name: source_name.to_string(),
            raw_text: raw_text.to_string(),
            parsed_chapter_number: None,
            parsed_part_number: None,
            parsed_title: None,
            body,
        },
    }
}

/// 匹配器 1: 正文章节头行
pub(crate) fn match_content_heading(line: &str) -> Option<ParsedHeading> {
    let caps = RE_CONTENT_HEADING.captures(line)?;
    let chapter = caps.get(1)?.as_str().parse().ok()?;
    // 小数分部（`.M`/`-M`）与 `part M` 写法等价，取先命中的捕获组
    let part = caps
        .get(2)
        .or_else(|| caps.get(3))
        .and_then(|m| m.as_str().parse().ok());
    Some(ParsedHeading {
        chapter,
        part,
        title: caps.get(4).map(|m| m.as_str().trim().to_string()).filter(|t| !t.is_empty()),
    })
}

/// 匹配器 2: 文件名章节模式（输入为去扩展名的文件名）
pub(crate) fn match_filename_heading(stem: &str) -> Option<ParsedHeading> {
    let caps = RE_FILENAME_HEADING.captures(stem)?;
    let chapter = caps.get(1)?.as_str().parse().ok()?;
    Some(ParsedHeading {
        chapter,
        part: caps.get(2).and_then(|m| m.as_str().parse().ok()),
        title: caps.get(3).map(|m| m.as_str().trim().to_string()).filter(|t| !t.is_empty()),
    })
}

/// 匹配器 3: 文件名裸编号
pub(crate) fn match_filename_ordinal(stem: &str) -> Option<ParsedHeading> {
    let caps = RE_FILENAME_ORDINAL.captures(stem)?;
    let chapter = caps.get(1)?.as_str().parse().ok()?;
    Some(ParsedHeading {
        chapter,
        part: None,
        title: caps.get(2).map(|m| m.as_str().trim().to_string()).filter(|t| !t.is_empty()),
    })
}

/// 解析前的行过滤：丢弃空行与仅含引号的行
fn significant_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_quote_only(l))
        .collect()
}

/// 行内容是否只有引号/空白（空引号行，丢弃）
fn is_quote_only(s: &str) -> bool {
    s.chars().all(|c| {
        matches!(
            c,
            '"' | '\'' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' | ' ' | '\t'
        )
    })
}

/// 去掉已知书稿扩展名（未知扩展名原样保留，避免误切 `10.5` 这类编号）
pub(crate) fn file_stem(name: &str) -> &str {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if !stem.is_empty() && MANUSCRIPT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            return stem;
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_heading_plain_chapter() {
        let h = match_content_heading("Chapter 12").unwrap();
        assert_eq!(h.chapter, 12);
        assert_eq!(h.part, None);
        assert_eq!(h.title, None);
    }

    #[test]
    fn content_heading_decimal_part() {
        let h = match_content_heading("Chapter 3.2").unwrap();
        assert_eq!(h.chapter, 3);
        assert_eq!(h.part, Some(2));
    }

    #[test]
    fn content_heading_dash_part() {
        let h = match_content_heading("chapter 3-2").unwrap();
        assert_eq!(h.chapter, 3);
        assert_eq!(h.part, Some(2));
    }

    #[test]
    fn content_heading_part_word_equivalent() {
        let decimal = match_content_heading("Chapter 7.4").unwrap();
        let word = match_content_heading("Chapter 7 Part 4").unwrap();
        assert_eq!(decimal.chapter, word.chapter);
        assert_eq!(decimal.part, word.part);
    }

    #[test]
    fn content_heading_with_title_after_colon() {
        let h = match_content_heading("Chapter 5: The Fall").unwrap();
        assert_eq!(h.chapter, 5);
        assert_eq!(h.part, None);
        assert_eq!(h.title.as_deref(), Some("The Fall"));
    }

    #[test]
    fn content_heading_dash_title_not_mistaken_for_part() {
        let h = match_content_heading("Chapter 5 - The Fall").unwrap();
        assert_eq!(h.chapter, 5);
        assert_eq!(h.part, None);
        assert_eq!(h.title.as_deref(), Some("The Fall"));
    }

    #[test]
    fn content_heading_part_and_title() {
        let h = match_content_heading("Ch. 5-2: The Fall").unwrap();
        assert_eq!(h.chapter, 5);
        assert_eq!(h.part, Some(2));
        assert_eq!(h.title.as_deref(), Some("The Fall"));
    }

    #[test]
    fn content_heading_rejects_prose() {
        assert!(match_content_heading("The chapter began quietly").is_none());
        assert!(match_content_heading("Chapter 12 The End").is_none());
    }

    #[test]
    fn filename_heading_without_separator() {
        // Scenario C: chapter10.md 无正文章节头
        let h = match_filename_heading("chapter10").unwrap();
        assert_eq!(h.chapter, 10);
        assert_eq!(h.part, None);
        assert_eq!(h.title, None);
    }

    #[test]
    fn filename_heading_with_title() {
        let h = match_filename_heading("ch 3 - the storm").unwrap();
        assert_eq!(h.chapter, 3);
        assert_eq!(h.title.as_deref(), Some("the storm"));
    }

    #[test]
    fn filename_ordinal_variants() {
        let dash = match_filename_ordinal("10 - title").unwrap();
        assert_eq!(dash.chapter, 10);
        assert_eq!(dash.title.as_deref(), Some("title"));

        let underscore = match_filename_ordinal("10_title").unwrap();
        assert_eq!(underscore.chapter, 10);
        assert_eq!(underscore.title.as_deref(), Some("title"));

        let bare = match_filename_ordinal("103").unwrap();
        assert_eq!(bare.chapter, 103);
        assert_eq!(bare.title, None);
    }

    #[test]
    fn parse_strips_heading_and_joins_paragraphs() {
        let text = "Chapter 2: Ashes\n\nFirst paragraph.\n\n\nSecond paragraph.\n";
        let entry = parse_manuscript("upload.txt", text);
        assert_eq!(entry.parsed_chapter_number, Some(2));
        assert_eq!(entry.parsed_title.as_deref(), Some("Ashes"));
        assert_eq!(entry.body, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn parse_discards_quote_only_lines() {
        let text = "Chapter 1\n\"\"\nReal line.";
        let entry = parse_manuscript("a.txt", text);
        assert_eq!(entry.parsed_chapter_number, Some(1));
        assert_eq!(entry.body, "Real line.");
    }

    #[test]
    fn parse_falls_back_to_filename() {
        let entry = parse_manuscript("chapter10.md", "Just prose, no heading.");
        assert_eq!(entry.parsed_chapter_number, Some(10));
        assert_eq!(entry.parsed_part_number, None);
        assert_eq!(entry.parsed_title, None);
        // 文件名命中时正文整体保留
        assert_eq!(entry.body, "Just prose, no heading.");
    }

    #[test]
    fn parse_unresolvable_keeps_fields_absent() {
        let entry = parse_manuscript("notes.txt", "No numbers anywhere.");
        assert_eq!(entry.parsed_chapter_number, None);
        assert_eq!(entry.parsed_part_number, None);
        assert_eq!(entry.parsed_title, None);
        assert_eq!(entry.body, "No numbers anywhere.");
    }

    #[test]
    fn content_heading_wins_over_filename() {
        let entry = parse_manuscript("chapter99.txt", "Chapter 4\nBody.");
        assert_eq!(entry.parsed_chapter_number, Some(4));
    }

    #[test]
    fn file_stem_only_strips_known_extensions() {
        assert_eq!(file_stem("chapter10.md"), "chapter10");
        assert_eq!(file_stem("chapter 10.5.txt"), "chapter 10.5");
        assert_eq!(file_stem("10.5"), "10.5");
    }
}
