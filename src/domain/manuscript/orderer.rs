//! Manuscript Context - 批量排序
//!
//! 对整批解析结果做全序排序：主键为章节号升序，次键为分部号升序。
//! 该顺序同时决定展示顺序与排期顺序（同日组内后一条以前一条的
//! 发布时间为锚点）。

use super::parser::file_stem;
use super::ManuscriptEntry;

/// 对一批书稿条目做全序排序
///
/// - 章节号缺失时回退到文件名前导数字，再缺省为 0
/// - 分部号缺失按 0 处理
/// - 稳定排序，相同键保持上传顺序
pub fn order_batch(mut entries: Vec<ManuscriptEntry>) -> Vec<ManuscriptEntry> {
    entries.sort_by_key(sort_key);
    entries
}

fn sort_key(entry: &ManuscriptEntry) -> (u32, u32) {
    let chapter = entry
        .parsed_chapter_number
        .unwrap_or_else(|| leading_digits(file_stem(&entry.source_name)));
    let part = entry.parsed_part_number.unwrap_or(0);
    (chapter, part)
}

/// 文件名前导数字，无则 0
fn leading_digits(stem: &str) -> u32 {
    let digits: String = stem.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, chapter: Option<u32>, part: Option<u32>) -> ManuscriptEntry {
        ManuscriptEntry {
            source_name: name.to_string(),
            raw_text: String::new(),
            parsed_chapter_number: chapter,
            parsed_part_number: part,
            parsed_title: None,
            body: String::new(),
        }
    }

    #[test]
    fn lower_chapter_sorts_first_regardless_of_part() {
        let ordered = order_batch(vec![
            entry("b.txt", Some(2), None),
            entry("a.txt", Some(1), Some(9)),
        ]);
        assert_eq!(ordered[0].parsed_chapter_number, Some(1));
        assert_eq!(ordered[1].parsed_chapter_number, Some(2));
    }

    #[test]
    fn equal_chapter_sorts_by_part_with_absent_as_zero() {
        let ordered = order_batch(vec![
            entry("c.txt", Some(3), Some(2)),
            entry("a.txt", Some(3), None),
            entry("b.txt", Some(3), Some(1)),
        ]);
        let parts: Vec<Option<u32>> = ordered.iter().map(|e| e.parsed_part_number).collect();
        assert_eq!(parts, vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn missing_number_falls_back_to_filename_digits() {
        let ordered = order_batch(vec![
            entry("12_extra.txt", None, None),
            entry("05_intro.txt", None, None),
            entry("x.txt", Some(7), None),
        ]);
        let names: Vec<&str> = ordered.iter().map(|e| e.source_name.as_str()).collect();
        assert_eq!(names, vec!["05_intro.txt", "x.txt", "12_extra.txt"]);
    }

    #[test]
    fn no_digits_defaults_to_zero() {
        let ordered = order_batch(vec![
            entry("a.txt", Some(1), None),
            entry("preface.txt", None, None),
        ]);
        assert_eq!(ordered[0].source_name, "preface.txt");
    }

    #[test]
    fn total_order_is_stable_for_equal_keys() {
        let ordered = order_batch(vec![
            entry("first.txt", Some(4), Some(1)),
            entry("second.txt", Some(4), Some(1)),
        ]);
        assert_eq!(ordered[0].source_name, "first.txt");
        assert_eq!(ordered[1].source_name, "second.txt");
    }
}
