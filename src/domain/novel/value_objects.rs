//! Novel Context - Value Objects

/// 分部号哨兵值：番外/加更章，不参与分部排序
pub const BONUS_PART: i32 = -1;

/// 章节键：小说内章节的业务标识
///
/// 不变量:
/// - 负章节号为草稿标记，绝对值为展示编号
/// - 同一小说内非草稿章节的 (章节号, 分部号) 唯一
/// - 草稿与其已发布对应章不冲突
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChapterKey {
    pub chapter: i32,
    pub part: Option<i32>,
}

impl ChapterKey {
    pub fn new(chapter: i32, part: Option<i32>) -> Self {
        Self { chapter, part }
    }

    /// 是否为草稿（负章节号标记）
    pub fn is_draft(&self) -> bool {
        self.chapter < 0
    }

    /// 展示编号（草稿取绝对值）
    pub fn display_number(&self) -> u32 {
        self.chapter.unsigned_abs()
    }

    /// 是否为番外章
    pub fn is_bonus(&self) -> bool {
        self.part == Some(BONUS_PART)
    }

    /// 转为草稿键
    pub fn as_draft(&self) -> Self {
        Self {
            chapter: -(self.chapter.abs()),
            part: self.part,
        }
    }

    /// 转为发布键
    pub fn as_published(&self) -> Self {
        Self {
            chapter: self.chapter.abs(),
            part: self.part,
        }
    }

    /// 唯一性冲突判定：仅非草稿章节之间比较，分部缺失按 0
    pub fn collides_with(&self, other: &ChapterKey) -> bool {
        if self.is_draft() || other.is_draft() {
            return false;
        }
        self.chapter == other.chapter && self.part.unwrap_or(0) == other.part.unwrap_or(0)
    }
}

impl std::fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.part {
            Some(BONUS_PART) => write!(f, "{}(bonus)", self.display_number()),
            Some(part) => write!(f, "{}.{}", self.display_number(), part),
            None => write!(f, "{}", self.display_number()),
        }
    }
}

/// 年龄分级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeRating {
    #[default]
    Everyone,
    Teen,
    Mature,
}

impl AgeRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeRating::Everyone => "everyone",
            AgeRating::Teen => "teen",
            AgeRating::Mature => "mature",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "everyone" => Some(AgeRating::Everyone),
            "teen" => Some(AgeRating::Teen),
            "mature" => Some(AgeRating::Mature),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_chapter_is_draft_with_display_magnitude() {
        let key = ChapterKey::new(-12, None);
        assert!(key.is_draft());
        assert_eq!(key.display_number(), 12);
    }

    #[test]
    fn draft_does_not_collide_with_published_counterpart() {
        let draft = ChapterKey::new(-3, Some(1));
        let published = ChapterKey::new(3, Some(1));
        assert!(!draft.collides_with(&published));
        assert!(published.collides_with(&published.clone()));
    }

    #[test]
    fn absent_part_collides_with_part_zero() {
        let a = ChapterKey::new(5, None);
        let b = ChapterKey::new(5, Some(0));
        assert!(a.collides_with(&b));
    }

    #[test]
    fn bonus_part_sentinel() {
        let key = ChapterKey::new(8, Some(BONUS_PART));
        assert!(key.is_bonus());
        assert_eq!(key.to_string(), "8(bonus)");
    }

    #[test]
    fn draft_published_roundtrip() {
        let key = ChapterKey::new(4, Some(2));
        assert_eq!(key.as_draft().as_published(), key);
    }

    #[test]
    fn age_rating_roundtrip() {
        for rating in [AgeRating::Everyone, AgeRating::Teen, AgeRating::Mature] {
            assert_eq!(AgeRating::from_str(rating.as_str()), Some(rating));
        }
        assert_eq!(AgeRating::from_str("adults"), None);
    }
}
