//! Scheduling Context - 锁定状态分类
//!
//! 由持久化的发布时间与价格推导章节的可见/解锁状态，纯函数。

use chrono::{DateTime, Duration, Utc};

/// 永久锁定阈值（年）
///
/// 发布时间超出当前时刻 50 年以上视为"永不自动解锁"的标记值，
/// 而非真实的未来发布日期。该常量理应成为策略字段，目前数据模型
/// 尚无配置入口，先以命名常量固定。
pub const INDEFINITE_LOCK_YEARS: i64 = 50;

/// 章节锁定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// 已发布（免费可读），已解锁内容不会被重新锁定
    PublishedFree,
    /// 永久锁定：不可购买、不会自动解锁，仅作者手动放出
    IndefinitelyLocked,
    /// 提前章：可立即花金币解锁，未购买则到点自动放出
    AdvancedLocked,
    /// 免费排期章：不可购买，到点自动可见
    ScheduledFree,
}

impl LockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::PublishedFree => "published_free",
            LockState::IndefinitelyLocked => "indefinitely_locked",
            LockState::AdvancedLocked => "advanced_locked",
            LockState::ScheduledFree => "scheduled_free",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "published_free" => Some(LockState::PublishedFree),
            "indefinitely_locked" => Some(LockState::IndefinitelyLocked),
            "advanced_locked" => Some(LockState::AdvancedLocked),
            "scheduled_free" => Some(LockState::ScheduledFree),
            _ => None,
        }
    }
}

/// 永久锁定判定：发布时间在 now 之后超过 50 年
pub fn is_indefinitely_locked(publish_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    publish_at > now + Duration::days(INDEFINITE_LOCK_YEARS * 365)
}

/// 分类章节锁定状态
///
/// 优先级: 已到点/未排期 > 永久锁定 > 价格判定。
/// 永久锁定始终压过价格判定——这类章节永不可购买。
pub fn classify_lock_state(
    publish_at: Option<DateTime<Utc>>,
    coins: u32,
    now: DateTime<Utc>,
) -> LockState {
    let Some(publish_at) = publish_at else {
        return LockState::PublishedFree;
    };
    if publish_at <= now {
        return LockState::PublishedFree;
    }
    if is_indefinitely_locked(publish_at, now) {
        return LockState::IndefinitelyLocked;
    }
    if coins > 0 {
        LockState::AdvancedLocked
    } else {
        LockState::ScheduledFree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn absent_publish_date_is_published_free() {
        assert_eq!(classify_lock_state(None, 10, now()), LockState::PublishedFree);
    }

    #[test]
    fn past_publish_date_is_published_even_with_price() {
        let at = now() - Duration::hours(1);
        assert_eq!(
            classify_lock_state(Some(at), 10, now()),
            LockState::PublishedFree
        );
    }

    #[test]
    fn future_priced_chapter_is_advanced_locked() {
        let at = now() + Duration::days(3);
        assert_eq!(
            classify_lock_state(Some(at), 5, now()),
            LockState::AdvancedLocked
        );
    }

    #[test]
    fn future_free_chapter_is_scheduled_free() {
        let at = now() + Duration::days(3);
        assert_eq!(
            classify_lock_state(Some(at), 0, now()),
            LockState::ScheduledFree
        );
    }

    #[test]
    fn indefinite_lock_overrides_price() {
        // Scenario E: 60 年后 + 5 金币 → 永久锁定而非提前章
        let at = now() + Duration::days(60 * 365);
        assert_eq!(
            classify_lock_state(Some(at), 5, now()),
            LockState::IndefinitelyLocked
        );
    }

    #[test]
    fn classification_is_pure() {
        let at = now() + Duration::days(3);
        let first = classify_lock_state(Some(at), 2, now());
        let second = classify_lock_state(Some(at), 2, now());
        assert_eq!(first, second);
    }

    #[test]
    fn threshold_boundary() {
        let just_inside = now() + Duration::days(INDEFINITE_LOCK_YEARS * 365);
        assert!(!is_indefinitely_locked(just_inside, now()));
        let just_outside = just_inside + Duration::seconds(1);
        assert!(is_indefinitely_locked(just_outside, now()));
    }

    #[test]
    fn state_string_roundtrip() {
        for state in [
            LockState::PublishedFree,
            LockState::IndefinitelyLocked,
            LockState::AdvancedLocked,
            LockState::ScheduledFree,
        ] {
            assert_eq!(LockState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(LockState::from_str("bogus"), None);
    }
}
