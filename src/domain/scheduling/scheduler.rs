//! Scheduling Context - 发布排期
//!
//! 为单章或批量分组计算发布时间。计算全程无 I/O：锚点集合、策略、
//! 当前时刻均由调用方显式传入，同输入必得同输出。
//!
//! 时间处理：锚点（UTC）先换算到策略时区的民用时间，在民用时间里做
//! 天数/周几推进与发布小时归一化，最后一次性换回 UTC 存储。

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};

use super::lock_state::is_indefinitely_locked;
use super::{PublishingDays, ReleasePolicy};

/// 排期结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRelease {
    /// 发布时间（UTC）
    pub publish_at: DateTime<Utc>,
    /// 是否由自动放出排期得出（定价时决定章节必须非免费）
    pub auto_scheduled: bool,
}

/// 计算章节发布时间
///
/// 步骤:
/// 1. 作者显式指定时间时原样采用，自动放出永不覆盖显式选择
/// 2. 自动放出关闭时立即发布（当前时刻）
/// 3. 否则从锚点推进：锚点 = 已有提前章的最晚发布时间（排除永久
///    锁定章），无则为 now；批量模式传入的 `base_date` 优先于锚点
/// 4. 发布日模式按周几推进，间隔模式加 `interval_days` 天，
///    时刻归一化到 `release_hour`
pub fn schedule_release(
    policy: &ReleasePolicy,
    advanced: &[DateTime<Utc>],
    explicit: Option<DateTime<Utc>>,
    base_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ScheduledRelease {
    if let Some(at) = explicit {
        return ScheduledRelease {
            publish_at: at,
            auto_scheduled: false,
        };
    }

    if !policy.auto_release_enabled {
        return ScheduledRelease {
            publish_at: now,
            auto_scheduled: false,
        };
    }

    let offset = policy.offset().unwrap_or_else(|| Utc.fix());
    let anchor = base_date.unwrap_or_else(|| select_anchor(advanced, now));
    let anchor_day = anchor.with_timezone(&offset).date_naive();

    let target_day = if policy.use_publishing_days && !policy.publishing_days.is_empty() {
        next_publishing_day(anchor_day, &policy.publishing_days)
    } else {
        anchor_day + Days::new(u64::from(policy.interval_days))
    };

    let time = NaiveTime::from_hms_opt(policy.release_hour.min(23), 0, 0)
        .unwrap_or(NaiveTime::MIN);

    ScheduledRelease {
        publish_at: civil_to_utc(target_day.and_time(time), offset),
        auto_scheduled: true,
    }
}

/// 选取排期锚点：未来且非永久锁定的提前章中最晚的发布时间，无则 now
///
/// 传入的 `advanced` 应只含提前章（发布时间在未来且金币 > 0）的
/// 发布时间；永久锁定章在此处再次过滤，不参与锚点。
pub fn select_anchor(advanced: &[DateTime<Utc>], now: DateTime<Utc>) -> DateTime<Utc> {
    advanced
        .iter()
        .copied()
        .filter(|at| *at > now && !is_indefinitely_locked(*at, now))
        .max()
        .unwrap_or(now)
}

/// 同日组内偏移：组内第 `position` 章 = 组基准 + position × interval_hours
///
/// 组内章节不再套用周几/间隔逻辑，仅平移小时。
pub fn offset_within_group(
    group_base: DateTime<Utc>,
    position: u32,
    interval_hours: u32,
) -> DateTime<Utc> {
    group_base + Duration::hours(i64::from(position) * i64::from(interval_hours))
}

/// 给定每日章数时允许的最大同日间隔小时数
///
/// 调用方必须在进入排期前用该上限夹紧 `interval_hours`，
/// 排期本身不再校验。
pub fn max_interval_hours(chapters_per_day: u32) -> u32 {
    24 / chapters_per_day.max(1)
}

/// 从锚点所在日严格向后找下一个发布日（最多扫 7 天即覆盖一整周）
fn next_publishing_day(from: chrono::NaiveDate, days: &PublishingDays) -> chrono::NaiveDate {
    for offset in 1..=7u64 {
        let candidate = from + Days::new(offset);
        if days.contains(candidate.weekday()) {
            return candidate;
        }
    }
    // 集合非空时不可达（7 天必覆盖所有周几）
    from + Days::new(7)
}

/// 民用时间 → UTC 的唯一换算点
fn civil_to_utc(naive: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    match offset.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // 固定偏移不产生歧义/空隙时刻，仅为保持函数全定义
        _ => Utc.from_utc_datetime(&(naive - Duration::seconds(i64::from(offset.local_minus_utc())))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn auto_policy(interval_days: u32, release_hour: u32) -> ReleasePolicy {
        ReleasePolicy {
            auto_release_enabled: true,
            interval_days,
            release_hour,
            ..Default::default()
        }
    }

    #[test]
    fn explicit_date_is_used_verbatim() {
        let policy = auto_policy(7, 5);
        let explicit = utc("2026-06-01T18:30:00Z");
        let out = schedule_release(&policy, &[], Some(explicit), None, utc("2026-03-02T10:00:00Z"));
        assert_eq!(out.publish_at, explicit);
        assert!(!out.auto_scheduled);
    }

    #[test]
    fn auto_disabled_publishes_immediately() {
        let policy = ReleasePolicy::default();
        let now = utc("2026-03-02T10:00:00Z");
        let out = schedule_release(&policy, &[], None, None, now);
        assert_eq!(out.publish_at, now);
        assert!(!out.auto_scheduled);
    }

    #[test]
    fn interval_from_now_normalizes_hour() {
        // Scenario A: interval=7、无提前章、hour=5 → now+7 天的本地 05:00
        let policy = auto_policy(7, 5);
        let now = utc("2026-03-02T10:30:00Z");
        let out = schedule_release(&policy, &[], None, None, now);
        assert_eq!(out.publish_at, utc("2026-03-09T05:00:00Z"));
        assert!(out.auto_scheduled);
    }

    #[test]
    fn interval_anchors_on_latest_advanced() {
        // Scenario B: 提前章在 3 天/10 天后 → 锚定 10 天的那章，结果 17 天后
        let policy = auto_policy(7, 5);
        let now = utc("2026-03-02T10:00:00Z");
        let advanced = vec![
            now + Duration::days(3),
            now + Duration::days(10),
        ];
        let out = schedule_release(&policy, &advanced, None, None, now);
        assert_eq!(out.publish_at.date_naive(), utc("2026-03-19T00:00:00Z").date_naive());
        assert_eq!(out.publish_at, utc("2026-03-19T05:00:00Z"));
    }

    #[test]
    fn indefinitely_locked_chapter_is_not_an_anchor() {
        // Scenario E 后半: 60 年后的章不参与锚点
        let policy = auto_policy(7, 5);
        let now = utc("2026-03-02T10:00:00Z");
        let advanced = vec![now + Duration::days(3), now + Duration::days(60 * 365)];
        let out = schedule_release(&policy, &advanced, None, None, now);
        assert_eq!(out.publish_at, utc("2026-03-12T05:00:00Z"));
    }

    #[test]
    fn base_date_takes_precedence_over_anchor() {
        let policy = auto_policy(7, 5);
        let now = utc("2026-03-02T10:00:00Z");
        let advanced = vec![now + Duration::days(30)];
        let base = utc("2026-03-05T05:00:00Z");
        let out = schedule_release(&policy, &advanced, None, Some(base), now);
        assert_eq!(out.publish_at, utc("2026-03-12T05:00:00Z"));
    }

    #[test]
    fn utc_conversion_respects_policy_offset() {
        // UTC+8: now=2026-03-02T22:00Z 即本地 03-03 06:00，
        // +7 天 = 03-10 本地 05:00 = 03-09T21:00Z
        let policy = ReleasePolicy {
            utc_offset_minutes: 8 * 60,
            ..auto_policy(7, 5)
        };
        let out = schedule_release(&policy, &[], None, None, utc("2026-03-02T22:00:00Z"));
        assert_eq!(out.publish_at, utc("2026-03-09T21:00:00Z"));
    }

    fn weekday_policy(days: &[&str], release_hour: u32) -> ReleasePolicy {
        ReleasePolicy {
            auto_release_enabled: true,
            use_publishing_days: true,
            publishing_days: PublishingDays::from_names(days).unwrap(),
            release_hour,
            ..Default::default()
        }
    }

    #[test]
    fn weekday_mode_advances_to_next_configured_day() {
        // 2026-03-02 是周一；{wed, sat} → 03-04 周三 05:00
        let policy = weekday_policy(&["wed", "sat"], 5);
        let out = schedule_release(&policy, &[], None, None, utc("2026-03-02T10:00:00Z"));
        assert_eq!(out.publish_at, utc("2026-03-04T05:00:00Z"));
        assert_eq!(out.publish_at.weekday(), Weekday::Wed);
    }

    #[test]
    fn weekday_mode_skips_anchor_day_itself() {
        // 锚点当天即周三也要严格后移到下周三
        let policy = weekday_policy(&["wed"], 5);
        let out = schedule_release(&policy, &[], None, None, utc("2026-03-04T10:00:00Z"));
        assert_eq!(out.publish_at, utc("2026-03-11T05:00:00Z"));
    }

    #[test]
    fn weekday_mode_never_outside_set_never_before_anchor() {
        let policy = weekday_policy(&["tuesday", "friday"], 9);
        // 从一周内每一天出发都成立
        for day in 0..7 {
            let now = utc("2026-03-02T08:00:00Z") + Duration::days(day);
            let out = schedule_release(&policy, &[], None, None, now);
            assert!(matches!(out.publish_at.weekday(), Weekday::Tue | Weekday::Fri));
            assert!(out.publish_at > now);
        }
    }

    #[test]
    fn scheduling_is_idempotent_in_intent() {
        let policy = weekday_policy(&["sat"], 5);
        let now = utc("2026-03-02T10:00:00Z");
        let anchor = vec![now + Duration::days(2)];
        let first = schedule_release(&policy, &anchor, None, None, now);
        let second = schedule_release(&policy, &anchor, None, None, now);
        assert_eq!(first, second);
    }

    #[test]
    fn select_anchor_falls_back_to_now() {
        let now = utc("2026-03-02T10:00:00Z");
        assert_eq!(select_anchor(&[], now), now);
        // 过去的发布时间不是提前章
        assert_eq!(select_anchor(&[now - Duration::days(1)], now), now);
    }

    #[test]
    fn group_offset_shifts_by_hours() {
        let base = utc("2026-03-09T05:00:00Z");
        assert_eq!(offset_within_group(base, 0, 6), base);
        assert_eq!(offset_within_group(base, 1, 6), utc("2026-03-09T11:00:00Z"));
        assert_eq!(offset_within_group(base, 2, 6), utc("2026-03-09T17:00:00Z"));
    }

    #[test]
    fn max_interval_hours_is_floor_of_day_split() {
        assert_eq!(max_interval_hours(1), 24);
        assert_eq!(max_interval_hours(2), 12);
        assert_eq!(max_interval_hours(5), 4);
        assert_eq!(max_interval_hours(0), 24);
    }
}
