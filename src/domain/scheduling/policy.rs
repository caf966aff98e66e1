//! Scheduling Context - 发布策略
//!
//! 每部小说一份的发布策略值对象。原实现从浏览器本地存储读取全局
//! 可变配置；此处改为显式传入每次排期调用，无环境状态。

use chrono::{FixedOffset, Weekday};
use thiserror::Error;

/// 策略校验错误
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("无效的发布小时: {0}（应为 0-23）")]
    InvalidReleaseHour(u32),

    #[error("无效的放出间隔天数: {0}（应 >= 1）")]
    InvalidIntervalDays(u32),

    #[error("发布日模式已启用但发布日集合为空")]
    EmptyPublishingDays,

    #[error("无效的周几名称: {0}")]
    InvalidWeekdayName(String),

    #[error("无效的时区偏移: {0} 分钟")]
    InvalidUtcOffset(i32),
}

/// 允许发布的周几集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishingDays(Vec<Weekday>);

impl PublishingDays {
    pub fn new(days: Vec<Weekday>) -> Self {
        let mut days = days;
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();
        Self(days)
    }

    /// 从周几名称解析（全称或三字母缩写，不区分大小写）
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, PolicyError> {
        let mut days = Vec::with_capacity(names.len());
        for name in names {
            days.push(parse_weekday(name.as_ref())?);
        }
        Ok(Self::new(days))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|d| weekday_name(*d)).collect()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_weekday(name: &str) -> Result<Weekday, PolicyError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        other => Err(PolicyError::InvalidWeekdayName(other.to_string())),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// 小说级发布策略
///
/// 不变量:
/// - `release_hour` 为 0-23 的本地时刻，所有自动排期结果归一化到该小时
/// - `interval_days >= 1`（仅间隔模式使用）
/// - `use_publishing_days` 为 true 时 `publishing_days` 非空
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePolicy {
    /// 自动放出是否启用
    pub auto_release_enabled: bool,
    /// 放出间隔天数（非发布日模式）
    pub interval_days: u32,
    /// 固定价是否启用
    pub fixed_price_enabled: bool,
    /// 固定价金额（金币）
    pub fixed_price_amount: u32,
    /// 是否按发布日（周几）排期
    pub use_publishing_days: bool,
    /// 发布日集合
    pub publishing_days: PublishingDays,
    /// 本地发布小时（0-23）
    pub release_hour: u32,
    /// 无其他价格来源时的默认金币数（>= 1）
    pub default_coins: u32,
    /// 作者所在时区相对 UTC 的偏移（分钟），排期的民用时间换算依据
    pub utc_offset_minutes: i32,
}

impl Default for ReleasePolicy {
    fn default() -> Self {
        Self {
            auto_release_enabled: false,
            interval_days: 7,
            fixed_price_enabled: false,
            fixed_price_amount: 0,
            use_publishing_days: false,
            publishing_days: PublishingDays::default(),
            release_hour: 5,
            default_coins: 5,
            utc_offset_minutes: 0,
        }
    }
}

impl ReleasePolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.release_hour > 23 {
            return Err(PolicyError::InvalidReleaseHour(self.release_hour));
        }
        if self.interval_days == 0 {
            return Err(PolicyError::InvalidIntervalDays(self.interval_days));
        }
        if self.use_publishing_days && self.publishing_days.is_empty() {
            return Err(PolicyError::EmptyPublishingDays);
        }
        if self.offset().is_none() {
            return Err(PolicyError::InvalidUtcOffset(self.utc_offset_minutes));
        }
        Ok(())
    }

    /// 策略时区（偏移超界时为 None，由 validate 拦截）
    pub fn offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}
