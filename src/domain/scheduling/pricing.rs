//! Scheduling Context - 定价决策
//!
//! 单一入口的金币定价，优先级从高到低:
//! 1. 固定价（无条件覆盖，包括显式覆盖值）
//! 2. 章节显式覆盖（自动排期章节最低抬到 1）
//! 3. 自动排期时的默认金币（最低 1）
//! 4. 立即发布的免费章节: 0

use super::ReleasePolicy;

/// 计算章节金币价格
///
/// `auto_scheduled` 表示本次写入是否由自动放出排期：排期中的章节
/// 必须非免费，否则无法作为后续排期的锚点。
pub fn resolve_price(
    policy: &ReleasePolicy,
    override_coins: Option<u32>,
    auto_scheduled: bool,
) -> u32 {
    if policy.fixed_price_enabled {
        return policy.fixed_price_amount;
    }

    if let Some(coins) = override_coins {
        if auto_scheduled && coins < 1 {
            return 1;
        }
        return coins;
    }

    if auto_scheduled {
        return policy.default_coins.max(1);
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(fixed: Option<u32>, default_coins: u32) -> ReleasePolicy {
        ReleasePolicy {
            fixed_price_enabled: fixed.is_some(),
            fixed_price_amount: fixed.unwrap_or(0),
            default_coins,
            ..Default::default()
        }
    }

    #[test]
    fn fixed_price_overrides_everything() {
        let p = policy(Some(12), 5);
        assert_eq!(resolve_price(&p, Some(99), true), 12);
        assert_eq!(resolve_price(&p, Some(0), false), 12);
        assert_eq!(resolve_price(&p, None, true), 12);
        assert_eq!(resolve_price(&p, None, false), 12);
    }

    #[test]
    fn fixed_price_zero_is_honored() {
        let p = policy(Some(0), 5);
        assert_eq!(resolve_price(&p, Some(7), true), 0);
    }

    #[test]
    fn override_used_as_is_when_not_scheduled() {
        let p = policy(None, 5);
        assert_eq!(resolve_price(&p, Some(0), false), 0);
        assert_eq!(resolve_price(&p, Some(3), false), 3);
    }

    #[test]
    fn override_raised_to_one_when_scheduled() {
        let p = policy(None, 5);
        assert_eq!(resolve_price(&p, Some(0), true), 1);
        assert_eq!(resolve_price(&p, Some(4), true), 4);
    }

    #[test]
    fn scheduled_without_override_uses_default_coins() {
        let p = policy(None, 8);
        assert_eq!(resolve_price(&p, None, true), 8);
    }

    #[test]
    fn scheduled_default_coins_has_floor_of_one() {
        let p = policy(None, 0);
        assert_eq!(resolve_price(&p, None, true), 1);
    }

    #[test]
    fn immediate_chapter_is_free() {
        let p = policy(None, 5);
        assert_eq!(resolve_price(&p, None, false), 0);
    }
}
