//! 18-decimal fixed-point helpers.
//!
//! Fee math rounds down so the pool never credits more than it received.

use crate::full_math::{abs_diff, mul_div};
use pmm_types::{ONE, PRICE_LIMIT_SCALE};
use soroban_sdk::Env;

/// target * d / 1e18, rounded down
pub fn mul_floor(env: &Env, target: u128, d: u128) -> Option<u128> {
    mul_div(env, target, d, ONE)
}

/// Relative move from `current` to `new`, scaled by 1e6 and rounded down.
/// None when `current` is zero.
pub fn price_delta_ratio(env: &Env, new: u128, current: u128) -> Option<u128> {
    mul_div(env, abs_diff(new, current), PRICE_LIMIT_SCALE, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_mul_floor_rounds_down() {
        let env = Env::default();
        // 0.3% of 1000
        let rate = 3_000_000_000_000_000;
        assert_eq!(mul_floor(&env, 1000, rate), Some(3));
        // 0.3% of 999 = 2.997
        assert_eq!(mul_floor(&env, 999, rate), Some(2));
    }

    #[test]
    fn test_mul_floor_full_rate_is_identity() {
        let env = Env::default();
        assert_eq!(mul_floor(&env, 123_456, ONE), Some(123_456));
        assert_eq!(mul_floor(&env, 123_456, 0), Some(0));
    }

    #[test]
    fn test_price_delta_ratio() {
        let env = Env::default();
        // 0.1% move on I = 1_000_000
        assert_eq!(price_delta_ratio(&env, 1_001_000, 1_000_000), Some(1000));
        // 0.1001% move
        assert_eq!(price_delta_ratio(&env, 1_001_001, 1_000_000), Some(1001));
        // downward moves are measured the same way
        assert_eq!(price_delta_ratio(&env, 999_000, 1_000_000), Some(1000));
        assert_eq!(price_delta_ratio(&env, 5, 0), None);
    }

    #[test]
    fn test_price_delta_ratio_large_price() {
        let env = Env::default();
        // diff * 1e6 would overflow a plain u128 multiply
        let current = u128::MAX / 2;
        let new = u128::MAX;
        assert!(price_delta_ratio(&env, new, current).is_some());
    }
}
