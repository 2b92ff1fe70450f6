use soroban_sdk::{Env, U256};

/// Multiply and divide with 256-bit intermediate precision (rounds down)
/// Returns (a * b) / denominator, or None on a zero denominator or a
/// result that does not fit u128
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Option<u128> {
    if denominator == 0 {
        return None;
    }

    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    product.div(&U256::from_u128(env, denominator)).to_u128()
}

/// Absolute difference
pub fn abs_diff(a: u128, b: u128) -> u128 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    // === mul_div tests ===

    #[test]
    fn test_mul_div_basic() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 5), Some(40));
    }

    #[test]
    fn test_mul_div_large_numbers() {
        let env = Env::default();
        // (2^100 * 2^100) / 2^100 overflows u128 in the intermediate only
        let large = 1u128 << 100;
        assert_eq!(mul_div(&env, large, large, large), Some(large));
    }

    #[test]
    fn test_mul_div_max_values() {
        let env = Env::default();
        let max = u128::MAX;
        assert_eq!(mul_div(&env, max, max, max), Some(max));
    }

    #[test]
    fn test_mul_div_result_overflow() {
        let env = Env::default();
        assert_eq!(mul_div(&env, u128::MAX, 2, 1), None);
    }

    #[test]
    fn test_mul_div_rounds_down() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 1, 1, 2), Some(0));
        assert_eq!(mul_div(&env, 3, 1, 2), Some(1));
        assert_eq!(mul_div(&env, 5, 1, 3), Some(1));
    }

    #[test]
    fn test_mul_div_zero_denominator() {
        let env = Env::default();
        assert_eq!(mul_div(&env, 10, 20, 0), None);
    }

    #[test]
    fn test_abs_diff() {
        assert_eq!(abs_diff(1_001_000, 1_000_000), 1000);
        assert_eq!(abs_diff(1_000_000, 1_001_000), 1000);
        assert_eq!(abs_diff(7, 7), 0);
    }
}
