#![no_std]

mod pool;
mod share;

pub use pool::*;
pub use share::*;

/// 18-decimal fixed-point one (1e18). Fee rates and K are scaled by this.
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// Scale of the price limit ratio (1e6 = 100%)
pub const PRICE_LIMIT_SCALE: u128 = 1_000_000;

/// Largest value a reserve, accrued fee or target may hold (2^112 - 1)
pub const MAX_U112: u128 = (1u128 << 112) - 1;

/// Share mints at or below this amount are rejected.
/// Flat across asset decimals.
pub const MINIMUM_MINT: u128 = 1000;

/// Upper bound on the oracle price accepted at initialization (1e36)
pub const MAX_ORACLE_PRICE: u128 = ONE * ONE;

/// Returns true if `value` fits the 112-bit storage width
pub fn fits_u112(value: u128) -> bool {
    value <= MAX_U112
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u112_bound() {
        assert_eq!(MAX_U112, 5192296858534827628530496329220095);
        assert!(fits_u112(MAX_U112));
        assert!(!fits_u112(MAX_U112 + 1));
        assert!(fits_u112(0));
    }

    #[test]
    fn test_scales() {
        assert_eq!(ONE, 10u128.pow(18));
        assert_eq!(PRICE_LIMIT_SCALE, 10u128.pow(6));
        assert_eq!(MAX_ORACLE_PRICE, 10u128.pow(36));
    }
}
