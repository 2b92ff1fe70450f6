// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Pure predicates over vault state. Tests assert them after every
// operation sequence; none of them touch storage.
//
// INVARIANT CATEGORIES:
//
// 1. WIDTH INVARIANTS
//    - Reserves, accrued fees and targets fit in 112 bits
//
// 2. SEPARATION INVARIANTS
//    - Observed balance = reserve + accrued fee + uncredited input
//
// 3. CONSERVATION INVARIANTS
//    - Total supply equals the sum of holder balances
//
// 4. CALIBRATION INVARIANTS
//    - Rates and K at most 1e18, price limit at most 1e6, price non-zero
//    - R-state ONE means there is nothing left to correct
//
// ============================================================================

use pmm_types::{fits_u112, PoolState, RState, MAX_ORACLE_PRICE, ONE, PRICE_LIMIT_SCALE};

// ============================================================================
// WIDTH INVARIANTS
// ============================================================================

/// Invariant: every width-bounded field fits 112 bits
///
/// Property:
///   base_reserve, quote_reserve, mt_fee_base, mt_fee_quote,
///   base_target, quote_target <= 2^112 - 1
pub fn state_within_u112(state: &PoolState) -> bool {
    fits_u112(state.base_reserve)
        && fits_u112(state.quote_reserve)
        && fits_u112(state.mt_fee_base)
        && fits_u112(state.mt_fee_quote)
        && fits_u112(state.base_target)
        && fits_u112(state.quote_target)
}

// ============================================================================
// SEPARATION INVARIANTS
// ============================================================================

/// Invariant: the observed balance is fully accounted for
///
/// Property:
///   input + mt_fee + reserve == observed
pub fn balance_accounted(observed: u128, reserve: u128, mt_fee: u128, input: u128) -> bool {
    reserve
        .checked_add(mt_fee)
        .and_then(|tracked| tracked.checked_add(input))
        == Some(observed)
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: no share is created or lost outside mint/burn
///
/// Property:
///   total_supply == sum(balances)
pub fn supply_conserved(total_supply: u128, balances: &[u128]) -> bool {
    let mut sum: u128 = 0;
    for balance in balances {
        match sum.checked_add(*balance) {
            Some(next) => sum = next,
            None => return false,
        }
    }
    sum == total_supply
}

// ============================================================================
// CALIBRATION INVARIANTS
// ============================================================================

/// Invariant: calibration parameters are inside their declared ranges
pub fn calibration_in_range(state: &PoolState) -> bool {
    state.i > 0
        && state.i <= MAX_ORACLE_PRICE
        && state.k <= ONE
        && state.lp_fee_rate <= ONE
        && state.mt_fee_rate <= ONE
        && state.price_limit <= PRICE_LIMIT_SCALE
}

/// Invariant: a correction pass leaves no pending transition
///
/// Property:
///   BELOW_ONE => base_reserve >= base_target
///   ABOVE_ONE => quote_reserve >= quote_target
pub fn r_state_settled(state: &PoolState) -> bool {
    match state.r_state {
        RState::One => true,
        RState::BelowOne => state.base_reserve >= state.base_target,
        RState::AboveOne => state.quote_reserve >= state.quote_target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_types::{CalibrationParams, MAX_U112};

    fn state() -> PoolState {
        PoolState::new(&CalibrationParams {
            i: ONE,
            k: ONE / 10,
            price_limit: 1000,
            lp_fee_rate: ONE / 1000,
            mt_fee_rate: ONE / 10000,
        })
    }

    #[test]
    fn test_state_within_u112() {
        let mut s = state();
        assert!(state_within_u112(&s));
        s.mt_fee_quote = MAX_U112;
        assert!(state_within_u112(&s));
        s.mt_fee_quote = MAX_U112 + 1;
        assert!(!state_within_u112(&s));
    }

    #[test]
    fn test_balance_accounted() {
        assert!(balance_accounted(100, 60, 30, 10));
        assert!(!balance_accounted(100, 60, 30, 11));
        assert!(!balance_accounted(u128::MAX, u128::MAX, 1, 0));
    }

    #[test]
    fn test_supply_conserved() {
        assert!(supply_conserved(0, &[]));
        assert!(supply_conserved(3000, &[1001, 1999, 0]));
        assert!(!supply_conserved(3000, &[1001, 1998]));
        assert!(!supply_conserved(0, &[u128::MAX, 1]));
    }

    #[test]
    fn test_calibration_in_range() {
        let mut s = state();
        assert!(calibration_in_range(&s));
        s.k = ONE + 1;
        assert!(!calibration_in_range(&s));

        let mut s = state();
        s.i = MAX_ORACLE_PRICE;
        assert!(calibration_in_range(&s));
        s.i = MAX_ORACLE_PRICE + 1;
        assert!(!calibration_in_range(&s));
    }

    #[test]
    fn test_r_state_settled() {
        let mut s = state();
        assert!(r_state_settled(&s));

        s.r_state = RState::BelowOne;
        s.base_target = 100;
        s.base_reserve = 99;
        assert!(!r_state_settled(&s));
        s.base_reserve = 100;
        assert!(r_state_settled(&s));

        s.r_state = RState::AboveOne;
        s.quote_target = 50;
        s.quote_reserve = 10;
        assert!(!r_state_settled(&s));
    }
}
