//! Oracle price, fee rate and curve parameter control, plus the R-state
//! correction machine.

use crate::access::{require_admin, require_maintainer};
use crate::error::VaultError;
use crate::events::{
    KChanged, LpFeeRateChanged, MtFeeRateChanged, PriceChanged, PriceLimitChanged,
    RStateCorrected,
};
use crate::storage::{get_state, set_state};
use pmm_math::price_delta_ratio;
use pmm_types::{fits_u112, PmmState, RState, MAX_ORACLE_PRICE, ONE, PRICE_LIMIT_SCALE};
use soroban_sdk::{log, Address, Env};

pub fn get_pmm_state(env: &Env) -> Result<PmmState, VaultError> {
    Ok(get_state(env)?.pmm_state())
}

/// Admin: set the max relative one-step price move (1e6 = 100%)
pub fn adjust_price_limit(env: &Env, caller: &Address, new_limit: u128) -> Result<(), VaultError> {
    require_admin(env, caller)?;
    if new_limit > PRICE_LIMIT_SCALE {
        return Err(VaultError::InvalidParameter);
    }

    let mut state = get_state(env)?;
    let old_limit = state.price_limit;
    state.price_limit = new_limit;
    set_state(env, &state);

    PriceLimitChanged {
        old_limit,
        new_limit,
    }
    .publish(env);
    Ok(())
}

/// Admin: move the oracle price, bounded by the price limit.
///
/// Requires |new_i - i| * 1e6 / i <= price_limit and new_i <= 1e36.
pub fn adjust_price(env: &Env, caller: &Address, new_i: u128) -> Result<(), VaultError> {
    require_admin(env, caller)?;
    if new_i == 0 || new_i > MAX_ORACLE_PRICE {
        return Err(VaultError::InvalidParameter);
    }

    let mut state = get_state(env)?;
    // None only when the ratio itself overflows, which is past any limit
    let delta = price_delta_ratio(env, new_i, state.i).ok_or(VaultError::ExceedLimit)?;
    if delta > state.price_limit {
        log!(env, "price move {} exceeds limit {}", delta, state.price_limit);
        return Err(VaultError::ExceedLimit);
    }

    let old_i = state.i;
    state.i = new_i;
    set_state(env, &state);

    PriceChanged { old_i, new_i }.publish(env);
    Ok(())
}

/// Maintainer: set the maintainer fee rate (<= 1e18)
pub fn adjust_mt_fee_rate(env: &Env, caller: &Address, new_rate: u128) -> Result<(), VaultError> {
    require_maintainer(env, caller)?;
    if new_rate > ONE {
        return Err(VaultError::InvalidParameter);
    }

    let mut state = get_state(env)?;
    let old_rate = state.mt_fee_rate;
    state.mt_fee_rate = new_rate;
    set_state(env, &state);

    MtFeeRateChanged { old_rate, new_rate }.publish(env);
    Ok(())
}

/// Maintainer: set the LP fee rate (<= 1e18)
pub fn adjust_lp_fee_rate(env: &Env, caller: &Address, new_rate: u128) -> Result<(), VaultError> {
    require_maintainer(env, caller)?;
    if new_rate > ONE {
        return Err(VaultError::InvalidParameter);
    }

    let mut state = get_state(env)?;
    let old_rate = state.lp_fee_rate;
    state.lp_fee_rate = new_rate;
    set_state(env, &state);

    LpFeeRateChanged { old_rate, new_rate }.publish(env);
    Ok(())
}

/// Maintainer: set curve steepness K (<= 1e18)
pub fn adjust_k(env: &Env, caller: &Address, new_k: u128) -> Result<(), VaultError> {
    require_maintainer(env, caller)?;
    if new_k > ONE {
        return Err(VaultError::InvalidParameter);
    }

    let mut state = get_state(env)?;
    let old_k = state.k;
    state.k = new_k;
    set_state(env, &state);

    KChanged { old_k, new_k }.publish(env);
    Ok(())
}

/// Re-anchor targets once the deficit side has been drawn back past its
/// target. Callable by anyone; a no-op unless a transition fires.
pub fn correct_r_state(env: &Env) -> Result<RState, VaultError> {
    let mut state = get_state(env)?;

    let reanchor = match state.r_state {
        RState::BelowOne => state.base_reserve < state.base_target,
        RState::AboveOne => state.quote_reserve < state.quote_target,
        RState::One => false,
    };

    if reanchor {
        state.r_state = RState::One;
        state.base_target = state.base_reserve;
        state.quote_target = state.quote_reserve;
        set_state(env, &state);

        log!(env, "r-state reset to ONE");
        RStateCorrected {
            base_target: state.base_target,
            quote_target: state.quote_target,
        }
        .publish(env);
    }

    Ok(state.r_state)
}

/// Record the R-state and targets a trade left behind. Internal to the
/// trade layer.
pub fn set_r_state(
    env: &Env,
    r_state: RState,
    base_target: u128,
    quote_target: u128,
) -> Result<(), VaultError> {
    if !fits_u112(base_target) || !fits_u112(quote_target) {
        return Err(VaultError::Overflow);
    }
    let mut state = get_state(env)?;
    state.r_state = r_state;
    state.base_target = base_target;
    state.quote_target = quote_target;
    set_state(env, &state);
    Ok(())
}
