//! Reserve & fee accounting.
//!
//! The pool's observed token balance is split three ways: tracked reserve,
//! accrued maintainer fee, and uncredited input. Reserve math never touches
//! the fee portion, and input is whatever is left.

use crate::access::require_maintainer;
use crate::error::VaultError;
use crate::events::{MtFeeWithdrawn, ReservesSynced};
use crate::guard::non_reentrant;
use crate::ledger::AssetLedger;
use crate::storage::{get_config, get_state, set_state};
use pmm_math::mul_floor;
use pmm_types::fits_u112;
use soroban_sdk::{log, Address, Env};

/// (base_reserve, quote_reserve)
pub fn get_vault_reserve(env: &Env) -> Result<(u128, u128), VaultError> {
    let state = get_state(env)?;
    Ok((state.base_reserve, state.quote_reserve))
}

/// (lp_fee_rate, mt_fee_rate). Rates are flat; `_user` is ignored.
pub fn get_user_fee_rate(env: &Env, _user: &Address) -> Result<(u128, u128), VaultError> {
    let state = get_state(env)?;
    Ok((state.lp_fee_rate, state.mt_fee_rate))
}

/// (mt_fee_base, mt_fee_quote)
pub fn get_mt_fee_total(env: &Env) -> Result<(u128, u128), VaultError> {
    let state = get_state(env)?;
    Ok((state.mt_fee_base, state.mt_fee_quote))
}

/// Base received but not yet credited: balance - reserve - accrued fee
pub fn get_base_input(env: &Env) -> Result<u128, VaultError> {
    let config = get_config(env)?;
    let state = get_state(env)?;
    let observed = AssetLedger::new(env, &config.base_token)
        .balance_of(&env.current_contract_address())?;
    uncredited(observed, state.base_reserve, state.mt_fee_base)
}

/// Quote received but not yet credited: balance - reserve - accrued fee
pub fn get_quote_input(env: &Env) -> Result<u128, VaultError> {
    let config = get_config(env)?;
    let state = get_state(env)?;
    let observed = AssetLedger::new(env, &config.quote_token)
        .balance_of(&env.current_contract_address())?;
    uncredited(observed, state.quote_reserve, state.mt_fee_quote)
}

fn uncredited(observed: u128, reserve: u128, fee: u128) -> Result<u128, VaultError> {
    observed
        .checked_sub(reserve)
        .and_then(|rest| rest.checked_sub(fee))
        .ok_or(VaultError::Underflow)
}

/// Replace both reserves. Internal to the trade/liquidity layer.
pub fn set_reserve(env: &Env, base: u128, quote: u128) -> Result<(), VaultError> {
    if !fits_u112(base) || !fits_u112(quote) {
        return Err(VaultError::Overflow);
    }
    let mut state = get_state(env)?;
    state.base_reserve = base;
    state.quote_reserve = quote;
    set_state(env, &state);
    Ok(())
}

/// Re-derive reserves from observed balances net of accrued fees.
/// Picks up assets sent straight to the pool without a trade.
pub fn sync(env: &Env) -> Result<(u128, u128), VaultError> {
    non_reentrant(env, || {
        let config = get_config(env)?;
        let mut state = get_state(env)?;
        let pool = env.current_contract_address();

        let base_balance = AssetLedger::new(env, &config.base_token).balance_of(&pool)?;
        let quote_balance = AssetLedger::new(env, &config.quote_token).balance_of(&pool)?;

        let base_reserve = base_balance
            .checked_sub(state.mt_fee_base)
            .ok_or(VaultError::Underflow)?;
        let quote_reserve = quote_balance
            .checked_sub(state.mt_fee_quote)
            .ok_or(VaultError::Underflow)?;

        if !fits_u112(base_reserve) || !fits_u112(quote_reserve) {
            return Err(VaultError::Overflow);
        }

        if base_reserve != state.base_reserve || quote_reserve != state.quote_reserve {
            state.base_reserve = base_reserve;
            state.quote_reserve = quote_reserve;
            set_state(env, &state);

            log!(env, "sync: reserves {} {}", base_reserve, quote_reserve);
            ReservesSynced {
                base_reserve,
                quote_reserve,
            }
            .publish(env);
        }

        Ok((state.base_reserve, state.quote_reserve))
    })
}

/// Pay all accrued maintainer fees to the maintainer.
///
/// Both fee fields are zeroed and stored before either transfer, so a
/// callback from the token sees no fee left to claim.
pub fn withdraw_mt_fee_total(env: &Env, caller: &Address) -> Result<(u128, u128), VaultError> {
    let config = require_maintainer(env, caller)?;

    non_reentrant(env, || {
        let mut state = get_state(env)?;
        let base_fee = state.mt_fee_base;
        let quote_fee = state.mt_fee_quote;

        state.mt_fee_base = 0;
        state.mt_fee_quote = 0;
        set_state(env, &state);

        let pool = env.current_contract_address();
        AssetLedger::new(env, &config.base_token).transfer(&pool, &config.maintainer, base_fee)?;
        AssetLedger::new(env, &config.quote_token).transfer(&pool, &config.maintainer, quote_fee)?;

        log!(env, "maintainer fee withdrawn: {} {}", base_fee, quote_fee);
        MtFeeWithdrawn {
            token: config.base_token.clone(),
            to: config.maintainer.clone(),
            amount: base_fee,
        }
        .publish(env);
        MtFeeWithdrawn {
            token: config.quote_token.clone(),
            to: config.maintainer.clone(),
            amount: quote_fee,
        }
        .publish(env);

        Ok((base_fee, quote_fee))
    })
}

/// Send base out of the pool. Zero amounts make no external call.
pub fn transfer_base_out(env: &Env, to: &Address, amount: u128) -> Result<(), VaultError> {
    let config = get_config(env)?;
    AssetLedger::new(env, &config.base_token).transfer(&env.current_contract_address(), to, amount)
}

/// Send quote out of the pool. Zero amounts make no external call.
pub fn transfer_quote_out(env: &Env, to: &Address, amount: u128) -> Result<(), VaultError> {
    let config = get_config(env)?;
    AssetLedger::new(env, &config.quote_token).transfer(&env.current_contract_address(), to, amount)
}

/// Credit maintainer fees taken by a trade. Both sums are bound-checked
/// before either is stored.
pub fn accrue_mt_fee(env: &Env, base_fee: u128, quote_fee: u128) -> Result<(), VaultError> {
    let mut state = get_state(env)?;
    let mt_fee_base = state
        .mt_fee_base
        .checked_add(base_fee)
        .filter(|fee| fits_u112(*fee))
        .ok_or(VaultError::Overflow)?;
    let mt_fee_quote = state
        .mt_fee_quote
        .checked_add(quote_fee)
        .filter(|fee| fits_u112(*fee))
        .ok_or(VaultError::Overflow)?;

    state.mt_fee_base = mt_fee_base;
    state.mt_fee_quote = mt_fee_quote;
    set_state(env, &state);
    Ok(())
}

/// Split a traded amount into (lp_fee, mt_fee), each rounded down
pub fn split_fee(env: &Env, amount: u128) -> Result<(u128, u128), VaultError> {
    let state = get_state(env)?;
    let lp_fee = mul_floor(env, amount, state.lp_fee_rate).ok_or(VaultError::Overflow)?;
    let mt_fee = mul_floor(env, amount, state.mt_fee_rate).ok_or(VaultError::Overflow)?;
    Ok((lp_fee, mt_fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncredited() {
        assert_eq!(uncredited(100, 60, 30), Ok(10));
        assert_eq!(uncredited(90, 60, 30), Ok(0));
        assert_eq!(uncredited(89, 60, 30), Err(VaultError::Underflow));
        assert_eq!(uncredited(50, 60, 0), Err(VaultError::Underflow));
    }
}
