//! Fungible share ledger: balances, allowances, mint and burn.
//!
//! Callers authenticate the acting identity before reaching these
//! functions. `mint` and `burn` are internal to the liquidity layer.

use crate::error::VaultError;
use crate::events::{Approval, Burn, Mint, Transfer};
use crate::storage::{
    get_allowance, get_balance, get_share_info, is_initialized, set_allowance, set_balance,
    set_share_info,
};
use pmm_types::MINIMUM_MINT;
use soroban_sdk::{Address, Env};

pub fn balance(env: &Env, holder: &Address) -> Result<u128, VaultError> {
    require_initialized(env)?;
    Ok(get_balance(env, holder))
}

pub fn total_supply(env: &Env) -> Result<u128, VaultError> {
    Ok(get_share_info(env)?.total_supply)
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> Result<u128, VaultError> {
    require_initialized(env)?;
    Ok(get_allowance(env, owner, spender))
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: u128) -> Result<(), VaultError> {
    require_initialized(env)?;
    move_balance(env, from, to, amount)?;
    Transfer {
        from: Some(from.clone()),
        to: Some(to.clone()),
        amount,
    }
    .publish(env);
    Ok(())
}

/// Spend `spender`'s allowance from `from`. Every call decrements the
/// stored allowance; there is no unlimited value.
pub fn transfer_from(
    env: &Env,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: u128,
) -> Result<(), VaultError> {
    require_initialized(env)?;
    if get_balance(env, from) < amount {
        return Err(VaultError::InsufficientBalance);
    }
    let allowed = get_allowance(env, from, spender);
    if allowed < amount {
        return Err(VaultError::InsufficientAllowance);
    }

    move_balance(env, from, to, amount)?;
    set_allowance(env, from, spender, allowed - amount);

    Transfer {
        from: Some(from.clone()),
        to: Some(to.clone()),
        amount,
    }
    .publish(env);
    Ok(())
}

/// Overwrite the allowance
pub fn approve(
    env: &Env,
    owner: &Address,
    spender: &Address,
    amount: u128,
) -> Result<(), VaultError> {
    require_initialized(env)?;
    set_allowance(env, owner, spender, amount);
    Approval {
        owner: owner.clone(),
        spender: spender.clone(),
        amount,
    }
    .publish(env);
    Ok(())
}

/// Create `value` shares for `to`. Values at or below the dust floor fail.
pub fn mint(env: &Env, to: &Address, value: u128) -> Result<(), VaultError> {
    if value <= MINIMUM_MINT {
        return Err(VaultError::AmountTooSmall);
    }

    let mut info = get_share_info(env)?;
    info.total_supply = info
        .total_supply
        .checked_add(value)
        .ok_or(VaultError::Overflow)?;
    let credited = get_balance(env, to)
        .checked_add(value)
        .ok_or(VaultError::Overflow)?;

    set_share_info(env, &info);
    set_balance(env, to, credited);

    Mint {
        to: to.clone(),
        amount: value,
    }
    .publish(env);
    Transfer {
        from: None,
        to: Some(to.clone()),
        amount: value,
    }
    .publish(env);
    Ok(())
}

/// Destroy `value` of `from`'s shares
pub fn burn(env: &Env, from: &Address, value: u128) -> Result<(), VaultError> {
    let debited = get_balance(env, from)
        .checked_sub(value)
        .ok_or(VaultError::InsufficientBalance)?;
    let mut info = get_share_info(env)?;
    info.total_supply = info
        .total_supply
        .checked_sub(value)
        .ok_or(VaultError::Underflow)?;

    set_balance(env, from, debited);
    set_share_info(env, &info);

    Burn {
        from: from.clone(),
        amount: value,
    }
    .publish(env);
    Transfer {
        from: Some(from.clone()),
        to: None,
        amount: value,
    }
    .publish(env);
    Ok(())
}

fn require_initialized(env: &Env) -> Result<(), VaultError> {
    if !is_initialized(env) {
        return Err(VaultError::NotInitialized);
    }
    Ok(())
}

/// Debit then credit. The credit re-reads after the debit so a transfer to
/// oneself nets to zero.
fn move_balance(env: &Env, from: &Address, to: &Address, amount: u128) -> Result<(), VaultError> {
    let from_balance = get_balance(env, from);
    if from_balance < amount {
        return Err(VaultError::InsufficientBalance);
    }
    set_balance(env, from, from_balance - amount);

    let to_balance = get_balance(env, to)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    set_balance(env, to, to_balance);
    Ok(())
}
