#![no_std]

mod access;
mod events;
mod guard;
mod ledger;
mod storage;

pub mod calibration;
pub mod error;
pub mod invariants;
pub mod permit;
pub mod shares;
pub mod vault;

pub use error::VaultError;

use ledger::AssetLedger;
use pmm_types::{
    CalibrationParams, PmmState, PoolState, RState, ShareInfo, VaultConfig, MAX_ORACLE_PRICE,
    ONE, PRICE_LIMIT_SCALE,
};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String};
use storage::{get_config, get_share_info, get_state, set_config, set_share_info, set_state};

#[contract]
pub struct PmmVault;

#[contractimpl]
impl PmmVault {
    /// Initialize the vault
    ///
    /// # Arguments
    /// * `admin` - Controls the price limit and oracle price
    /// * `maintainer` - Controls fee rates, K, and receives maintainer fees
    /// * `base_token` / `quote_token` - The two pooled assets
    /// * `params` - Initial oracle price, K, price limit and fee rates
    pub fn init(
        env: Env,
        admin: Address,
        maintainer: Address,
        base_token: Address,
        quote_token: Address,
        params: CalibrationParams,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return Err(VaultError::AlreadyInitialized);
        }
        if base_token == quote_token {
            return Err(VaultError::InvalidParameter);
        }
        validate_params(&params)?;

        let decimals = AssetLedger::new(&env, &base_token).decimals();

        let config = VaultConfig {
            base_token,
            quote_token,
            admin,
            maintainer,
            domain_separator: permit::compute_domain_separator(&env),
        };
        set_config(&env, &config);
        set_state(&env, &PoolState::new(&params));
        set_share_info(
            &env,
            &ShareInfo {
                name: String::from_str(&env, permit::SHARE_NAME),
                symbol: String::from_str(&env, permit::SHARE_SYMBOL),
                decimals,
                total_supply: 0,
            },
        );

        log!(&env, "vault initialized, i = {}", params.i);
        Ok(())
    }

    // === Reserve & fee engine ===

    /// (base_reserve, quote_reserve)
    pub fn get_vault_reserve(env: Env) -> Result<(u128, u128), VaultError> {
        vault::get_vault_reserve(&env)
    }

    /// (lp_fee_rate, mt_fee_rate); the same for every user
    pub fn get_user_fee_rate(env: Env, user: Address) -> Result<(u128, u128), VaultError> {
        vault::get_user_fee_rate(&env, &user)
    }

    /// (mt_fee_base, mt_fee_quote)
    pub fn get_mt_fee_total(env: Env) -> Result<(u128, u128), VaultError> {
        vault::get_mt_fee_total(&env)
    }

    pub fn get_base_input(env: Env) -> Result<u128, VaultError> {
        vault::get_base_input(&env)
    }

    pub fn get_quote_input(env: Env) -> Result<u128, VaultError> {
        vault::get_quote_input(&env)
    }

    /// Reconcile reserves with observed balances
    ///
    /// # Returns
    /// (base_reserve, quote_reserve) after reconciliation
    pub fn sync(env: Env) -> Result<(u128, u128), VaultError> {
        vault::sync(&env)
    }

    /// Pay all accrued maintainer fees to the maintainer
    ///
    /// # Returns
    /// (base_amount, quote_amount) paid
    pub fn withdraw_mt_fee_total(env: Env, caller: Address) -> Result<(u128, u128), VaultError> {
        vault::withdraw_mt_fee_total(&env, &caller)
    }

    // === Calibration ===

    pub fn adjust_price_limit(env: Env, caller: Address, new_limit: u128) -> Result<(), VaultError> {
        calibration::adjust_price_limit(&env, &caller, new_limit)
    }

    pub fn adjust_price(env: Env, caller: Address, new_i: u128) -> Result<(), VaultError> {
        calibration::adjust_price(&env, &caller, new_i)
    }

    pub fn adjust_mt_fee_rate(env: Env, caller: Address, new_rate: u128) -> Result<(), VaultError> {
        calibration::adjust_mt_fee_rate(&env, &caller, new_rate)
    }

    pub fn adjust_lp_fee_rate(env: Env, caller: Address, new_rate: u128) -> Result<(), VaultError> {
        calibration::adjust_lp_fee_rate(&env, &caller, new_rate)
    }

    pub fn adjust_k(env: Env, caller: Address, new_k: u128) -> Result<(), VaultError> {
        calibration::adjust_k(&env, &caller, new_k)
    }

    /// Returns the R-state after correction
    pub fn correct_r_state(env: Env) -> Result<RState, VaultError> {
        calibration::correct_r_state(&env)
    }

    // === Share ledger ===

    pub fn transfer(env: Env, from: Address, to: Address, amount: u128) -> Result<(), VaultError> {
        from.require_auth();
        shares::transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: u128,
    ) -> Result<(), VaultError> {
        spender.require_auth();
        shares::transfer_from(&env, &spender, &from, &to, amount)
    }

    pub fn approve(env: Env, owner: Address, spender: Address, amount: u128) -> Result<(), VaultError> {
        owner.require_auth();
        shares::approve(&env, &owner, &spender, amount)
    }

    /// Approve by signature. Needs no authorization from `owner`.
    pub fn permit(
        env: Env,
        owner: Address,
        spender: Address,
        value: u128,
        deadline: u64,
        public_key: BytesN<32>,
        signature: BytesN<64>,
    ) -> Result<(), VaultError> {
        permit::permit(&env, &owner, &spender, value, deadline, &public_key, &signature)
    }

    // === View Functions ===

    pub fn get_state(env: Env) -> Result<PoolState, VaultError> {
        get_state(&env)
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, VaultError> {
        get_config(&env)
    }

    /// Parameters for the external pricing curve
    pub fn get_pmm_state(env: Env) -> Result<PmmState, VaultError> {
        calibration::get_pmm_state(&env)
    }

    pub fn get_r_state(env: Env) -> Result<RState, VaultError> {
        Ok(get_state(&env)?.r_state)
    }

    pub fn get_oracle_price(env: Env) -> Result<u128, VaultError> {
        Ok(get_state(&env)?.i)
    }

    pub fn get_price_limit(env: Env) -> Result<u128, VaultError> {
        Ok(get_state(&env)?.price_limit)
    }

    pub fn admin(env: Env) -> Result<Address, VaultError> {
        Ok(get_config(&env)?.admin)
    }

    pub fn maintainer(env: Env) -> Result<Address, VaultError> {
        Ok(get_config(&env)?.maintainer)
    }

    pub fn balance(env: Env, id: Address) -> Result<u128, VaultError> {
        shares::balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> Result<u128, VaultError> {
        shares::total_supply(&env)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> Result<u128, VaultError> {
        shares::allowance(&env, &owner, &spender)
    }

    pub fn nonces(env: Env, owner: Address) -> Result<u64, VaultError> {
        if !storage::is_initialized(&env) {
            return Err(VaultError::NotInitialized);
        }
        Ok(storage::get_nonce(&env, &owner))
    }

    pub fn name(env: Env) -> Result<String, VaultError> {
        Ok(get_share_info(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, VaultError> {
        Ok(get_share_info(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, VaultError> {
        Ok(get_share_info(&env)?.decimals)
    }

    pub fn domain_separator(env: Env) -> Result<BytesN<32>, VaultError> {
        Ok(get_config(&env)?.domain_separator)
    }

    /// The message `owner` must sign to permit `spender`
    pub fn permit_digest(
        env: Env,
        owner: Address,
        spender: Address,
        value: u128,
        nonce: u64,
        deadline: u64,
    ) -> Result<BytesN<32>, VaultError> {
        let config = get_config(&env)?;
        Ok(permit::permit_digest(
            &env,
            &config.domain_separator,
            &owner,
            &spender,
            value,
            nonce,
            deadline,
        ))
    }
}

fn validate_params(params: &CalibrationParams) -> Result<(), VaultError> {
    if params.i == 0 || params.i > MAX_ORACLE_PRICE {
        return Err(VaultError::InvalidParameter);
    }
    if params.k > ONE || params.lp_fee_rate > ONE || params.mt_fee_rate > ONE {
        return Err(VaultError::InvalidParameter);
    }
    if params.price_limit > PRICE_LIMIT_SCALE {
        return Err(VaultError::InvalidParameter);
    }
    Ok(())
}
