use soroban_sdk::{contracttype, Address, BytesN};

/// Which side of the target equilibrium currently holds a surplus
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RState {
    /// Reserves sit at their targets
    One = 0,
    /// Base is in surplus, quote below target
    AboveOne = 1,
    /// Quote is in surplus, base below target
    BelowOne = 2,
}

/// Mutable pool accounting - stored in Instance storage
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Tracked base reserve (112-bit bound)
    pub base_reserve: u128,
    /// Tracked quote reserve (112-bit bound)
    pub quote_reserve: u128,
    /// Accrued, unwithdrawn maintainer fee in base (112-bit bound)
    pub mt_fee_base: u128,
    /// Accrued, unwithdrawn maintainer fee in quote (112-bit bound)
    pub mt_fee_quote: u128,
    /// Balanced base level under the last R-state transition
    pub base_target: u128,
    /// Balanced quote level under the last R-state transition
    pub quote_target: u128,
    pub r_state: RState,
    /// Oracle price I (18 decimals)
    pub i: u128,
    /// Curve steepness K (18 decimals, <= 1e18)
    pub k: u128,
    /// Max relative one-step oracle move, scaled by 1e6
    pub price_limit: u128,
    /// LP fee rate (18 decimals, <= 1e18)
    pub lp_fee_rate: u128,
    /// Maintainer fee rate (18 decimals, <= 1e18)
    pub mt_fee_rate: u128,
}

impl PoolState {
    pub fn new(params: &CalibrationParams) -> Self {
        Self {
            base_reserve: 0,
            quote_reserve: 0,
            mt_fee_base: 0,
            mt_fee_quote: 0,
            base_target: 0,
            quote_target: 0,
            r_state: RState::One,
            i: params.i,
            k: params.k,
            price_limit: params.price_limit,
            lp_fee_rate: params.lp_fee_rate,
            mt_fee_rate: params.mt_fee_rate,
        }
    }

    /// Snapshot handed to the external pricing curve
    pub fn pmm_state(&self) -> PmmState {
        PmmState {
            i: self.i,
            k: self.k,
            b: self.base_reserve,
            q: self.quote_reserve,
            b0: self.base_target,
            q0: self.quote_target,
            r: self.r_state,
        }
    }
}

/// Initial calibration supplied at init
#[contracttype]
#[derive(Clone, Debug)]
pub struct CalibrationParams {
    pub i: u128,
    pub k: u128,
    pub price_limit: u128,
    pub lp_fee_rate: u128,
    pub mt_fee_rate: u128,
}

/// Pool configuration - fixed after init
#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultConfig {
    /// Base asset token contract
    pub base_token: Address,
    /// Quote asset token contract
    pub quote_token: Address,
    /// Controls price limit and oracle price
    pub admin: Address,
    /// Controls fee rates, K, and fee withdrawal
    pub maintainer: Address,
    /// Permit domain separator, computed once at init
    pub domain_separator: BytesN<32>,
}

/// Curve inputs: oracle price, steepness, reserves, targets and R-state
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PmmState {
    pub i: u128,
    pub k: u128,
    pub b: u128,
    pub q: u128,
    pub b0: u128,
    pub q0: u128,
    pub r: RState,
}
