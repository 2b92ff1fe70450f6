use soroban_sdk::{contractevent, Address};

// === Share ledger ===

/// Share movement. `from` is None on mint, `to` is None on burn.
#[contractevent]
pub struct Transfer {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub amount: u128,
}

#[contractevent]
pub struct Approval {
    #[topic]
    pub owner: Address,
    #[topic]
    pub spender: Address,
    pub amount: u128,
}

#[contractevent]
pub struct Mint {
    #[topic]
    pub to: Address,
    pub amount: u128,
}

#[contractevent]
pub struct Burn {
    #[topic]
    pub from: Address,
    pub amount: u128,
}

// === Reserve & fee engine ===

/// One per asset on maintainer fee withdrawal
#[contractevent]
pub struct MtFeeWithdrawn {
    #[topic]
    pub token: Address,
    #[topic]
    pub to: Address,
    pub amount: u128,
}

#[contractevent]
pub struct ReservesSynced {
    pub base_reserve: u128,
    pub quote_reserve: u128,
}

// === Calibration ===

#[contractevent]
pub struct PriceLimitChanged {
    pub old_limit: u128,
    pub new_limit: u128,
}

#[contractevent]
pub struct PriceChanged {
    pub old_i: u128,
    pub new_i: u128,
}

#[contractevent]
pub struct MtFeeRateChanged {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[contractevent]
pub struct LpFeeRateChanged {
    pub old_rate: u128,
    pub new_rate: u128,
}

#[contractevent]
pub struct KChanged {
    pub old_k: u128,
    pub new_k: u128,
}

/// Targets re-anchored at the current reserves
#[contractevent]
pub struct RStateCorrected {
    pub base_target: u128,
    pub quote_target: u128,
}
