use soroban_sdk::{contracttype, Address, String};

/// Key for a delegated-spend allowance
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceKey {
    pub owner: Address,
    pub spender: Address,
}

/// Share token metadata plus running supply
#[contracttype]
#[derive(Clone, Debug)]
pub struct ShareInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    /// Equals the sum of all holder balances
    pub total_supply: u128,
}
