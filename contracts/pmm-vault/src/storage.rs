use crate::error::VaultError;
use pmm_types::{AllowanceKey, PoolState, ShareInfo, VaultConfig};
use soroban_sdk::{contracttype, Address, Env};

// ============================================================================
// STORAGE LAYOUT
// ============================================================================
// Instance storage (one entry each, read on nearly every call):
//   Config, State, ShareInfo, ReentrancyGuard
//
// Persistent storage (one entry per holder or holder pair):
//   Balance(holder), Allowance(owner, spender), Nonce(holder)
//
// Balances and allowances are written back even when they reach zero so a
// holder's entry never leaves the ledger once created.
// ============================================================================

/// Storage keys for the vault contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vault configuration (Instance storage)
    Config,
    /// Reserve, fee and calibration state (Instance storage)
    State,
    /// Share metadata and total supply (Instance storage)
    ShareInfo,
    /// Single-flight flag for guarded operations (Instance storage)
    ReentrancyGuard,
    /// Share balance: holder -> u128 (Persistent storage)
    Balance(Address),
    /// Allowance: (owner, spender) -> u128 (Persistent storage)
    Allowance(AllowanceKey),
    /// Permit nonce: holder -> u64 (Persistent storage)
    Nonce(Address),
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReentrancyGuard {
    pub locked: bool,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<VaultConfig, VaultError> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(VaultError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<PoolState, VaultError> {
    let state = env
        .storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(VaultError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(state)
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Share info ===

pub fn get_share_info(env: &Env) -> Result<ShareInfo, VaultError> {
    let info = env
        .storage()
        .instance()
        .get(&DataKey::ShareInfo)
        .ok_or(VaultError::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(info)
}

pub fn set_share_info(env: &Env, info: &ShareInfo) {
    env.storage().instance().set(&DataKey::ShareInfo, info);
    extend_instance_ttl(env);
}

// === Reentrancy guard ===

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, ReentrancyGuard>(&DataKey::ReentrancyGuard)
        .map(|guard| guard.locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &ReentrancyGuard { locked });
}

// === Balance ===

pub fn get_balance(env: &Env, holder: &Address) -> u128 {
    let key = DataKey::Balance(holder.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_balance(env: &Env, holder: &Address, amount: u128) {
    let key = DataKey::Balance(holder.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}

// === Allowance ===

pub fn get_allowance(env: &Env, owner: &Address, spender: &Address) -> u128 {
    let key = DataKey::Allowance(AllowanceKey {
        owner: owner.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: u128) {
    let key = DataKey::Allowance(AllowanceKey {
        owner: owner.clone(),
        spender: spender.clone(),
    });
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}

// === Nonce ===

pub fn get_nonce(env: &Env, holder: &Address) -> u64 {
    let key = DataKey::Nonce(holder.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

pub fn set_nonce(env: &Env, holder: &Address, nonce: u64) {
    let key = DataKey::Nonce(holder.clone());
    env.storage().persistent().set(&key, &nonce);
    extend_persistent_ttl(env, &key);
}
