//! Signature-based approvals.
//!
//! An owner signs an off-band ed25519 message over (owner, spender, value,
//! nonce, deadline) bound to this vault and network. Anyone may submit it.
//! The owner's identity is the Stellar account derived from the signing key.

use crate::error::VaultError;
use crate::shares;
use crate::storage::{get_config, get_nonce, set_nonce};
use ed25519_dalek::{Signature, VerifyingKey};
use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{log, Address, Bytes, BytesN, Env};

/// Share token name, also the permit domain name
pub const SHARE_NAME: &str = "PMM Vault Share";
pub const SHARE_SYMBOL: &str = "PVS";
pub const PERMIT_VERSION: &str = "1";

/// sha256("Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)")
pub const PERMIT_TYPEHASH: [u8; 32] = [
    0x18, 0x26, 0xa2, 0xc3, 0x67, 0x14, 0x46, 0xbf, 0x21, 0x28, 0x37, 0x05, 0xe2, 0x07, 0xbe, 0x97,
    0xfe, 0xb5, 0x8a, 0xaa, 0x03, 0x5c, 0xfc, 0x9c, 0x68, 0xb4, 0x60, 0x94, 0x60, 0x51, 0x23, 0x25,
];

const DIGEST_PREFIX: [u8; 2] = [0x19, 0x01];

/// Strkey version byte for ed25519 account ids ('G')
const ACCOUNT_ID_VERSION: u8 = 6 << 3;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// sha256(name || version || network id || xdr(vault address)).
/// Computed once at init.
pub fn compute_domain_separator(env: &Env) -> BytesN<32> {
    let mut msg = Bytes::from_slice(env, SHARE_NAME.as_bytes());
    msg.extend_from_slice(PERMIT_VERSION.as_bytes());
    msg.extend_from_array(&env.ledger().network_id().to_array());
    msg.append(&env.current_contract_address().to_xdr(env));
    env.crypto().sha256(&msg).to_bytes()
}

/// The 32-byte message an owner signs
pub fn permit_digest(
    env: &Env,
    domain_separator: &BytesN<32>,
    owner: &Address,
    spender: &Address,
    value: u128,
    nonce: u64,
    deadline: u64,
) -> BytesN<32> {
    let mut body = Bytes::from_array(env, &PERMIT_TYPEHASH);
    body.append(&owner.clone().to_xdr(env));
    body.append(&spender.clone().to_xdr(env));
    body.extend_from_array(&value.to_be_bytes());
    body.extend_from_array(&nonce.to_be_bytes());
    body.extend_from_array(&deadline.to_be_bytes());
    let struct_hash = env.crypto().sha256(&body);

    let mut msg = Bytes::from_array(env, &DIGEST_PREFIX);
    msg.extend_from_array(&domain_separator.to_array());
    msg.extend_from_array(&struct_hash.to_array());
    env.crypto().sha256(&msg).to_bytes()
}

/// Approve `spender` for `value` of `owner`'s shares on the strength of
/// `owner`'s signature.
///
/// The owner's current nonce is consumed by every call, so a signature
/// verifies at most once.
pub fn permit(
    env: &Env,
    owner: &Address,
    spender: &Address,
    value: u128,
    deadline: u64,
    public_key: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), VaultError> {
    if deadline < env.ledger().timestamp() {
        return Err(VaultError::Expired);
    }

    let config = get_config(env)?;
    let nonce = get_nonce(env, owner);
    set_nonce(env, owner, nonce.checked_add(1).ok_or(VaultError::Overflow)?);
    let digest = permit_digest(
        env,
        &config.domain_separator,
        owner,
        spender,
        value,
        nonce,
        deadline,
    );

    let signer = recover_signer(env, public_key).ok_or(VaultError::InvalidSignature)?;
    if signer != *owner {
        return Err(VaultError::InvalidSignature);
    }
    if !signature_valid(public_key, &digest, signature) {
        log!(env, "permit signature rejected");
        return Err(VaultError::InvalidSignature);
    }

    shares::approve(env, owner, spender, value)
}

/// Strict ed25519 check of `signature` over `digest`. Never traps; a key
/// that is not a valid curve point fails like a bad signature.
fn signature_valid(public_key: &BytesN<32>, digest: &BytesN<32>, signature: &BytesN<64>) -> bool {
    let signature = Signature::from_bytes(&signature.to_array());
    VerifyingKey::from_bytes(&public_key.to_array())
        .and_then(|key| key.verify_strict(&digest.to_array(), &signature))
        .is_ok()
}

/// The account that owns `public_key`, or None for the all-zero key
fn recover_signer(env: &Env, public_key: &BytesN<32>) -> Option<Address> {
    let key = public_key.to_array();
    if key.iter().all(|b| *b == 0) {
        return None;
    }
    Some(account_address(env, &key))
}

/// Stellar account address (G...) for an ed25519 public key
pub fn account_address(env: &Env, public_key: &[u8; 32]) -> Address {
    let strkey = encode_account_strkey(public_key);
    Address::from_string_bytes(&Bytes::from_array(env, &strkey))
}

/// version byte || key || crc16 (little endian), base32 without padding
fn encode_account_strkey(public_key: &[u8; 32]) -> [u8; 56] {
    let mut raw = [0u8; 35];
    raw[0] = ACCOUNT_ID_VERSION;
    raw[1..33].copy_from_slice(public_key);
    let checksum = crc16_xmodem(&raw[..33]);
    raw[33..].copy_from_slice(&checksum.to_le_bytes());

    // 35 bytes = 7 groups of 5 bytes = 56 characters
    let mut out = [0u8; 56];
    for (group, chunk) in raw.chunks(5).enumerate() {
        let mut bits: u64 = 0;
        for byte in chunk {
            bits = (bits << 8) | *byte as u64;
        }
        for i in 0..8 {
            let index = (bits >> (35 - 5 * i)) & 0x1f;
            out[group * 8 + i] = BASE32_ALPHABET[index as usize];
        }
    }
    out
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}
