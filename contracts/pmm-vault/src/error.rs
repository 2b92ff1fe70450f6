use soroban_sdk::contracterror;

/// Failure reasons. Every variant aborts the enclosing invocation and rolls
/// back its storage writes.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// Vault has not been initialized
    NotInitialized = 1,
    /// init called on an initialized vault
    AlreadyInitialized = 2,
    /// Caller does not hold the required role
    AccessDenied = 3,
    /// Rate, limit or price outside its declared range
    InvalidParameter = 4,
    /// Oracle price move larger than the configured price limit
    ExceedLimit = 5,
    /// Share balance too low for the debit
    InsufficientBalance = 6,
    /// Spender allowance too low for the transfer
    InsufficientAllowance = 7,
    /// Value exceeds its storage width
    Overflow = 8,
    /// Observed balance below tracked reserve plus accrued fee
    Underflow = 9,
    /// Permit deadline has passed
    Expired = 10,
    /// Permit signer does not match the owner
    InvalidSignature = 11,
    /// Share mint at or below the dust floor
    AmountTooSmall = 12,
    /// Guarded operation entered while already in progress
    Reentrant = 13,
}
