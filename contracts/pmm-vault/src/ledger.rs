use crate::error::VaultError;
use soroban_sdk::{token, Address, Env};

/// The external asset ledger for one of the pool's two assets, reached
/// through the SEP-41 token interface.
pub struct AssetLedger<'a> {
    client: token::Client<'a>,
}

impl<'a> AssetLedger<'a> {
    pub fn new(env: &Env, token: &Address) -> Self {
        Self {
            client: token::Client::new(env, token),
        }
    }

    /// Observed balance. A negative balance can only come from a broken
    /// token and is reported as an underflow.
    pub fn balance_of(&self, id: &Address) -> Result<u128, VaultError> {
        u128::try_from(self.client.balance(id)).map_err(|_| VaultError::Underflow)
    }

    /// Move `amount` from `from` to `to`. Zero amounts skip the call.
    pub fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), VaultError> {
        if amount == 0 {
            return Ok(());
        }
        let amount = i128::try_from(amount).map_err(|_| VaultError::Overflow)?;
        self.client.transfer(from, to, &amount);
        Ok(())
    }

    pub fn decimals(&self) -> u32 {
        self.client.decimals()
    }
}
