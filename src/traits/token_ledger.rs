//! Seam to the external fungible-token ledgers.
//!
//! The exchange never holds balances itself.  Every movement of tokens,
//! whether a deposit into custody or a payout from it, goes through
//! [`TokenLedger::transfer`], and the exchange trusts its success or
//! failure signal.

use std::sync::Arc;

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::TransferError;

/// Transfer capability over any number of fungible tokens.
///
/// Implementations decide what a token identity refers to (a contract, a
/// mint, an in-memory map) and report refusals with a [`TransferError`]
/// whose code the exchange passes through unchanged.
///
/// # Contract
///
/// - A failed transfer must not move any balance.
/// - Transfers are independent; the exchange compensates earlier transfers
///   of an operation itself when a later one fails.
/// - Implementations may call back into the exchange; mutating calls made
///   that way are rejected with [`ExchangeError::Reentrancy`](crate::error::ExchangeError::Reentrancy).
pub trait TokenLedger {
    /// Moves `amount` of `token` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] carrying the ledger's own code when the
    /// transfer is refused.
    fn transfer(
        &self,
        token: &TokenId,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError>;
}

impl<T: TokenLedger + ?Sized> TokenLedger for &T {
    fn transfer(
        &self,
        token: &TokenId,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError> {
        (**self).transfer(token, amount, sender, recipient)
    }
}

impl<T: TokenLedger + ?Sized> TokenLedger for Arc<T> {
    fn transfer(
        &self,
        token: &TokenId,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError> {
        (**self).transfer(token, amount, sender, recipient)
    }
}
