//! Balances held in process memory.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::TransferError;
use crate::traits::TokenLedger;

/// Code reported when the sender cannot cover the transfer.
pub const ERR_INSUFFICIENT_BALANCE: u32 = 1;

/// Code reported for transfers of a token marked with
/// [`InMemoryLedger::fail_transfers_of`].
pub const ERR_TRANSFER_REFUSED: u32 = 2;

/// Code reported when crediting the recipient would overflow.
pub const ERR_BALANCE_OVERFLOW: u32 = 3;

/// A multi-token ledger keeping every balance in a map.
///
/// Balances start at zero and are created with [`mint`](Self::mint).
/// Transfers of a token can be made to fail on demand, which lets callers
/// exercise rollback paths.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{AccountId, Amount, TokenId};
/// use pairswap::ledger::InMemoryLedger;
/// use pairswap::traits::TokenLedger;
///
/// let ledger = InMemoryLedger::new();
/// let token = TokenId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
/// let bob = AccountId::from_bytes([11u8; 32]);
///
/// ledger.mint(&token, &alice, Amount::new(500)).expect("mint");
/// ledger.transfer(&token, Amount::new(200), &alice, &bob).expect("transfer");
/// assert_eq!(ledger.balance_of(&token, &bob), Amount::new(200));
///
/// ledger.fail_transfers_of(&token);
/// let err = ledger.transfer(&token, Amount::new(1), &alice, &bob).unwrap_err();
/// assert_eq!(err.code(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<(TokenId, AccountId), Amount>>,
    failing: Mutex<HashSet<TokenId>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` of `token` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] with [`ERR_BALANCE_OVERFLOW`] if the
    /// balance would overflow.
    pub fn mint(
        &self,
        token: &TokenId,
        account: &AccountId,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut balances = self.balances.lock();
        let entry = balances.entry((*token, *account)).or_default();
        *entry = entry
            .checked_add(&amount)
            .ok_or(TransferError::new(ERR_BALANCE_OVERFLOW, "balance overflow"))?;
        Ok(())
    }

    /// Returns `account`'s balance of `token`.
    #[must_use]
    pub fn balance_of(&self, token: &TokenId, account: &AccountId) -> Amount {
        self.balances
            .lock()
            .get(&(*token, *account))
            .copied()
            .unwrap_or_default()
    }

    /// Makes every later transfer of `token` fail with
    /// [`ERR_TRANSFER_REFUSED`].
    pub fn fail_transfers_of(&self, token: &TokenId) {
        self.failing.lock().insert(*token);
    }

    /// Lets transfers of every token succeed again.
    pub fn clear_failures(&self) {
        self.failing.lock().clear();
    }
}

impl TokenLedger for InMemoryLedger {
    fn transfer(
        &self,
        token: &TokenId,
        amount: Amount,
        sender: &AccountId,
        recipient: &AccountId,
    ) -> Result<(), TransferError> {
        if self.failing.lock().contains(token) {
            return Err(TransferError::new(
                ERR_TRANSFER_REFUSED,
                "transfers of this token are refused",
            ));
        }

        let mut balances = self.balances.lock();
        let from = balances.get(&(*token, *sender)).copied().unwrap_or_default();
        let debited = from.checked_sub(&amount).ok_or(TransferError::new(
            ERR_INSUFFICIENT_BALANCE,
            "insufficient balance",
        ))?;
        if sender == recipient {
            return Ok(());
        }
        let to = balances
            .get(&(*token, *recipient))
            .copied()
            .unwrap_or_default();
        let credited = to
            .checked_add(&amount)
            .ok_or(TransferError::new(ERR_BALANCE_OVERFLOW, "balance overflow"))?;
        balances.insert((*token, *sender), debited);
        balances.insert((*token, *recipient), credited);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok() -> TokenId {
        TokenId::from_bytes([1u8; 32])
    }

    fn acct(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    #[test]
    fn transfer_moves_balance() {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(&tok(), &acct(1), Amount::new(100)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.transfer(&tok(), Amount::new(40), &acct(1), &acct(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(&tok(), &acct(1)), Amount::new(60));
        assert_eq!(ledger.balance_of(&tok(), &acct(2)), Amount::new(40));
    }

    #[test]
    fn insufficient_balance_is_code_one() {
        let ledger = InMemoryLedger::new();
        let Err(err) = ledger.transfer(&tok(), Amount::new(1), &acct(1), &acct(2)) else {
            panic!("expected Err");
        };
        assert_eq!(err.code(), ERR_INSUFFICIENT_BALANCE);
        assert_eq!(ledger.balance_of(&tok(), &acct(2)), Amount::ZERO);
    }

    #[test]
    fn injected_failure_moves_nothing() {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(&tok(), &acct(1), Amount::new(100)) else {
            panic!("expected Ok");
        };
        ledger.fail_transfers_of(&tok());
        let Err(err) = ledger.transfer(&tok(), Amount::new(10), &acct(1), &acct(2)) else {
            panic!("expected Err");
        };
        assert_eq!(err.code(), ERR_TRANSFER_REFUSED);
        assert_eq!(ledger.balance_of(&tok(), &acct(1)), Amount::new(100));

        ledger.clear_failures();
        assert!(ledger.transfer(&tok(), Amount::new(10), &acct(1), &acct(2)).is_ok());
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(&tok(), &acct(1), Amount::new(5)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.transfer(&tok(), Amount::new(5), &acct(1), &acct(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(&tok(), &acct(1)), Amount::new(5));
    }
}
