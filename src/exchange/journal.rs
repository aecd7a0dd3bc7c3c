//! Compensating log of the transfers made by one operation.

use tracing::{error, warn};

use crate::domain::{AccountId, Amount, TokenId};
use crate::error::ExchangeError;
use crate::traits::TokenLedger;

#[derive(Debug, Clone, Copy)]
struct Transfer {
    token: TokenId,
    amount: Amount,
    sender: AccountId,
    recipient: AccountId,
}

/// Performs the transfers of one operation and remembers them.
///
/// If a transfer fails, or the journal is dropped without
/// [`finish`](Self::finish), every transfer already made is reversed in
/// the opposite order.
pub(crate) struct TransferJournal<'a, L: TokenLedger> {
    ledger: &'a L,
    completed: Vec<Transfer>,
}

impl<'a, L: TokenLedger> TransferJournal<'a, L> {
    pub(crate) fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            completed: Vec::with_capacity(2),
        }
    }

    /// Moves `amount` of `token`.  Zero amounts are skipped.
    ///
    /// On failure the earlier transfers are reversed before the ledger's
    /// error is returned.
    pub(crate) fn transfer(
        &mut self,
        token: TokenId,
        amount: Amount,
        sender: AccountId,
        recipient: AccountId,
    ) -> Result<(), ExchangeError> {
        if amount.is_zero() {
            return Ok(());
        }
        if let Err(err) = self.ledger.transfer(&token, amount, &sender, &recipient) {
            warn!(
                %token,
                %amount,
                code = err.code(),
                reason = err.reason(),
                reverted = self.completed.len(),
                "transfer refused, reverting operation"
            );
            self.revert();
            return Err(err.into());
        }
        self.completed.push(Transfer {
            token,
            amount,
            sender,
            recipient,
        });
        Ok(())
    }

    /// Keeps every transfer made so far.
    pub(crate) fn finish(mut self) {
        self.completed.clear();
    }

    fn revert(&mut self) {
        while let Some(t) = self.completed.pop() {
            if let Err(err) = self
                .ledger
                .transfer(&t.token, t.amount, &t.recipient, &t.sender)
            {
                error!(
                    token = %t.token,
                    amount = %t.amount,
                    code = err.code(),
                    "compensating transfer failed"
                );
            }
        }
    }
}

impl<L: TokenLedger> Drop for TransferJournal<'_, L> {
    fn drop(&mut self) {
        self.revert();
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    fn acct(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn funded() -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        for t in [tok(1), tok(2)] {
            let Ok(()) = ledger.mint(&t, &acct(1), Amount::new(100)) else {
                panic!("expected Ok");
            };
        }
        ledger
    }

    #[test]
    fn failed_second_transfer_reverts_first() {
        let ledger = funded();
        ledger.fail_transfers_of(&tok(2));
        let mut journal = TransferJournal::new(&ledger);
        let Ok(()) = journal.transfer(tok(1), Amount::new(30), acct(1), acct(9)) else {
            panic!("expected Ok");
        };
        let Err(err) = journal.transfer(tok(2), Amount::new(30), acct(1), acct(9)) else {
            panic!("expected Err");
        };
        assert_eq!(err.code(), 2);
        assert_eq!(ledger.balance_of(&tok(1), &acct(1)), Amount::new(100));
        assert_eq!(ledger.balance_of(&tok(1), &acct(9)), Amount::ZERO);
    }

    #[test]
    fn dropping_unfinished_journal_reverts() {
        let ledger = funded();
        {
            let mut journal = TransferJournal::new(&ledger);
            let Ok(()) = journal.transfer(tok(1), Amount::new(30), acct(1), acct(9)) else {
                panic!("expected Ok");
            };
        }
        assert_eq!(ledger.balance_of(&tok(1), &acct(1)), Amount::new(100));
    }

    #[test]
    fn finished_journal_keeps_transfers() {
        let ledger = funded();
        let mut journal = TransferJournal::new(&ledger);
        let Ok(()) = journal.transfer(tok(1), Amount::new(30), acct(1), acct(9)) else {
            panic!("expected Ok");
        };
        let Ok(()) = journal.transfer(tok(2), Amount::ZERO, acct(1), acct(9)) else {
            panic!("expected Ok");
        };
        journal.finish();
        assert_eq!(ledger.balance_of(&tok(1), &acct(9)), Amount::new(30));
    }
}
