//! Token ledger implementations.
//!
//! The exchange only depends on the [`TokenLedger`](crate::traits::TokenLedger)
//! trait.  [`InMemoryLedger`] is a self-contained implementation for tests,
//! simulations and embedding the exchange without a real token backend.

mod memory;

pub use memory::{
    ERR_BALANCE_OVERFLOW, ERR_INSUFFICIENT_BALANCE, ERR_TRANSFER_REFUSED, InMemoryLedger,
};
