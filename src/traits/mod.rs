//! Core trait abstractions.
//!
//! [`SwapPool`] and [`LiquidityPool`] describe what a pool can do;
//! [`TokenLedger`] is the seam to the external token ledgers the exchange
//! moves balances on.

mod liquidity_pool;
mod swap_pool;
mod token_ledger;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
pub use token_ledger::TokenLedger;
