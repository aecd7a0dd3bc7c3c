//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pairswap::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, AddLiquidityReceipt, Amount, BlockHeight, CallContext, Liquidity, LiquidityQuote,
    PoolKey, RemoveLiquidityReceipt, RewardIndex, SwapReceipt, TokenId,
};

pub use crate::traits::{LiquidityPool, SwapPool, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::ExchangeConfig;

pub use crate::error::{ExchangeError, Result, TransferError};

pub use crate::exchange::{Exchange, PoolInfo, PositionInfo};

pub use crate::ledger::InMemoryLedger;
