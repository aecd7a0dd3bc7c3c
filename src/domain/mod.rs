//! Fundamental domain value types used throughout the exchange.
//!
//! Token and account identities, amounts, LP shares, block heights, the
//! reward index, positions, and the receipts returned by operations.  All
//! numeric types are newtypes over `u128`/`u64` with checked arithmetic.

mod amount;
mod block_height;
mod call_context;
mod liquidity;
mod pool_key;
mod position;
mod receipts;
mod reward_index;
mod rounding;
mod token_id;

pub use amount::Amount;
pub use block_height::BlockHeight;
pub use call_context::CallContext;
pub use liquidity::Liquidity;
pub use pool_key::{PoolKey, Side};
pub use position::LiquidityPosition;
pub use receipts::{AddLiquidityReceipt, LiquidityQuote, RemoveLiquidityReceipt, SwapReceipt};
pub use reward_index::RewardIndex;
pub use rounding::Rounding;
pub use token_id::{AccountId, TokenId};
