//! # Pairswap
//!
//! Constant-product exchange core: ordered-pair pools, LP share minting,
//! fee-bearing swaps and per-block LP rewards paid as newly minted shares.
//!
//! Tokens never live inside the exchange.  Every deposit, payout and trade
//! leg is a transfer on an injected [`TokenLedger`](traits::TokenLedger)
//! between the trader and a single custody account.  The exchange only
//! keeps the accounting: reserves, LP supplies, positions and the reward
//! index of each pool.
//!
//! ## Create a pool, deposit and swap
//!
//! ```rust
//! use pairswap::prelude::*;
//!
//! let owner = AccountId::from_bytes([1u8; 32]);
//! let custody = AccountId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([3u8; 32]);
//! let x = TokenId::from_bytes([10u8; 32]);
//! let y = TokenId::from_bytes([11u8; 32]);
//!
//! let ledger = InMemoryLedger::new();
//! ledger.mint(&x, &alice, Amount::new(10_000_000)).expect("mint");
//! ledger.mint(&y, &alice, Amount::new(10_000_000)).expect("mint");
//!
//! let exchange = Exchange::new(ExchangeConfig::new(owner, custody).expect("config"), ledger)
//!     .expect("exchange");
//! let ctx = CallContext::new(alice, BlockHeight::new(1));
//!
//! exchange.create_pool(&ctx, x, y).expect("create");
//! exchange
//!     .add_liquidity(&ctx, x, y, Amount::new(1_000_000), Amount::new(1_000_000), Amount::ZERO, Amount::ZERO)
//!     .expect("add");
//!
//! let receipt = exchange
//!     .swap_tokens(&ctx, x, y, Amount::new(1_000), Amount::ZERO)
//!     .expect("swap");
//! assert_eq!(receipt.amount_out(), Amount::new(996));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Exchange   │  reentrancy lock, owner check, transfer journal
//! └──────┬───────┘
//!        │ copy out / commit back
//!        ▼
//! ┌──────────────┐
//! │ PoolRegistry │  pools by ordered pair, positions, reward rate
//! └──────┬───────┘
//!        │ SwapPool + LiquidityPool traits
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  ConstantProductPool + RewardAccumulator
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │    Domain    │  Amount, Liquidity, RewardIndex, PoolKey, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types and receipts |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`TokenLedger`](traits::TokenLedger) |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig) and reward-rate bounds |
//! | [`pools`]  | [`ConstantProductPool`](pools::ConstantProductPool) and reward accrual |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry): pool and position storage |
//! | [`exchange`] | [`Exchange`](exchange::Exchange): entry points and queries |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) reference ledger |
//! | [`guard`]  | Reentrancy lock and owner check |
//! | [`math`]   | Checked arithmetic and rounding division |
//! | [`error`]  | [`ExchangeError`](error::ExchangeError) with stable numeric codes |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod guard;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
