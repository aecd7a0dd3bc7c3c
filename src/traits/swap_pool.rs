//! Core swap trait for pricing and executing trades.
//!
//! [`SwapPool`] covers the trading half of a pool's lifecycle:
//!
//! 1. **Quote exact-in**: [`SwapPool::quote_amount_out`]
//! 2. **Quote exact-out**: [`SwapPool::quote_amount_in`]
//! 3. **Execute**: [`SwapPool::swap`] moves the reserves.
//! 4. **Inspect**: [`SwapPool::key`] and [`SwapPool::reserve`].
//!
//! # Fee Retention Invariant
//!
//! The fee is taken from the input before pricing and stays inside the
//! pool, so the product of the reserves never decreases across a swap:
//!
//! ```text
//! reserve_a' × reserve_b' ≥ reserve_a × reserve_b
//! ```

use crate::domain::{Amount, PoolKey, Side, SwapReceipt};
use crate::error::ExchangeError;

/// Trait for pools that price and execute swaps between their two tokens.
///
/// The trade direction is expressed as the [`Side`] of the pool key the
/// input token sits on; the output is always the opposite side.
///
/// # Errors
///
/// Fallible methods return [`Result<T, ExchangeError>`].  Common variants:
///
/// - [`ExchangeError::InvalidAmount`]: zero input or output requested
/// - [`ExchangeError::InsufficientLiquidity`]: a reserve is zero, the
///   output would floor to zero, or the output exceeds the reserve
/// - [`ExchangeError::Overflow`]: intermediate arithmetic overflowed
pub trait SwapPool {
    /// Returns the ordered pair this pool trades.
    #[must_use]
    fn key(&self) -> &PoolKey;

    /// Returns the reserve held on `side`.
    #[must_use]
    fn reserve(&self, side: Side) -> Amount;

    /// Output paid for selling exactly `amount_in` of the token on `side_in`.
    ///
    /// Pure; the pool is not modified.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if `amount_in` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if a reserve is zero or
    ///   the output floors to zero.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    fn quote_amount_out(&self, side_in: Side, amount_in: Amount) -> Result<Amount, ExchangeError>;

    /// Input required on `side_in` to receive at least `amount_out`.
    ///
    /// Rounded up so that selling the returned amount yields no less than
    /// `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if `amount_out` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if `amount_out` is not
    ///   strictly below the output reserve.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    fn quote_amount_in(&self, side_in: Side, amount_out: Amount) -> Result<Amount, ExchangeError>;

    /// Sells exactly `amount_in` on `side_in` and updates both reserves.
    ///
    /// Either both reserves change or neither does.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::quote_amount_out`].
    fn swap(&mut self, side_in: Side, amount_in: Amount) -> Result<SwapReceipt, ExchangeError>;
}
