//! Liquidity management trait extending [`SwapPool`].
//!
//! [`LiquidityPool`] adds proportional minting and burning of LP shares on
//! top of the swap functionality provided by [`SwapPool`].
//!
//! # Supply Accounting Invariant
//!
//! The LP supply reported by [`LiquidityPool::lp_total_supply`] equals the
//! sum of all provider balances.  It changes only through
//! [`LiquidityPool::add_liquidity`], [`LiquidityPool::remove_liquidity`]
//! and reward settlement; swaps never touch it.

use super::SwapPool;
use crate::domain::{
    AddLiquidityReceipt, Amount, Liquidity, LiquidityQuote, RemoveLiquidityReceipt,
};
use crate::error::ExchangeError;

/// Trait for pools that issue LP shares against deposits of both tokens.
///
/// # Errors
///
/// Fallible methods return [`Result<T, ExchangeError>`].  Common variants:
///
/// - [`ExchangeError::InvalidAmount`]: zero amounts or a zero mint
/// - [`ExchangeError::SlippageExceeded`]: an amount fell below its minimum
/// - [`ExchangeError::Overflow`]: intermediate arithmetic overflowed
pub trait LiquidityPool: SwapPool {
    /// Returns the total LP shares outstanding.
    #[must_use]
    fn lp_total_supply(&self) -> Liquidity;

    /// Amounts a deposit of up to `(amount_a_desired, amount_b_desired)`
    /// would actually take, preserving the current reserve ratio.
    ///
    /// An empty pool accepts the desired amounts as they are.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if either desired amount is zero.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    fn quote_liquidity(
        &self,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Result<LiquidityQuote, ExchangeError>;

    /// Deposits the ratio-adjusted amounts and mints LP shares for them.
    ///
    /// The minimums are checked against the adjusted amounts before the
    /// pool changes.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if a desired amount is zero, a
    ///   minimum exceeds its desired amount, or nothing would be minted.
    /// - [`ExchangeError::SlippageExceeded`] if an adjusted amount is below
    ///   its minimum.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    fn add_liquidity(
        &mut self,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<AddLiquidityReceipt, ExchangeError>;

    /// Burns `liquidity` shares and releases the proportional reserves.
    ///
    /// Amounts are floored; the dust stays with the remaining providers.
    /// The caller is responsible for checking that the burner holds the
    /// shares.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidAmount`] if `liquidity` is zero.
    /// - [`ExchangeError::InsufficientBalance`] if `liquidity` exceeds the
    ///   total supply.
    /// - [`ExchangeError::SlippageExceeded`] if a released amount is below
    ///   its minimum.
    fn remove_liquidity(
        &mut self,
        liquidity: Liquidity,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<RemoveLiquidityReceipt, ExchangeError>;
}
