//! A provider's share holding in one pool.

use core::fmt;

use super::{Liquidity, RewardIndex};
use crate::error::ExchangeError;

/// LP balance and reward checkpoint of one provider in one pool.
///
/// Positions are created on a provider's first deposit and never deleted;
/// a zero balance is a valid terminal state.
///
/// # Invariants
///
/// Across all positions of a pool, `Σ lp_balance == pool.lp_total_supply()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LiquidityPosition {
    lp_balance: Liquidity,
    reward_debt: RewardIndex,
}

impl LiquidityPosition {
    /// Creates a position with the given balance and checkpoint.
    #[must_use]
    pub const fn new(lp_balance: Liquidity, reward_debt: RewardIndex) -> Self {
        Self {
            lp_balance,
            reward_debt,
        }
    }

    /// Returns the LP shares held.
    #[must_use]
    pub const fn lp_balance(&self) -> Liquidity {
        self.lp_balance
    }

    /// Returns the pool index this position last settled at.
    #[must_use]
    pub const fn reward_debt(&self) -> RewardIndex {
        self.reward_debt
    }

    /// Shares earned between the checkpoint and `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the checkpoint is ahead of
    /// `index` or the product leaves the `u128` range.
    pub fn earned_at(&self, index: RewardIndex) -> Result<Liquidity, ExchangeError> {
        index
            .earned_since(self.reward_debt, self.lp_balance)
            .ok_or(ExchangeError::Overflow("pending reward overflow"))
    }

    /// Increases the balance by `shares`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the balance would overflow.
    pub fn credit(&mut self, shares: Liquidity) -> Result<(), ExchangeError> {
        self.lp_balance = self
            .lp_balance
            .checked_add(&shares)
            .ok_or(ExchangeError::Overflow("position balance overflow"))?;
        Ok(())
    }

    /// Decreases the balance by `shares`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InsufficientBalance`] if `shares` exceeds
    /// the balance.
    pub fn debit(&mut self, shares: Liquidity) -> Result<(), ExchangeError> {
        self.lp_balance = self
            .lp_balance
            .checked_sub(&shares)
            .ok_or(ExchangeError::InsufficientBalance)?;
        Ok(())
    }

    /// Moves the reward checkpoint to `index`.
    pub fn checkpoint(&mut self, index: RewardIndex) {
        self.reward_debt = index;
    }
}

impl fmt::Display for LiquidityPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LP {} (debt {})", self.lp_balance, self.reward_debt)
    }
}
