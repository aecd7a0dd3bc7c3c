//! Block-driven reward accumulator.
//!
//! Each pool carries a [`RewardAccumulator`]: a reward-per-share index
//! that grows by `elapsed × rate × PRECISION / supply` whenever the pool
//! is touched, plus the block it was last brought up to date at.  A
//! position's pending reward is the index growth since its checkpoint
//! times its balance, so no operation ever has to iterate positions.
//!
//! # Update Rule
//!
//! ```text
//! elapsed = now − last_block
//! if elapsed > 0 and supply > 0:
//!     index += elapsed × rate × PRECISION / supply
//! last_block = max(last_block, now)
//! ```
//!
//! The block is moved forward even while the supply is zero, so liquidity
//! arriving after an idle stretch does not collect rewards for it.

use crate::domain::{BlockHeight, Liquidity, LiquidityPosition, RewardIndex};
use crate::error::ExchangeError;

/// Reward-per-share index and the block it was last updated at.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{BlockHeight, Liquidity, RewardIndex};
/// use pairswap::pools::RewardAccumulator;
///
/// let mut acc = RewardAccumulator::new(BlockHeight::new(10));
/// let supply = Liquidity::new(1_000);
/// let Ok(index) = acc.accrue(BlockHeight::new(15), 100, supply) else {
///     unreachable!();
/// };
/// // 5 blocks × 100 per block spread over 1_000 shares = 0.5 per share
/// assert_eq!(index, RewardIndex::new(RewardIndex::PRECISION / 2));
/// assert_eq!(acc.last_block(), BlockHeight::new(15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RewardAccumulator {
    index: RewardIndex,
    last_block: BlockHeight,
}

impl RewardAccumulator {
    /// Creates an accumulator with a zero index starting at `start`.
    #[must_use]
    pub const fn new(start: BlockHeight) -> Self {
        Self {
            index: RewardIndex::ZERO,
            last_block: start,
        }
    }

    /// Returns the current reward-per-share index.
    #[must_use]
    pub const fn index(&self) -> RewardIndex {
        self.index
    }

    /// Returns the block the index was last brought up to date at.
    #[must_use]
    pub const fn last_block(&self) -> BlockHeight {
        self.last_block
    }

    /// The index this accumulator would hold after [`accrue`](Self::accrue)
    /// at `now`, without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the emission leaves the `u128`
    /// range or the index leaves the 256-bit range.
    pub fn projected(
        &self,
        now: BlockHeight,
        rate: u128,
        supply: Liquidity,
    ) -> Result<RewardIndex, ExchangeError> {
        let elapsed = now.blocks_since(self.last_block);
        if elapsed == 0 || supply.is_zero() {
            return Ok(self.index);
        }
        let emitted = u128::from(elapsed)
            .checked_mul(rate)
            .ok_or(ExchangeError::Overflow("reward emission overflow"))?;
        self.index
            .checked_accrue(emitted, supply)
            .ok_or(ExchangeError::Overflow("reward index overflow"))
    }

    /// Integrates `rate` over the blocks elapsed since the last update.
    ///
    /// A `now` earlier than the stored block leaves the accumulator as is.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] as [`projected`](Self::projected)
    /// does; the accumulator is unchanged on error.
    pub fn accrue(
        &mut self,
        now: BlockHeight,
        rate: u128,
        supply: Liquidity,
    ) -> Result<RewardIndex, ExchangeError> {
        let index = self.projected(now, rate, supply)?;
        if index != self.index {
            tracing::debug!(
                from = %self.last_block,
                to = %now,
                rate,
                %supply,
                %index,
                "reward index advanced"
            );
        }
        self.index = index;
        if now > self.last_block {
            self.last_block = now;
        }
        Ok(index)
    }

    /// Rewards `position` has earned up to the current index.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the amount cannot be
    /// represented.
    pub fn pending(&self, position: &LiquidityPosition) -> Result<Liquidity, ExchangeError> {
        position.earned_at(self.index)
    }
}
