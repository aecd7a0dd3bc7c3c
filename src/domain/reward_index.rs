//! Fixed-point reward-per-share accumulator value.

use core::fmt;

use super::Liquidity;
use crate::math::U256;

/// Cumulative reward per LP share, scaled by [`RewardIndex::PRECISION`].
///
/// A pool's index only ever grows.  A position remembers the index it last
/// settled at; the difference times its balance is the reward it has
/// earned since.  The value is held in 256 bits so that the per-block
/// increment stays non-zero on pools whose supply reaches `10^24` and more.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Liquidity, RewardIndex};
///
/// let debt = RewardIndex::ZERO;
/// let now = RewardIndex::new(40 * RewardIndex::PRECISION);
/// assert_eq!(now.earned_since(debt, Liquidity::new(25)), Some(Liquidity::new(1_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RewardIndex(U256);

impl RewardIndex {
    /// Scaling factor of the fixed-point representation (10^36).
    pub const PRECISION: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

    /// Index of a pool that has never accrued.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Creates an index from its raw scaled value.
    #[must_use]
    pub fn new(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    /// Returns the raw scaled value.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Index after spreading `emitted` reward shares over `supply` shares.
    ///
    /// The increment `emitted × PRECISION / supply` floors towards zero.
    /// An empty supply leaves the index unchanged.  Returns `None` if the
    /// index overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use pairswap::domain::{Liquidity, RewardIndex};
    ///
    /// let supply = Liquidity::new(1_000_000_000_000_000_000_000_000);
    /// let Some(idx) = RewardIndex::ZERO.checked_accrue(1_000, supply) else {
    ///     panic!("expected index");
    /// };
    /// assert_eq!(idx.earned_since(RewardIndex::ZERO, supply), Some(Liquidity::new(1_000)));
    /// ```
    #[must_use]
    pub fn checked_accrue(&self, emitted: u128, supply: Liquidity) -> Option<Self> {
        if supply.is_zero() {
            return Some(*self);
        }
        let scaled = U256::from(emitted).checked_mul(U256::from(Self::PRECISION))?;
        let delta = scaled / U256::from(supply.get());
        self.0.checked_add(delta).map(Self)
    }

    /// LP shares earned by `balance` between `debt` and this index.
    ///
    /// Floors towards zero.  Returns `None` if `debt` lies ahead of this
    /// index or the result does not fit in a [`Liquidity`].
    #[must_use]
    pub fn earned_since(&self, debt: Self, balance: Liquidity) -> Option<Liquidity> {
        let delta = self.0.checked_sub(debt.0)?;
        let earned = delta.checked_mul(U256::from(balance.get()))? / U256::from(Self::PRECISION);
        if earned > U256::from(u128::MAX) {
            return None;
        }
        Some(Liquidity::new(earned.low_u128()))
    }
}

impl fmt::Display for RewardIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn earned_is_zero_at_same_index() {
        let idx = RewardIndex::new(123 * RewardIndex::PRECISION);
        assert_eq!(idx.earned_since(idx, Liquidity::new(1_000)), Some(Liquidity::ZERO));
    }

    #[test]
    fn earned_floors() {
        // 0.5 share per unit × 3 units = 1.5 → 1
        let idx = RewardIndex::new(RewardIndex::PRECISION / 2);
        assert_eq!(
            idx.earned_since(RewardIndex::ZERO, Liquidity::new(3)),
            Some(Liquidity::new(1))
        );
    }

    #[test]
    fn debt_ahead_of_index_is_rejected() {
        let idx = RewardIndex::new(5);
        assert_eq!(idx.earned_since(RewardIndex::new(6), Liquidity::new(1)), None);
    }

    #[test]
    fn accrue_on_empty_supply_is_a_no_op() {
        let idx = RewardIndex::new(9);
        assert_eq!(idx.checked_accrue(1_000, Liquidity::ZERO), Some(idx));
    }

    #[test]
    fn accrue_stays_positive_on_large_supply() {
        // 1e12 × 1e12 pool: product minus the locked minimum
        let supply = Liquidity::new(999_999_999_999_999_999_999_000);
        let Some(idx) = RewardIndex::ZERO.checked_accrue(1_000, supply) else {
            panic!("expected index");
        };
        assert!(idx > RewardIndex::ZERO);
        assert_eq!(idx.earned_since(RewardIndex::ZERO, supply), Some(Liquidity::new(999)));
    }

    #[test]
    fn earned_beyond_u128_is_rejected() {
        let idx = RewardIndex::new(u128::MAX);
        assert_eq!(idx.earned_since(RewardIndex::ZERO, Liquidity::new(u128::MAX)), None);
    }
}
