//! LP share units.

use core::fmt;

use super::Amount;

/// Pool-share (LP token) units.
///
/// Distinct from [`Amount`]: an `Amount` measures a quantity of one token,
/// while `Liquidity` measures a proportional claim on both reserves of a
/// pool.  All `u128` values are valid.
///
/// # Examples
///
/// ```
/// use pairswap::domain::Liquidity;
///
/// let minted = Liquidity::new(999_999_999_000);
/// let burned = Liquidity::new(10_000_000_000);
/// assert_eq!(minted.checked_sub(&burned), Some(Liquidity::new(989_999_999_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Liquidity(u128);

impl Liquidity {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Reinterprets the share count as a raw amount, for mixed
    /// share × reserve products.
    pub const fn as_amount(&self) -> Amount {
        Amount::new(self.0)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
