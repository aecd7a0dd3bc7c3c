//! Raw token amount with checked arithmetic.

use core::fmt;

use super::Rounding;
use crate::math::div_round;

/// A raw token amount in the token's smallest unit.
///
/// Pools hold reserves as `Amount`s and every transfer moves an `Amount`.
/// All `u128` values are valid.  Arithmetic is checked: methods return
/// `None` on overflow, underflow or division by zero and never wrap.
///
/// # Examples
///
/// ```
/// use pairswap::domain::{Amount, Rounding};
///
/// let reserve = Amount::new(10_000_000);
/// let share = reserve.checked_div(&Amount::new(3), Rounding::Down);
/// assert_eq!(share, Some(Amount::new(3_333_333)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked multiplication by a raw scalar such as a fee numerator.
    #[must_use]
    pub const fn checked_scale(&self, factor: u128) -> Option<Self> {
        match self.0.checked_mul(factor) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with an explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        match div_round(self.0, divisor.0, rounding) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(Amount::ZERO.get(), 0);
        assert_eq!(Amount::MAX.get(), u128::MAX);
        assert_eq!(Amount::default(), Amount::ZERO);
    }

    #[test]
    fn is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn add_and_overflow() {
        assert_eq!(
            Amount::new(100).checked_add(&Amount::new(200)),
            Some(Amount::new(300))
        );
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
    }

    #[test]
    fn sub_and_underflow() {
        assert_eq!(
            Amount::new(300).checked_sub(&Amount::new(100)),
            Some(Amount::new(200))
        );
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
    }

    #[test]
    fn mul_and_overflow() {
        assert_eq!(
            Amount::new(1_000_000).checked_mul(&Amount::new(1_000_000)),
            Some(Amount::new(1_000_000_000_000))
        );
        assert_eq!(Amount::MAX.checked_mul(&Amount::new(2)), None);
    }

    #[test]
    fn scale_by_fee_numerator() {
        assert_eq!(Amount::new(1_000).checked_scale(997), Some(Amount::new(997_000)));
        assert_eq!(Amount::MAX.checked_scale(997), None);
    }

    #[test]
    fn div_rounding() {
        let ten = Amount::new(10);
        let three = Amount::new(3);
        assert_eq!(ten.checked_div(&three, Rounding::Down), Some(Amount::new(3)));
        assert_eq!(ten.checked_div(&three, Rounding::Up), Some(Amount::new(4)));
        assert_eq!(ten.checked_div(&Amount::ZERO, Rounding::Down), None);
    }

    #[test]
    fn ordering_and_display() {
        assert!(Amount::new(1) < Amount::new(2));
        assert_eq!(format!("{}", Amount::new(1_000_000)), "1000000");
    }
}
