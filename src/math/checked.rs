//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, ExchangeError>`](crate::error::ExchangeError)
//! instead of the `Option`s of the inherent `checked_*` methods, so pool
//! code can chain them with `?`.
//!
//! # Implementations
//!
//! - [`Amount`]: token quantities (`u128`)
//! - [`Liquidity`]: LP share quantities (`u128`)
//!
//! # Examples
//!
//! ```
//! use pairswap::domain::{Amount, Rounding};
//! use pairswap::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(10_000_000);
//! let Ok(grown) = reserve.safe_add(&Amount::new(1_000)) else {
//!     unreachable!();
//! };
//! assert_eq!(grown, Amount::new(10_001_000));
//! assert!(Amount::MAX.safe_add(&Amount::new(1)).is_err());
//! ```

use super::mul_div;
use crate::domain::{Amount, Liquidity, Rounding};
use crate::error::ExchangeError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every failure maps to [`ExchangeError::Overflow`] carrying a short
/// description of the operation that failed.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the result exceeds `u128`.
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Computes `self × numerator / denominator` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the intermediate product
    /// overflows or `denominator` is zero.
    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ExchangeError>;
}

impl CheckedArithmetic for Amount {
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("amount addition"))
    }

    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Overflow("amount subtraction"))
    }

    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ExchangeError> {
        mul_div(self.get(), numerator, denominator, rounding)
            .map(Amount::new)
            .ok_or(ExchangeError::Overflow("amount mul-div"))
    }
}

impl CheckedArithmetic for Liquidity {
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("liquidity addition"))
    }

    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Overflow("liquidity subtraction"))
    }

    fn safe_mul_div(
        &self,
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ExchangeError> {
        mul_div(self.get(), numerator, denominator, rounding)
            .map(Liquidity::new)
            .ok_or(ExchangeError::Overflow("liquidity mul-div"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Amount --------------------------------------------------------------

    #[test]
    fn amount_add_sub() {
        let a = Amount::new(700);
        let Ok(sum) = a.safe_add(&Amount::new(300)) else {
            panic!("expected Ok");
        };
        assert_eq!(sum, Amount::new(1_000));
        let Ok(diff) = sum.safe_sub(&Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(diff, Amount::new(999));
    }

    #[test]
    fn amount_sub_underflow_is_overflow_error() {
        assert_eq!(
            Amount::new(1).safe_sub(&Amount::new(2)),
            Err(ExchangeError::Overflow("amount subtraction"))
        );
    }

    #[test]
    fn amount_mul_div_rounds() {
        let a = Amount::new(10);
        assert_eq!(a.safe_mul_div(1, 3, Rounding::Down), Ok(Amount::new(3)));
        assert_eq!(a.safe_mul_div(1, 3, Rounding::Up), Ok(Amount::new(4)));
        assert!(a.safe_mul_div(1, 0, Rounding::Down).is_err());
        assert!(Amount::MAX.safe_mul_div(2, 1, Rounding::Down).is_err());
    }

    // -- Liquidity -----------------------------------------------------------

    #[test]
    fn liquidity_add_overflow() {
        assert_eq!(
            Liquidity::new(u128::MAX).safe_add(&Liquidity::new(1)),
            Err(ExchangeError::Overflow("liquidity addition"))
        );
    }

    #[test]
    fn liquidity_pro_rata_share() {
        let share = Liquidity::new(100);
        assert_eq!(
            share.safe_mul_div(5_000, 1_000, Rounding::Down),
            Ok(Liquidity::new(500))
        );
        assert_eq!(
            Liquidity::new(3).safe_sub(&Liquidity::new(3)),
            Ok(Liquidity::ZERO)
        );
    }
}
