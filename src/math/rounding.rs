//! Integer division helpers with explicit rounding.
//!
//! [`div_round`] and [`mul_div`] are the low-level building blocks behind
//! [`Amount::checked_div`](crate::domain::Amount::checked_div) and the pool
//! pricing formulas.
//!
//! # Convention
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal, LP minted | [`Rounding::Down`] |
//! | Required swap input | [`Rounding::Down`], then `+ 1` |
//! | Reward index, earned rewards | floor |
//!
//! # Examples
//!
//! ```
//! use pairswap::domain::Rounding;
//! use pairswap::math::{div_round, mul_div};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(mul_div(1_000_000, 4_000_000, 2_000_000, Rounding::Down), Some(2_000_000));
//! ```

use crate::domain::Rounding;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        // q + 1 cannot overflow: a non-zero remainder implies q < u128::MAX.
        Rounding::Up if numerator % denominator != 0 => Some(q + 1),
        Rounding::Up => Some(q),
    }
}

/// Computes `a × b / denominator` with explicit rounding.
///
/// Returns [`None`] if the product overflows `u128` or `denominator` is zero.
#[must_use]
pub const fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    match a.checked_mul(b) {
        Some(product) => div_round(product, denominator, rounding),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_returns_none() {
        assert_eq!(div_round(100, 0, Rounding::Down), None);
        assert_eq!(div_round(0, 0, Rounding::Up), None);
    }

    #[test]
    fn zero_numerator() {
        assert_eq!(div_round(0, 5, Rounding::Down), Some(0));
        assert_eq!(div_round(0, 5, Rounding::Up), Some(0));
    }

    #[test]
    fn exact_division_agrees() {
        assert_eq!(div_round(100, 10, Rounding::Down), Some(10));
        assert_eq!(div_round(100, 10, Rounding::Up), Some(10));
    }

    #[test]
    fn remainder_rounds_by_direction() {
        assert_eq!(div_round(9, 10, Rounding::Down), Some(0));
        assert_eq!(div_round(9, 10, Rounding::Up), Some(1));
    }

    #[test]
    fn max_values() {
        assert_eq!(div_round(u128::MAX, 1, Rounding::Up), Some(u128::MAX));
        assert_eq!(div_round(u128::MAX, 2, Rounding::Down), Some(u128::MAX / 2));
        assert_eq!(div_round(u128::MAX, 2, Rounding::Up), Some(u128::MAX / 2 + 1));
        let d = u128::MAX / 2;
        assert_eq!(div_round(u128::MAX, d, Rounding::Up), Some(3));
    }

    #[test]
    fn mul_div_floor_and_ceil() {
        // 20_000_000 × 997_000 / 10_997_000 = 1_813_221.78…
        assert_eq!(
            mul_div(20_000_000, 997_000, 10_997_000, Rounding::Down),
            Some(1_813_221)
        );
        assert_eq!(
            mul_div(20_000_000, 997_000, 10_997_000, Rounding::Up),
            Some(1_813_222)
        );
    }

    #[test]
    fn mul_div_overflow_is_none() {
        assert_eq!(mul_div(u128::MAX, 2, 2, Rounding::Down), None);
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), None);
    }
}
