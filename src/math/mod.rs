//! Arithmetic utilities for pool calculations.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning inherent methods of
//! the domain types into `Result`s; [`div_round`] and [`mul_div`] perform
//! integer division with an explicit [`Rounding`](crate::domain::Rounding)
//! direction.  [`U256`] holds intermediate products that do not fit in a
//! `u128`.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::{div_round, mul_div};
pub use wide::U256;
