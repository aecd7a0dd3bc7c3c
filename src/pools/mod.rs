//! Pool implementations.
//!
//! [`ConstantProductPool`] holds the reserves, LP supply and reward state
//! of one ordered token pair and implements the
//! [`SwapPool`](crate::traits::SwapPool) and
//! [`LiquidityPool`](crate::traits::LiquidityPool) traits.
//! [`RewardAccumulator`] is the per-pool reward-per-share index it carries.

pub mod constant_product;
mod rewards;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::{
    ConstantProductPool, FEE_DENOMINATOR, FEE_NUMERATOR, MINIMUM_LIQUIDITY,
};
pub use rewards::RewardAccumulator;
