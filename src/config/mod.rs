//! Exchange configuration.
//!
//! [`ExchangeConfig`] is the validated blueprint an
//! [`Exchange`](crate::exchange::Exchange) is built from.

mod exchange_config;

pub use exchange_config::{
    DEFAULT_REWARD_RATE, ExchangeConfig, MAX_REWARD_RATE, validate_reward_rate,
};
