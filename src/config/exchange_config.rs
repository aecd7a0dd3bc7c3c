//! Deployment-time configuration of an exchange instance.

use crate::domain::AccountId;
use crate::error::ExchangeError;

/// Reward rate applied when none is configured, in LP units per block.
pub const DEFAULT_REWARD_RATE: u128 = 100;

/// Upper bound accepted for the per-block reward rate.
pub const MAX_REWARD_RATE: u128 = 1_000_000;

/// Immutable blueprint for an [`Exchange`](crate::exchange::Exchange).
///
/// Names the owner allowed to change the reward rate, the custody account
/// that holds every pool's reserves on the token ledger, and the initial
/// per-block reward rate.
///
/// # Validation
///
/// - The reward rate must not exceed [`MAX_REWARD_RATE`].
/// - The owner must differ from the custody account.
///
/// # Examples
///
/// ```
/// use pairswap::config::{ExchangeConfig, DEFAULT_REWARD_RATE};
/// use pairswap::domain::AccountId;
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let custody = AccountId::from_bytes([2u8; 32]);
/// let Ok(config) = ExchangeConfig::new(owner, custody) else {
///     unreachable!();
/// };
/// assert_eq!(config.reward_rate(), DEFAULT_REWARD_RATE);
/// assert!(config.with_reward_rate(2_000_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeConfig {
    owner: AccountId,
    custody: AccountId,
    reward_rate: u128,
}

impl ExchangeConfig {
    /// Creates a configuration with [`DEFAULT_REWARD_RATE`].
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAmount`] if `owner == custody`.
    pub fn new(owner: AccountId, custody: AccountId) -> Result<Self, ExchangeError> {
        let config = Self {
            owner,
            custody,
            reward_rate: DEFAULT_REWARD_RATE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different initial reward rate.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAmount`] if `rate` exceeds
    /// [`MAX_REWARD_RATE`].
    pub fn with_reward_rate(self, rate: u128) -> Result<Self, ExchangeError> {
        let config = Self {
            reward_rate: rate,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidAmount`] if the reward rate is out of
    /// bounds or the owner doubles as the custody account.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        validate_reward_rate(self.reward_rate)?;
        if self.owner == self.custody {
            return Err(ExchangeError::InvalidAmount(
                "owner must differ from custody account",
            ));
        }
        Ok(())
    }

    /// Returns the owner identity.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Returns the custody account holding pool reserves.
    #[must_use]
    pub const fn custody(&self) -> AccountId {
        self.custody
    }

    /// Returns the initial per-block reward rate.
    #[must_use]
    pub const fn reward_rate(&self) -> u128 {
        self.reward_rate
    }
}

/// Checks a reward rate against [`MAX_REWARD_RATE`].
///
/// # Errors
///
/// Returns [`ExchangeError::InvalidAmount`] if `rate > MAX_REWARD_RATE`.
pub const fn validate_reward_rate(rate: u128) -> Result<(), ExchangeError> {
    if rate > MAX_REWARD_RATE {
        return Err(ExchangeError::InvalidAmount("reward rate above maximum"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn owner() -> AccountId {
        AccountId::from_bytes([1u8; 32])
    }

    fn custody() -> AccountId {
        AccountId::from_bytes([2u8; 32])
    }

    #[test]
    fn valid_config_uses_default_rate() {
        let Ok(cfg) = ExchangeConfig::new(owner(), custody()) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.owner(), owner());
        assert_eq!(cfg.custody(), custody());
        assert_eq!(cfg.reward_rate(), 100);
    }

    #[test]
    fn owner_as_custody_rejected() {
        let result = ExchangeConfig::new(owner(), owner());
        assert!(matches!(result, Err(ExchangeError::InvalidAmount(_))));
    }

    #[test]
    fn rate_bounds() {
        let Ok(cfg) = ExchangeConfig::new(owner(), custody()) else {
            panic!("expected Ok");
        };
        let Ok(max) = cfg.with_reward_rate(MAX_REWARD_RATE) else {
            panic!("upper bound is inclusive");
        };
        assert_eq!(max.reward_rate(), 1_000_000);
        let Ok(zero) = cfg.with_reward_rate(0) else {
            panic!("zero rate is allowed");
        };
        assert_eq!(zero.reward_rate(), 0);
        assert!(cfg.with_reward_rate(MAX_REWARD_RATE + 1).is_err());
    }

    #[test]
    fn standalone_rate_check() {
        assert!(validate_reward_rate(2_000_000).is_err());
        assert!(validate_reward_rate(500).is_ok());
    }
}
