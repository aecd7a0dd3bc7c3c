//! Ownership of every pool and liquidity position.
//!
//! [`PoolRegistry`] maps ordered token pairs to their
//! [`ConstantProductPool`] and `(pair, provider)` to their
//! [`LiquidityPosition`], and holds the global settings seeded from
//! [`ExchangeConfig`].  Nothing outside the registry stores pool state; the
//! exchange reads working copies out of it and commits them back.

use std::collections::HashMap;

use crate::config::ExchangeConfig;
use crate::domain::{AccountId, BlockHeight, Liquidity, LiquidityPosition, PoolKey, Side, TokenId};
use crate::error::ExchangeError;
use crate::pools::ConstantProductPool;
use crate::traits::{LiquidityPool, SwapPool};

/// Pools, positions and global settings of one exchange.
///
/// # Invariants
///
/// - A key is present at most once; `(X, Y)` and `(Y, X)` are distinct keys.
/// - `total_pools` equals the number of pools ever created.
/// - For every pool, the balances of its positions sum to its LP supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    owner: AccountId,
    reward_rate: u128,
    total_pools: u64,
    pools: HashMap<PoolKey, ConstantProductPool>,
    positions: HashMap<(PoolKey, AccountId), LiquidityPosition>,
}

impl PoolRegistry {
    /// Creates an empty registry from a validated configuration.
    #[must_use]
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            owner: config.owner(),
            reward_rate: config.reward_rate(),
            total_pools: 0,
            pools: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Returns the owner identity.
    #[must_use]
    pub const fn owner(&self) -> AccountId {
        self.owner
    }

    /// Returns the current per-block reward rate.
    #[must_use]
    pub const fn reward_rate(&self) -> u128 {
        self.reward_rate
    }

    /// Returns the number of pools created so far.
    #[must_use]
    pub const fn total_pools(&self) -> u64 {
        self.total_pools
    }

    /// Exact ordered-pair lookup; `(token_b, token_a)` is never consulted.
    #[must_use]
    pub fn lookup(&self, token_a: &TokenId, token_b: &TokenId) -> Option<&ConstantProductPool> {
        let key = PoolKey::new(*token_a, *token_b).ok()?;
        self.pools.get(&key)
    }

    /// Returns the pool stored under `key`.
    #[must_use]
    pub fn get(&self, key: &PoolKey) -> Option<&ConstantProductPool> {
        self.pools.get(key)
    }

    /// Finds the pool trading `token_in` for `token_out` and the side the
    /// input sits on.
    ///
    /// The pair as given is tried first, then its reverse.
    #[must_use]
    pub fn resolve_swap(&self, token_in: &TokenId, token_out: &TokenId) -> Option<(PoolKey, Side)> {
        let key = PoolKey::new(*token_in, *token_out).ok()?;
        if self.pools.contains_key(&key) {
            return Some((key, Side::A));
        }
        let reversed = key.reversed();
        self.pools
            .contains_key(&reversed)
            .then_some((reversed, Side::B))
    }

    /// Registers an empty pool for `key` with its reward clock at `created_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::PoolExists`] if the exact ordered pair is
    /// already registered.
    pub fn create_pool(
        &mut self,
        key: PoolKey,
        created_at: BlockHeight,
    ) -> Result<PoolKey, ExchangeError> {
        if self.pools.contains_key(&key) {
            return Err(ExchangeError::PoolExists);
        }
        let total_pools = self
            .total_pools
            .checked_add(1)
            .ok_or(ExchangeError::Overflow("pool count"))?;
        self.pools
            .insert(key, ConstantProductPool::new(key, created_at));
        self.total_pools = total_pools;
        Ok(key)
    }

    /// Returns `provider`'s position in the pool under `key`, if any.
    #[must_use]
    pub fn position(&self, key: &PoolKey, provider: &AccountId) -> Option<&LiquidityPosition> {
        self.positions.get(&(*key, *provider))
    }

    /// Replaces the stored pool with `pool`, keyed by its own pair.
    pub fn commit_pool(&mut self, pool: ConstantProductPool) {
        self.pools.insert(*pool.key(), pool);
    }

    /// Stores `position` for `provider` in the pool under `key`.
    pub fn commit_position(
        &mut self,
        key: PoolKey,
        provider: AccountId,
        position: LiquidityPosition,
    ) {
        self.positions.insert((key, provider), position);
    }

    /// Brings every pool's reward index up to `now` at the current rate.
    ///
    /// All pools are updated or none is.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if any pool's index overflows.
    pub fn accrue_all(&mut self, now: BlockHeight) -> Result<(), ExchangeError> {
        let rate = self.reward_rate;
        let mut updated = Vec::with_capacity(self.pools.len());
        for pool in self.pools.values() {
            let mut pool = pool.clone();
            pool.accrue_rewards(now, rate)?;
            updated.push(pool);
        }
        for pool in updated {
            self.commit_pool(pool);
        }
        Ok(())
    }

    /// Sets the per-block reward rate.  Bounds are checked by the caller.
    pub fn set_reward_rate(&mut self, rate: u128) {
        self.reward_rate = rate;
    }

    /// LP supply summed over every pool, saturating at `u128::MAX`.
    #[must_use]
    pub fn total_lp_supply(&self) -> Liquidity {
        let total = self
            .pools
            .values()
            .fold(0u128, |acc, pool| acc.saturating_add(pool.lp_total_supply().get()));
        Liquidity::new(total)
    }

    /// `provider`'s LP balance summed over every pool, saturating at
    /// `u128::MAX`.
    #[must_use]
    pub fn lp_balance(&self, provider: &AccountId) -> Liquidity {
        let total = self
            .positions
            .iter()
            .filter(|((_, holder), _)| holder == provider)
            .fold(0u128, |acc, (_, pos)| acc.saturating_add(pos.lp_balance().get()));
        Liquidity::new(total)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Amount;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    fn acct(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 32])
    }

    fn registry() -> PoolRegistry {
        let Ok(config) = ExchangeConfig::new(acct(1), acct(2)) else {
            panic!("valid config");
        };
        PoolRegistry::new(&config)
    }

    fn key(a: u8, b: u8) -> PoolKey {
        let Ok(key) = PoolKey::new(tok(a), tok(b)) else {
            panic!("valid key");
        };
        key
    }

    #[test]
    fn defaults() {
        let reg = registry();
        assert_eq!(reg.total_pools(), 0);
        assert_eq!(reg.reward_rate(), 100);
        assert_eq!(reg.owner(), acct(1));
        assert_eq!(reg.total_lp_supply(), Liquidity::ZERO);
    }

    #[test]
    fn ordered_pairs_are_distinct() {
        let mut reg = registry();
        let Ok(_) = reg.create_pool(key(1, 2), BlockHeight::GENESIS) else {
            panic!("expected Ok");
        };
        let Ok(_) = reg.create_pool(key(2, 1), BlockHeight::GENESIS) else {
            panic!("expected Ok");
        };
        assert_eq!(reg.total_pools(), 2);
        assert_eq!(
            reg.create_pool(key(1, 2), BlockHeight::GENESIS),
            Err(ExchangeError::PoolExists)
        );
        assert_eq!(reg.total_pools(), 2);
    }

    #[test]
    fn lookup_is_exact() {
        let mut reg = registry();
        let Ok(_) = reg.create_pool(key(1, 2), BlockHeight::new(5)) else {
            panic!("expected Ok");
        };
        assert!(reg.lookup(&tok(1), &tok(2)).is_some());
        assert!(reg.lookup(&tok(2), &tok(1)).is_none());
        assert!(reg.lookup(&tok(1), &tok(1)).is_none());
        let Some(pool) = reg.get(&key(1, 2)) else {
            panic!("expected pool");
        };
        assert_eq!(pool.last_reward_block(), BlockHeight::new(5));
    }

    #[test]
    fn resolve_swap_falls_back_to_reverse() {
        let mut reg = registry();
        let Ok(_) = reg.create_pool(key(1, 2), BlockHeight::GENESIS) else {
            panic!("expected Ok");
        };
        assert_eq!(reg.resolve_swap(&tok(1), &tok(2)), Some((key(1, 2), Side::A)));
        assert_eq!(reg.resolve_swap(&tok(2), &tok(1)), Some((key(1, 2), Side::B)));
        assert_eq!(reg.resolve_swap(&tok(1), &tok(3)), None);
    }

    #[test]
    fn resolve_swap_prefers_exact_pair() {
        let mut reg = registry();
        for k in [key(1, 2), key(2, 1)] {
            let Ok(_) = reg.create_pool(k, BlockHeight::GENESIS) else {
                panic!("expected Ok");
            };
        }
        assert_eq!(reg.resolve_swap(&tok(2), &tok(1)), Some((key(2, 1), Side::A)));
    }

    #[test]
    fn balances_sum_across_pools() {
        let mut reg = registry();
        let provider = acct(7);
        for (k, bal) in [(key(1, 2), 10u128), (key(3, 4), 32)] {
            let Ok(_) = reg.create_pool(k, BlockHeight::GENESIS) else {
                panic!("expected Ok");
            };
            let Some(pool) = reg.get(&k) else {
                panic!("expected pool");
            };
            let mut pool = pool.clone();
            let Ok(receipt) = pool.add_liquidity(
                Amount::new(bal * 1_000),
                Amount::new(bal * 1_000),
                Amount::ZERO,
                Amount::ZERO,
            ) else {
                panic!("expected Ok");
            };
            reg.commit_pool(pool);
            reg.commit_position(
                k,
                provider,
                LiquidityPosition::new(receipt.liquidity(), Default::default()),
            );
        }
        // 10_000² − 1000 + 32_000² − 1000
        assert_eq!(reg.lp_balance(&provider), Liquidity::new(1_123_998_000));
        assert_eq!(reg.total_lp_supply(), Liquidity::new(1_123_998_000));
        assert_eq!(reg.lp_balance(&acct(8)), Liquidity::ZERO);
    }

    #[test]
    fn rate_change_is_stored() {
        let mut reg = registry();
        reg.set_reward_rate(500);
        assert_eq!(reg.reward_rate(), 500);
        let Ok(()) = reg.accrue_all(BlockHeight::new(3)) else {
            panic!("expected Ok");
        };
    }
}
