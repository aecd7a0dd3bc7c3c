//! Read-only projections over committed exchange state.
//!
//! Queries never fail: an absent pool or position is reported as `None`
//! or zero.  They only take the registry's read lock, so they are safe to
//! call from inside a ledger callback.

use core::fmt;

use super::Exchange;
use crate::domain::{
    AccountId, Amount, BlockHeight, Liquidity, LiquidityQuote, PoolKey, RewardIndex, TokenId,
};
use crate::pools::ConstantProductPool;
use crate::traits::{LiquidityPool, SwapPool, TokenLedger};

/// Snapshot of one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolInfo {
    key: PoolKey,
    reserve_a: Amount,
    reserve_b: Amount,
    lp_total_supply: Liquidity,
    reward_per_share: RewardIndex,
    last_reward_block: BlockHeight,
}

impl PoolInfo {
    /// Returns the ordered pair.
    #[must_use]
    pub const fn key(&self) -> PoolKey {
        self.key
    }

    /// Returns the reserve of token A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the reserve of token B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the outstanding LP shares.
    #[must_use]
    pub const fn lp_total_supply(&self) -> Liquidity {
        self.lp_total_supply
    }

    /// Returns the reward-per-share index.
    #[must_use]
    pub const fn reward_per_share(&self) -> RewardIndex {
        self.reward_per_share
    }

    /// Returns the block rewards were last accrued at.
    #[must_use]
    pub const fn last_reward_block(&self) -> BlockHeight {
        self.last_reward_block
    }
}

impl From<&ConstantProductPool> for PoolInfo {
    fn from(pool: &ConstantProductPool) -> Self {
        Self {
            key: *pool.key(),
            reserve_a: pool.reserve_a(),
            reserve_b: pool.reserve_b(),
            lp_total_supply: pool.lp_total_supply(),
            reward_per_share: pool.reward_per_share(),
            last_reward_block: pool.last_reward_block(),
        }
    }
}

impl fmt::Display for PoolInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} reserves {}/{} supply {}",
            self.key, self.reserve_a, self.reserve_b, self.lp_total_supply
        )
    }
}

/// Snapshot of one provider's position in one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionInfo {
    lp_balance: Liquidity,
    reward_debt: RewardIndex,
    pending_rewards: Liquidity,
}

impl PositionInfo {
    /// Returns the LP shares held.
    #[must_use]
    pub const fn lp_balance(&self) -> Liquidity {
        self.lp_balance
    }

    /// Returns the index the position last settled at.
    #[must_use]
    pub const fn reward_debt(&self) -> RewardIndex {
        self.reward_debt
    }

    /// Returns the rewards pending against the pool's stored index.
    #[must_use]
    pub const fn pending_rewards(&self) -> Liquidity {
        self.pending_rewards
    }
}

impl<L: TokenLedger> Exchange<L> {
    /// Returns the owner identity.
    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.registry.read().owner()
    }

    /// Returns the custody account holding every pool's reserves.
    #[must_use]
    pub const fn custody(&self) -> AccountId {
        self.custody
    }

    /// Returns the number of pools created.
    #[must_use]
    pub fn total_pools(&self) -> u64 {
        self.registry.read().total_pools()
    }

    /// Returns the per-block reward rate.
    #[must_use]
    pub fn reward_rate(&self) -> u128 {
        self.registry.read().reward_rate()
    }

    /// LP supply summed over every pool.
    #[must_use]
    pub fn total_lp_supply(&self) -> Liquidity {
        self.registry.read().total_lp_supply()
    }

    /// `provider`'s LP balance summed over every pool.
    #[must_use]
    pub fn lp_balance(&self, provider: &AccountId) -> Liquidity {
        self.registry.read().lp_balance(provider)
    }

    /// Snapshot of the pool `(token_a, token_b)`, exact order only.
    #[must_use]
    pub fn pool_info(&self, token_a: &TokenId, token_b: &TokenId) -> Option<PoolInfo> {
        self.registry.read().lookup(token_a, token_b).map(PoolInfo::from)
    }

    /// Snapshot of `provider`'s position in `(token_a, token_b)`.
    ///
    /// `None` if the pool or position is absent, or if the pending rewards
    /// cannot be represented.
    #[must_use]
    pub fn liquidity_provider_info(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &AccountId,
    ) -> Option<PositionInfo> {
        let registry = self.registry.read();
        let pool = registry.lookup(token_a, token_b)?;
        let position = registry.position(pool.key(), provider)?;
        Some(PositionInfo {
            lp_balance: position.lp_balance(),
            reward_debt: position.reward_debt(),
            pending_rewards: pool.pending_rewards(position).ok()?,
        })
    }

    /// Output of the bare pricing formula for `amount_in`, resolving the
    /// pool the same way [`swap_tokens`](Self::swap_tokens) does.
    ///
    /// Unlike a swap this accepts a zero input and an output that floors to
    /// zero, answering `Some(0)` for both.  `None` if no pool trades the
    /// pair.
    #[must_use]
    pub fn swap_amount_out(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_in: Amount,
    ) -> Option<Amount> {
        let registry = self.registry.read();
        let (key, side_in) = registry.resolve_swap(token_in, token_out)?;
        registry.get(&key)?.estimate_amount_out(side_in, amount_in)
    }

    /// Input needed to receive at least `amount_out`.
    ///
    /// A zero `amount_out` costs one unit.  `None` if no pool trades the
    /// pair or `amount_out` is not below the output reserve.
    #[must_use]
    pub fn swap_amount_in(
        &self,
        token_in: &TokenId,
        token_out: &TokenId,
        amount_out: Amount,
    ) -> Option<Amount> {
        let registry = self.registry.read();
        let (key, side_in) = registry.resolve_swap(token_in, token_out)?;
        registry.get(&key)?.estimate_amount_in(side_in, amount_out)
    }

    /// Amounts an add-liquidity call with these desired amounts would take.
    #[must_use]
    pub fn calculate_liquidity_amounts(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Option<LiquidityQuote> {
        self.registry
            .read()
            .lookup(token_a, token_b)?
            .quote_liquidity(amount_a_desired, amount_b_desired)
            .ok()
    }

    /// Rewards `provider` could claim against the pool's stored index.
    ///
    /// Zero if the pool or position is absent, or if the amount cannot be
    /// represented.
    #[must_use]
    pub fn pending_rewards(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &AccountId,
    ) -> Liquidity {
        let registry = self.registry.read();
        registry
            .lookup(token_a, token_b)
            .and_then(|pool| {
                let position = registry.position(pool.key(), provider)?;
                pool.pending_rewards(position).ok()
            })
            .unwrap_or_default()
    }

    /// Rewards `provider` would collect by claiming at `at_block`, with the
    /// current rate applied to the blocks not yet accrued.
    #[must_use]
    pub fn projected_pending_rewards(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &AccountId,
        at_block: BlockHeight,
    ) -> Liquidity {
        let registry = self.registry.read();
        registry
            .lookup(token_a, token_b)
            .and_then(|pool| {
                let position = registry.position(pool.key(), provider)?;
                let index = pool
                    .projected_reward_index(at_block, registry.reward_rate())
                    .ok()?;
                position.earned_at(index).ok()
            })
            .unwrap_or_default()
    }
}
