//! The exchange façade: every mutating entry point and the query surface.
//!
//! An [`Exchange`] owns a [`PoolRegistry`] behind a `parking_lot::RwLock`,
//! a [`ReentrancyLock`], and the [`TokenLedger`] it moves tokens on.
//!
//! # Operation Flow
//!
//! Each mutating call:
//!
//! 1. takes the reentrancy lock (fails fast with [`ExchangeError::Reentrancy`]),
//! 2. copies the touched pool and position out of the registry,
//! 3. runs the reward, liquidity or swap logic on those copies,
//! 4. performs its transfers through a journal that reverses earlier
//!    transfers if a later one fails,
//! 5. writes the copies back to the registry.
//!
//! Any error before step 5 leaves the registry exactly as it was.  The
//! registry lock is never held while the ledger runs, so a ledger that
//! calls back into the exchange sees committed state through queries and
//! is rejected on any mutating call.

mod journal;
mod queries;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::{ExchangeConfig, validate_reward_rate};
use crate::domain::{
    AccountId, AddLiquidityReceipt, Amount, CallContext, Liquidity, LiquidityPosition, PoolKey,
    RemoveLiquidityReceipt, SwapReceipt, TokenId,
};
use crate::error::{ExchangeError, Result};
use crate::guard::{ReentrancyGuard, ReentrancyLock, ensure_owner};
use crate::pools::ConstantProductPool;
use crate::registry::PoolRegistry;
use crate::traits::{LiquidityPool, SwapPool, TokenLedger};

use journal::TransferJournal;

pub use queries::{PoolInfo, PositionInfo};

/// A constant-product exchange over ordered token pairs.
///
/// All entry points take `&self`; the exchange is `Send + Sync` whenever
/// the ledger is.
///
/// # Examples
///
/// ```
/// use pairswap::config::ExchangeConfig;
/// use pairswap::domain::{AccountId, Amount, BlockHeight, CallContext, TokenId};
/// use pairswap::exchange::Exchange;
/// use pairswap::ledger::InMemoryLedger;
///
/// let owner = AccountId::from_bytes([1u8; 32]);
/// let custody = AccountId::from_bytes([2u8; 32]);
/// let alice = AccountId::from_bytes([3u8; 32]);
/// let (x, y) = (TokenId::from_bytes([10u8; 32]), TokenId::from_bytes([11u8; 32]));
///
/// let ledger = InMemoryLedger::new();
/// ledger.mint(&x, &alice, Amount::new(1_000_000)).expect("mint");
/// ledger.mint(&y, &alice, Amount::new(1_000_000)).expect("mint");
///
/// let config = ExchangeConfig::new(owner, custody).expect("config");
/// let exchange = Exchange::new(config, ledger).expect("exchange");
///
/// let ctx = CallContext::new(alice, BlockHeight::new(1));
/// exchange.create_pool(&ctx, x, y).expect("create");
/// let receipt = exchange
///     .add_liquidity(&ctx, x, y, Amount::new(1_000_000), Amount::new(1_000_000), Amount::ZERO, Amount::ZERO)
///     .expect("add");
/// assert_eq!(receipt.liquidity().get(), 999_999_999_000);
/// assert_eq!(exchange.total_pools(), 1);
/// ```
#[derive(Debug)]
pub struct Exchange<L> {
    ledger: L,
    custody: AccountId,
    registry: RwLock<PoolRegistry>,
    lock: ReentrancyLock,
}

impl<L: TokenLedger> Exchange<L> {
    /// Builds an exchange with no pools from `config`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ExchangeConfig::validate`].
    pub fn new(config: ExchangeConfig, ledger: L) -> Result<Self> {
        config.validate()?;
        info!(
            owner = %config.owner(),
            custody = %config.custody(),
            reward_rate = config.reward_rate(),
            "exchange initialised"
        );
        Ok(Self {
            ledger,
            custody: config.custody(),
            registry: RwLock::new(PoolRegistry::new(&config)),
            lock: ReentrancyLock::new(),
        })
    }

    /// Returns the token ledger.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Registers an empty pool for the ordered pair `(token_a, token_b)`.
    ///
    /// No tokens move.  `(token_b, token_a)` remains free to be created as
    /// a separate pool.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::SameToken`] if the tokens are equal.
    /// - [`ExchangeError::PoolExists`] if the ordered pair is registered.
    pub fn create_pool(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<PoolKey> {
        const OP: &str = "create_pool";
        let _guard = self.enter(OP)?;
        self.do_create_pool(ctx, token_a, token_b)
            .inspect_err(|err| reject(OP, err))
    }

    /// Deposits both tokens into the pool `(token_a, token_b)` and mints LP
    /// shares to the caller.
    ///
    /// Rewards the caller has pending in this pool are minted into their
    /// balance first.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::SameToken`] if the tokens are equal.
    /// - [`ExchangeError::PoolNotFound`] if the ordered pair has no pool.
    /// - [`ExchangeError::InvalidAmount`] for zero desired amounts, a
    ///   minimum above its desired amount, or a deposit minting nothing.
    /// - [`ExchangeError::SlippageExceeded`] if a ratio-adjusted amount is
    ///   below its minimum.
    /// - [`ExchangeError::TransferFailed`] if the ledger refuses a deposit.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<AddLiquidityReceipt> {
        const OP: &str = "add_liquidity";
        let _guard = self.enter(OP)?;
        self.do_add_liquidity(
            ctx,
            (token_a, token_b),
            (amount_a_desired, amount_b_desired),
            (amount_a_min, amount_b_min),
        )
        .inspect_err(|err| reject(OP, err))
    }

    /// Burns `liquidity` of the caller's shares in `(token_a, token_b)` and
    /// pays out the proportional reserves.
    ///
    /// Pending rewards are minted into the caller's balance before the burn.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::SameToken`] if the tokens are equal.
    /// - [`ExchangeError::PoolNotFound`] if the ordered pair has no pool.
    /// - [`ExchangeError::InvalidAmount`] if `liquidity` is zero.
    /// - [`ExchangeError::InsufficientBalance`] if `liquidity` exceeds the
    ///   caller's balance.
    /// - [`ExchangeError::SlippageExceeded`] if a payout is below its minimum.
    /// - [`ExchangeError::TransferFailed`] if the ledger refuses a payout.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    pub fn remove_liquidity(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
        liquidity: Liquidity,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<RemoveLiquidityReceipt> {
        const OP: &str = "remove_liquidity";
        let _guard = self.enter(OP)?;
        self.do_remove_liquidity(ctx, (token_a, token_b), liquidity, (amount_a_min, amount_b_min))
            .inspect_err(|err| reject(OP, err))
    }

    /// Sells exactly `amount_in` of `token_in` for `token_out`.
    ///
    /// The pool `(token_in, token_out)` is used if it exists, otherwise
    /// `(token_out, token_in)`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::SameToken`] if both tokens are equal.
    /// - [`ExchangeError::PoolNotFound`] if neither ordering has a pool.
    /// - [`ExchangeError::InvalidAmount`] if `amount_in` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if the pool cannot pay a
    ///   non-zero output.
    /// - [`ExchangeError::SlippageExceeded`] if the output is below
    ///   `amount_out_min`.
    /// - [`ExchangeError::TransferFailed`] if the ledger refuses a leg.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    pub fn swap_tokens(
        &self,
        ctx: &CallContext,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
        amount_out_min: Amount,
    ) -> Result<SwapReceipt> {
        const OP: &str = "swap_tokens";
        let _guard = self.enter(OP)?;
        self.do_swap(ctx, token_in, token_out, amount_in, amount_out_min)
            .inspect_err(|err| reject(OP, err))
    }

    /// Mints the caller's pending rewards in `(token_a, token_b)` as LP
    /// shares and returns the amount minted.
    ///
    /// A caller without a position receives zero and no position is
    /// created.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::SameToken`] if the tokens are equal.
    /// - [`ExchangeError::PoolNotFound`] if the ordered pair has no pool.
    /// - [`ExchangeError::Overflow`] on arithmetic overflow.
    pub fn claim_rewards(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<Liquidity> {
        const OP: &str = "claim_rewards";
        let _guard = self.enter(OP)?;
        self.do_claim_rewards(ctx, token_a, token_b)
            .inspect_err(|err| reject(OP, err))
    }

    /// Changes the per-block reward rate.  Owner only.
    ///
    /// Every pool is first brought up to `ctx.block_height()` at the old
    /// rate, so the new rate only applies to blocks after this call.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Reentrancy`] if another mutating call is running.
    /// - [`ExchangeError::OwnerOnly`] if the caller is not the owner.
    /// - [`ExchangeError::InvalidAmount`] if `new_rate` exceeds
    ///   [`MAX_REWARD_RATE`](crate::config::MAX_REWARD_RATE).
    /// - [`ExchangeError::Overflow`] if accruing a pool overflows.
    pub fn set_reward_rate(&self, ctx: &CallContext, new_rate: u128) -> Result<bool> {
        const OP: &str = "set_reward_rate";
        let _guard = self.enter(OP)?;
        self.do_set_reward_rate(ctx, new_rate)
            .inspect_err(|err| reject(OP, err))
    }

    // -- operation bodies -----------------------------------------------------

    fn do_create_pool(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<PoolKey> {
        let key = PoolKey::new(token_a, token_b)?;
        let key = self
            .registry
            .write()
            .create_pool(key, ctx.block_height())?;
        info!(pool = %key, caller = %ctx.caller(), block = %ctx.block_height(), "pool created");
        Ok(key)
    }

    fn do_add_liquidity(
        &self,
        ctx: &CallContext,
        (token_a, token_b): (TokenId, TokenId),
        (amount_a_desired, amount_b_desired): (Amount, Amount),
        (amount_a_min, amount_b_min): (Amount, Amount),
    ) -> Result<AddLiquidityReceipt> {
        let provider = ctx.caller();
        let (mut pool, existing, rate) = self.load(&token_a, &token_b, &provider)?;
        let key = *pool.key();
        let mut position = existing.unwrap_or_default();

        pool.accrue_rewards(ctx.block_height(), rate)?;
        let settled = pool.settle_rewards(&mut position)?;
        let receipt = pool.add_liquidity(
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
        )?;
        position.credit(receipt.liquidity())?;

        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(key.token_a(), receipt.amount_a(), provider, self.custody)?;
        journal.transfer(key.token_b(), receipt.amount_b(), provider, self.custody)?;

        self.commit(pool, Some((provider, position)));
        journal.finish();
        info!(
            pool = %key,
            %provider,
            amount_a = %receipt.amount_a(),
            amount_b = %receipt.amount_b(),
            minted = %receipt.liquidity(),
            rewards = %settled,
            "liquidity added"
        );
        Ok(receipt)
    }

    fn do_remove_liquidity(
        &self,
        ctx: &CallContext,
        (token_a, token_b): (TokenId, TokenId),
        liquidity: Liquidity,
        (amount_a_min, amount_b_min): (Amount, Amount),
    ) -> Result<RemoveLiquidityReceipt> {
        let provider = ctx.caller();
        let (mut pool, existing, rate) = self.load(&token_a, &token_b, &provider)?;
        let key = *pool.key();
        let mut position = existing.unwrap_or_default();

        if liquidity.is_zero() {
            return Err(ExchangeError::InvalidAmount("cannot burn zero liquidity"));
        }
        if liquidity > position.lp_balance() {
            return Err(ExchangeError::InsufficientBalance);
        }

        pool.accrue_rewards(ctx.block_height(), rate)?;
        let settled = pool.settle_rewards(&mut position)?;
        position.debit(liquidity)?;
        let receipt = pool.remove_liquidity(liquidity, amount_a_min, amount_b_min)?;

        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(key.token_a(), receipt.amount_a(), self.custody, provider)?;
        journal.transfer(key.token_b(), receipt.amount_b(), self.custody, provider)?;

        self.commit(pool, Some((provider, position)));
        journal.finish();
        info!(
            pool = %key,
            %provider,
            burned = %liquidity,
            amount_a = %receipt.amount_a(),
            amount_b = %receipt.amount_b(),
            rewards = %settled,
            "liquidity removed"
        );
        Ok(receipt)
    }

    fn do_swap(
        &self,
        ctx: &CallContext,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: Amount,
        amount_out_min: Amount,
    ) -> Result<SwapReceipt> {
        let trader = ctx.caller();
        if token_in == token_out {
            return Err(ExchangeError::SameToken);
        }
        let (mut pool, side_in) = {
            let registry = self.registry.read();
            let (key, side_in) = registry
                .resolve_swap(&token_in, &token_out)
                .ok_or(ExchangeError::PoolNotFound)?;
            let pool = registry.get(&key).ok_or(ExchangeError::PoolNotFound)?;
            (pool.clone(), side_in)
        };

        let receipt = pool.swap(side_in, amount_in)?;
        if receipt.amount_out() < amount_out_min {
            return Err(ExchangeError::SlippageExceeded);
        }

        let key = *pool.key();
        let mut journal = TransferJournal::new(&self.ledger);
        journal.transfer(token_in, receipt.amount_in(), trader, self.custody)?;
        journal.transfer(token_out, receipt.amount_out(), self.custody, trader)?;

        self.commit(pool, None);
        journal.finish();
        info!(
            pool = %key,
            %trader,
            amount_in = %receipt.amount_in(),
            amount_out = %receipt.amount_out(),
            "swap executed"
        );
        Ok(receipt)
    }

    fn do_claim_rewards(
        &self,
        ctx: &CallContext,
        token_a: TokenId,
        token_b: TokenId,
    ) -> Result<Liquidity> {
        let provider = ctx.caller();
        let (mut pool, existing, rate) = self.load(&token_a, &token_b, &provider)?;
        let key = *pool.key();

        pool.accrue_rewards(ctx.block_height(), rate)?;
        let Some(mut position) = existing else {
            self.commit(pool, None);
            debug!(pool = %key, %provider, "no position, nothing to claim");
            return Ok(Liquidity::ZERO);
        };
        let claimed = pool.settle_rewards(&mut position)?;

        self.commit(pool, Some((provider, position)));
        info!(pool = %key, %provider, %claimed, "rewards claimed");
        Ok(claimed)
    }

    fn do_set_reward_rate(&self, ctx: &CallContext, new_rate: u128) -> Result<bool> {
        let mut registry = self.registry.write();
        ensure_owner(&registry.owner(), &ctx.caller())?;
        validate_reward_rate(new_rate)?;
        registry.accrue_all(ctx.block_height())?;
        let old_rate = registry.reward_rate();
        registry.set_reward_rate(new_rate);
        info!(old_rate, new_rate, block = %ctx.block_height(), "reward rate changed");
        Ok(true)
    }

    // -- internals ------------------------------------------------------------

    fn enter(&self, op: &'static str) -> Result<ReentrancyGuard<'_>> {
        self.lock.acquire().inspect_err(|_| {
            warn!(op, "reentrant call rejected");
        })
    }

    /// Copies the pool `(token_a, token_b)`, `provider`'s position in it and
    /// the reward rate out of the registry.
    fn load(
        &self,
        token_a: &TokenId,
        token_b: &TokenId,
        provider: &AccountId,
    ) -> Result<(ConstantProductPool, Option<LiquidityPosition>, u128)> {
        let key = PoolKey::new(*token_a, *token_b)?;
        let registry = self.registry.read();
        let pool = registry.get(&key).ok_or(ExchangeError::PoolNotFound)?;
        let position = registry.position(&key, provider).copied();
        Ok((pool.clone(), position, registry.reward_rate()))
    }

    fn commit(&self, pool: ConstantProductPool, position: Option<(AccountId, LiquidityPosition)>) {
        let key = *pool.key();
        let mut registry = self.registry.write();
        registry.commit_pool(pool);
        if let Some((provider, position)) = position {
            registry.commit_position(key, provider, position);
        }
    }
}

fn reject(op: &'static str, err: &ExchangeError) {
    debug!(op, code = err.code(), error = %err, "operation rejected");
}
