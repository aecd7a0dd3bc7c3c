//! Constant Product pool implementation with a 0.3% input fee.
//!
//! The swap invariant is `x × y = k` where `x` and `y` are the reserves
//! of the two tokens.  The fee is taken from the input **before** the
//! pricing formula is applied and stays in the pool.
//!
//! # Swap Algorithm (side A → side B)
//!
//! 1. `effective_in = amount_in × 997`
//! 2. `amount_out = effective_in × reserve_b / (reserve_a × 1000 + effective_in)`
//! 3. `reserve_a += amount_in` (fee stays in the pool)
//! 4. `reserve_b -= amount_out`
//!
//! # Minting
//!
//! - First deposit: `minted = amount_a × amount_b − MINIMUM_LIQUIDITY`
//! - Later deposits: `minted = min(Δa × L / Ra, Δb × L / Rb)`
//!
//! # Invariant
//!
//! After every swap, `k_after ≥ k_before` because the fee component
//! increases reserves without a corresponding output.

use crate::domain::{
    AddLiquidityReceipt, Amount, BlockHeight, Liquidity, LiquidityPosition, LiquidityQuote,
    PoolKey, RemoveLiquidityReceipt, RewardIndex, Rounding, Side, SwapReceipt,
};
use crate::error::ExchangeError;
use crate::math::{CheckedArithmetic, mul_div};
use crate::traits::{LiquidityPool, SwapPool};

use super::RewardAccumulator;

/// LP units withheld from the first deposit of every pool.
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Fraction of the input that reaches the pricing curve, over [`FEE_DENOMINATOR`].
pub const FEE_NUMERATOR: u128 = 997;

/// Denominator of the swap fee fraction.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// A Constant Product pool (`x · y = k`) for one ordered token pair.
///
/// Created empty by the registry; the first deposit sets the price.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: current token balances held in custody (fees included)
/// - `lp_total_supply`: outstanding LP shares, reward mints included
/// - `rewards`: the pool's reward-per-share index and its last update block
///
/// # Example
///
/// ```rust
/// use pairswap::domain::{Amount, BlockHeight, PoolKey, Side, TokenId};
/// use pairswap::pools::ConstantProductPool;
/// use pairswap::traits::{LiquidityPool, SwapPool};
///
/// let key = PoolKey::new(TokenId::from_bytes([1u8; 32]), TokenId::from_bytes([2u8; 32]))
///     .expect("distinct");
/// let mut pool = ConstantProductPool::new(key, BlockHeight::GENESIS);
///
/// let deposit = pool
///     .add_liquidity(Amount::new(1_000_000), Amount::new(1_000_000), Amount::ZERO, Amount::ZERO)
///     .expect("first deposit");
/// assert_eq!(deposit.liquidity().get(), 999_999_999_000);
///
/// let receipt = pool.swap(Side::A, Amount::new(1_000)).expect("swap ok");
/// assert_eq!(receipt.amount_out(), Amount::new(996));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    key: PoolKey,
    reserve_a: Amount,
    reserve_b: Amount,
    lp_total_supply: Liquidity,
    rewards: RewardAccumulator,
}

impl ConstantProductPool {
    /// Creates an empty pool whose reward clock starts at `created_at`.
    #[must_use]
    pub const fn new(key: PoolKey, created_at: BlockHeight) -> Self {
        Self {
            key,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            lp_total_supply: Liquidity::ZERO,
            rewards: RewardAccumulator::new(created_at),
        }
    }

    /// Returns the current reserve of token A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the current reserve of token B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns the pool's reward-per-share index.
    #[must_use]
    pub const fn reward_per_share(&self) -> RewardIndex {
        self.rewards.index()
    }

    /// Returns the block rewards were last accrued at.
    #[must_use]
    pub const fn last_reward_block(&self) -> BlockHeight {
        self.rewards.last_block()
    }

    /// Returns `true` before the first deposit (and after a full drain).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lp_total_supply.is_zero()
    }

    /// `reserve_a × reserve_b`, or `None` if it does not fit in `u128`.
    #[must_use]
    pub const fn constant_product(&self) -> Option<u128> {
        self.reserve_a.get().checked_mul(self.reserve_b.get())
    }

    // -- estimates ----------------------------------------------------------

    /// Bare exact-in pricing formula, without the checks a swap applies.
    ///
    /// A zero input prices at zero, as does an input too small to move the
    /// output reserve.  Returns `None` only if an intermediate overflows or
    /// the denominator is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pairswap::domain::{Amount, BlockHeight, PoolKey, Side, TokenId};
    /// use pairswap::pools::ConstantProductPool;
    /// use pairswap::traits::LiquidityPool;
    ///
    /// let key = PoolKey::new(TokenId::from_bytes([1u8; 32]), TokenId::from_bytes([2u8; 32]))
    ///     .expect("distinct");
    /// let mut pool = ConstantProductPool::new(key, BlockHeight::GENESIS);
    /// pool.add_liquidity(Amount::new(1_000_000), Amount::new(1_000_000), Amount::ZERO, Amount::ZERO)
    ///     .expect("first deposit");
    ///
    /// assert_eq!(pool.estimate_amount_out(Side::A, Amount::ZERO), Some(Amount::ZERO));
    /// assert_eq!(pool.estimate_amount_out(Side::A, Amount::new(1_000)), Some(Amount::new(996)));
    /// ```
    #[must_use]
    pub fn estimate_amount_out(&self, side_in: Side, amount_in: Amount) -> Option<Amount> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        let effective_in = amount_in.checked_scale(FEE_NUMERATOR)?;
        let denominator = reserve_in
            .checked_scale(FEE_DENOMINATOR)?
            .checked_add(&effective_in)?;
        mul_div(
            effective_in.get(),
            reserve_out.get(),
            denominator.get(),
            Rounding::Down,
        )
        .map(Amount::new)
    }

    /// Bare exact-out pricing formula, without the checks a swap applies.
    ///
    /// A zero output still costs one unit.  Returns `None` if `amount_out`
    /// would drain the output reserve or an intermediate overflows.
    #[must_use]
    pub fn estimate_amount_in(&self, side_in: Side, amount_out: Amount) -> Option<Amount> {
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        if amount_out >= reserve_out {
            return None;
        }
        let numerator = reserve_in
            .checked_mul(&amount_out)?
            .checked_scale(FEE_DENOMINATOR)?;
        let denominator = reserve_out
            .checked_sub(&amount_out)?
            .checked_scale(FEE_NUMERATOR)?;
        numerator
            .checked_div(&denominator, Rounding::Down)?
            .checked_add(&Amount::new(1))
    }

    // -- rewards ------------------------------------------------------------

    /// Brings the reward index up to `now` at `rate` per block.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the index overflows.
    pub fn accrue_rewards(
        &mut self,
        now: BlockHeight,
        rate: u128,
    ) -> Result<RewardIndex, ExchangeError> {
        self.rewards.accrue(now, rate, self.lp_total_supply)
    }

    /// The reward index as it would be after accruing at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the index overflows.
    pub fn projected_reward_index(
        &self,
        now: BlockHeight,
        rate: u128,
    ) -> Result<RewardIndex, ExchangeError> {
        self.rewards.projected(now, rate, self.lp_total_supply)
    }

    /// Rewards `position` has earned against the stored index.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the amount cannot be
    /// represented.
    pub fn pending_rewards(&self, position: &LiquidityPosition) -> Result<Liquidity, ExchangeError> {
        self.rewards.pending(position)
    }

    /// Mints `position`'s pending rewards into its balance and the LP
    /// supply, then checkpoints it at the current index.
    ///
    /// Returns the shares minted.  Call [`accrue_rewards`](Self::accrue_rewards)
    /// first so the index is current.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the balance or supply
    /// overflows; neither is changed in that case.
    pub fn settle_rewards(
        &mut self,
        position: &mut LiquidityPosition,
    ) -> Result<Liquidity, ExchangeError> {
        let earned = self.rewards.pending(position)?;
        if !earned.is_zero() {
            let supply = self.lp_total_supply.safe_add(&earned)?;
            position.credit(earned)?;
            self.lp_total_supply = supply;
        }
        position.checkpoint(self.rewards.index());
        Ok(earned)
    }

    // -- helpers ------------------------------------------------------------

    /// `(reserve_in, reserve_out)` for a trade selling the token on `side_in`.
    const fn oriented_reserves(&self, side_in: Side) -> (Amount, Amount) {
        match side_in {
            Side::A => (self.reserve_a, self.reserve_b),
            Side::B => (self.reserve_b, self.reserve_a),
        }
    }

    fn set_oriented_reserves(&mut self, side_in: Side, reserve_in: Amount, reserve_out: Amount) {
        match side_in {
            Side::A => {
                self.reserve_a = reserve_in;
                self.reserve_b = reserve_out;
            }
            Side::B => {
                self.reserve_b = reserve_in;
                self.reserve_a = reserve_out;
            }
        }
    }

    /// LP shares minted for accepted amounts `(amount_a, amount_b)`.
    fn shares_for(&self, amount_a: Amount, amount_b: Amount) -> Result<Liquidity, ExchangeError> {
        if self.is_empty() {
            let product = amount_a
                .checked_mul(&amount_b)
                .ok_or(ExchangeError::Overflow("initial liquidity product"))?;
            return Ok(Liquidity::new(
                product.get().saturating_sub(MINIMUM_LIQUIDITY),
            ));
        }
        let supply = self.lp_total_supply.get();
        let share_a = amount_a.safe_mul_div(supply, self.reserve_a.get(), Rounding::Down)?;
        let share_b = amount_b.safe_mul_div(supply, self.reserve_b.get(), Rounding::Down)?;
        Ok(Liquidity::new(core::cmp::min(share_a, share_b).get()))
    }
}

impl SwapPool for ConstantProductPool {
    fn key(&self) -> &PoolKey {
        &self.key
    }

    fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// `amount_out = effective_in × reserve_out / (reserve_in × 1000 + effective_in)`
    /// with `effective_in = amount_in × 997`, floored.
    fn quote_amount_out(&self, side_in: Side, amount_in: Amount) -> Result<Amount, ExchangeError> {
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount("swap input must be non-zero"));
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        let effective_in = amount_in
            .checked_scale(FEE_NUMERATOR)
            .ok_or(ExchangeError::Overflow("fee-adjusted input"))?;
        let denominator = reserve_in
            .checked_scale(FEE_DENOMINATOR)
            .ok_or(ExchangeError::Overflow("scaled input reserve"))?
            .safe_add(&effective_in)?;
        let amount_out =
            effective_in.safe_mul_div(reserve_out.get(), denominator.get(), Rounding::Down)?;

        if amount_out.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        Ok(amount_out)
    }

    /// `amount_in = reserve_in × amount_out × 1000 / ((reserve_out − amount_out) × 997) + 1`.
    fn quote_amount_in(&self, side_in: Side, amount_out: Amount) -> Result<Amount, ExchangeError> {
        if amount_out.is_zero() {
            return Err(ExchangeError::InvalidAmount("swap output must be non-zero"));
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        if reserve_in.is_zero() || amount_out >= reserve_out {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        let numerator = reserve_in
            .checked_mul(&amount_out)
            .and_then(|n| n.checked_scale(FEE_DENOMINATOR))
            .ok_or(ExchangeError::Overflow("exact-out numerator"))?;
        let denominator = reserve_out
            .safe_sub(&amount_out)?
            .checked_scale(FEE_NUMERATOR)
            .ok_or(ExchangeError::Overflow("exact-out denominator"))?;
        numerator
            .checked_div(&denominator, Rounding::Down)
            .ok_or(ExchangeError::InsufficientLiquidity)?
            .safe_add(&Amount::new(1))
    }

    fn swap(&mut self, side_in: Side, amount_in: Amount) -> Result<SwapReceipt, ExchangeError> {
        let amount_out = self.quote_amount_out(side_in, amount_in)?;
        let (reserve_in, reserve_out) = self.oriented_reserves(side_in);
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out.safe_sub(&amount_out)?;
        self.set_oriented_reserves(side_in, new_in, new_out);
        Ok(SwapReceipt::new(amount_in, amount_out))
    }
}

impl LiquidityPool for ConstantProductPool {
    fn lp_total_supply(&self) -> Liquidity {
        self.lp_total_supply
    }

    /// Empty pools accept the desired amounts.  Otherwise the desired A is
    /// matched with `b_optimal = a × Rb / Ra`; if that exceeds the desired B,
    /// the desired B is matched with `a_optimal = b × Ra / Rb` instead.
    fn quote_liquidity(
        &self,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
    ) -> Result<LiquidityQuote, ExchangeError> {
        if amount_a_desired.is_zero() || amount_b_desired.is_zero() {
            return Err(ExchangeError::InvalidAmount(
                "desired amounts must be non-zero",
            ));
        }
        if self.is_empty() {
            return Ok(LiquidityQuote::new(amount_a_desired, amount_b_desired));
        }
        if self.reserve_a.is_zero() || self.reserve_b.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }

        let b_optimal = amount_a_desired.safe_mul_div(
            self.reserve_b.get(),
            self.reserve_a.get(),
            Rounding::Down,
        )?;
        if b_optimal <= amount_b_desired {
            return Ok(LiquidityQuote::new(amount_a_desired, b_optimal));
        }
        let a_optimal = amount_b_desired.safe_mul_div(
            self.reserve_a.get(),
            self.reserve_b.get(),
            Rounding::Down,
        )?;
        Ok(LiquidityQuote::new(a_optimal, amount_b_desired))
    }

    fn add_liquidity(
        &mut self,
        amount_a_desired: Amount,
        amount_b_desired: Amount,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<AddLiquidityReceipt, ExchangeError> {
        if amount_a_desired.is_zero() || amount_b_desired.is_zero() {
            return Err(ExchangeError::InvalidAmount(
                "desired amounts must be non-zero",
            ));
        }
        if amount_a_min > amount_a_desired || amount_b_min > amount_b_desired {
            return Err(ExchangeError::InvalidAmount(
                "minimum exceeds desired amount",
            ));
        }

        let quote = self.quote_liquidity(amount_a_desired, amount_b_desired)?;
        let (amount_a, amount_b) = (quote.amount_a(), quote.amount_b());
        if amount_a < amount_a_min || amount_b < amount_b_min {
            return Err(ExchangeError::SlippageExceeded);
        }

        let minted = self.shares_for(amount_a, amount_b)?;
        if minted.is_zero() {
            return Err(ExchangeError::InvalidAmount(
                "deposit too small to mint liquidity",
            ));
        }

        let reserve_a = self.reserve_a.safe_add(&amount_a)?;
        let reserve_b = self.reserve_b.safe_add(&amount_b)?;
        let supply = self.lp_total_supply.safe_add(&minted)?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.lp_total_supply = supply;

        Ok(AddLiquidityReceipt::new(amount_a, amount_b, minted))
    }

    /// `amount_x = liquidity × reserve_x / lp_total_supply`, floored.
    fn remove_liquidity(
        &mut self,
        liquidity: Liquidity,
        amount_a_min: Amount,
        amount_b_min: Amount,
    ) -> Result<RemoveLiquidityReceipt, ExchangeError> {
        if liquidity.is_zero() {
            return Err(ExchangeError::InvalidAmount("cannot burn zero liquidity"));
        }
        if liquidity > self.lp_total_supply {
            return Err(ExchangeError::InsufficientBalance);
        }

        let supply = self.lp_total_supply.get();
        let amount_a = self
            .reserve_a
            .safe_mul_div(liquidity.get(), supply, Rounding::Down)?;
        let amount_b = self
            .reserve_b
            .safe_mul_div(liquidity.get(), supply, Rounding::Down)?;
        if amount_a < amount_a_min || amount_b < amount_b_min {
            return Err(ExchangeError::SlippageExceeded);
        }

        let reserve_a = self.reserve_a.safe_sub(&amount_a)?;
        let reserve_b = self.reserve_b.safe_sub(&amount_b)?;
        let supply = self.lp_total_supply.safe_sub(&liquidity)?;
        self.reserve_a = reserve_a;
        self.reserve_b = reserve_b;
        self.lp_total_supply = supply;

        Ok(RemoveLiquidityReceipt::new(amount_a, amount_b))
    }
}
