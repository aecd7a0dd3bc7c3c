//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Constant product**: `reserve_a × reserve_b` never decreases across swaps.
//! 2. **Swap reversibility**: a round trip A→B→A returns no more than it started with.
//! 3. **Liquidity conservation**: add then remove never pays out more than deposited.
//! 4. **Supply accounting**: settled balances always sum to the LP supply.
//! 5. **Exact-out quoting**: the quoted input buys at least the requested output.

use proptest::prelude::*;

use crate::domain::{
    Amount, BlockHeight, Liquidity, LiquidityPosition, PoolKey, RewardIndex, Side, TokenId,
};
use crate::traits::{LiquidityPool, SwapPool};

use super::ConstantProductPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(ra: u128, rb: u128) -> ConstantProductPool {
    let Ok(key) = PoolKey::new(TokenId::from_bytes([1u8; 32]), TokenId::from_bytes([2u8; 32]))
    else {
        panic!("valid key");
    };
    let mut pool = ConstantProductPool::new(key, BlockHeight::GENESIS);
    let Ok(_) = pool.add_liquidity(Amount::new(ra), Amount::new(rb), Amount::ZERO, Amount::ZERO)
    else {
        panic!("valid first deposit");
    };
    pool
}

fn side_of(flag: bool) -> Side {
    if flag { Side::A } else { Side::B }
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// A short sequence of (direction, amount) trades.
fn trades_strategy() -> impl Strategy<Value = Vec<(bool, u128)>> {
    prop::collection::vec((any::<bool>(), 1u128..=1_000_000u128), 1..12)
}

// ---------------------------------------------------------------------------
// Property 1: Constant product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_constant_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in trades_strategy(),
    ) {
        let mut pool = make_pool(ra, rb);
        let Some(mut k) = pool.constant_product() else {
            return Ok(());
        };

        for (dir, amount) in trades {
            if pool.swap(side_of(dir), Amount::new(amount)).is_err() {
                continue;
            }
            let Some(k_next) = pool.constant_product() else {
                return Ok(());
            };
            prop_assert!(k_next >= k, "k decreased: {} -> {}", k, k_next);
            k = k_next;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        divisor in 10u128..=10_000u128,
    ) {
        let swap_in = (ra / divisor).max(1);
        let mut pool = make_pool(ra, rb);

        let Ok(first) = pool.swap(Side::A, Amount::new(swap_in)) else {
            return Ok(());
        };
        let Ok(back) = pool.swap(Side::B, first.amount_out()) else {
            return Ok(());
        };

        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out().get(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Liquidity conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        add_a in 1u128..=5_000_000u128,
        add_b in 1u128..=5_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb);
        let supply_before = pool.lp_total_supply();

        let Ok(added) = pool.add_liquidity(
            Amount::new(add_a),
            Amount::new(add_b),
            Amount::ZERO,
            Amount::ZERO,
        ) else {
            return Ok(());
        };
        prop_assert!(added.amount_a().get() <= add_a);
        prop_assert!(added.amount_b().get() <= add_b);

        let Ok(removed) = pool.remove_liquidity(added.liquidity(), Amount::ZERO, Amount::ZERO)
        else {
            return Ok(());
        };
        prop_assert!(removed.amount_a() <= added.amount_a());
        prop_assert!(removed.amount_b() <= added.amount_b());
        prop_assert_eq!(pool.lp_total_supply(), supply_before);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Supply accounting under rewards
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_settled_balances_sum_to_supply(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        blocks in prop::collection::vec(1u64..=1_000u64, 1..6),
        rate in 0u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(ra, rb);
        let initial = pool.lp_total_supply();

        // Split the first deposit between two holders.
        let half = Liquidity::new(initial.get() / 2);
        let rest = Liquidity::new(initial.get() - half.get());
        let mut first = LiquidityPosition::new(half, RewardIndex::ZERO);
        let mut second = LiquidityPosition::new(rest, RewardIndex::ZERO);

        let mut now = BlockHeight::GENESIS;
        for (i, step) in blocks.into_iter().enumerate() {
            now = now.advance(step);
            let Ok(_) = pool.accrue_rewards(now, rate) else {
                return Ok(());
            };
            let holder = if i % 2 == 0 { &mut first } else { &mut second };
            let Ok(_) = pool.settle_rewards(holder) else {
                return Ok(());
            };
        }
        let Ok(_) = pool.settle_rewards(&mut first) else {
            return Ok(());
        };
        let Ok(_) = pool.settle_rewards(&mut second) else {
            return Ok(());
        };

        prop_assert_eq!(
            first.lp_balance().get() + second.lp_balance().get(),
            pool.lp_total_supply().get()
        );
        prop_assert!(pool.lp_total_supply() >= initial);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Exact-out quoting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_exact_out_quote_is_sufficient(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fraction in 2u128..=1_000u128,
        dir in any::<bool>(),
    ) {
        let pool = make_pool(ra, rb);
        let side_in = side_of(dir);
        let want = Amount::new((pool.reserve(side_in.opposite()).get() / fraction).max(1));

        let Ok(needed) = pool.quote_amount_in(side_in, want) else {
            return Ok(());
        };
        let Ok(got) = pool.quote_amount_out(side_in, needed) else {
            return Ok(());
        };
        prop_assert!(got >= want, "quoted input {} bought {} < {}", needed, got, want);
    }
}
