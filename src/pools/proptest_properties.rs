//! Property-based tests using `proptest` for quote invariants.
//!
//! 1. **Round trip**: `quote_input(quote_output(a).out).in ≈ a`.
//! 2. **Monotonicity**: more input never yields less output.
//! 3. **Reciprocal price**: `spot(0→1) × spot(1→0) ≈ 1`.
//! 4. **No mutation**: quoting leaves the pool untouched.
//! 5. **CLMM partial fills**: consumed input never exceeds the request.
//! 6. **CLMM snapshots**: a state built from `sqrtPriceX96` lands on the tick
//!    whose band holds the price.

use proptest::prelude::*;

use crate::config::{ClmmConfig, ClmmState, ConstantProductConfig, StableConfig};
use crate::domain::{
    Amount, Decimals, Direction, FeeTier, Liquidity, PoolId, Position, Tick, TickMap, Token,
    TokenAddress, TokenPair,
};
use crate::math::{close_values, price_tolerance, relative_error, round_trip_tolerance};
use crate::pools::{ClmmPool, ConstantProductPool, StablePool};
use crate::traits::{FromConfig, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pair() -> TokenPair {
    let a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "A", Decimals::EIGHTEEN);
    let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "B", Decimals::EIGHTEEN);
    let Ok(pair) = TokenPair::new(a, b) else {
        panic!("valid pair");
    };
    pair
}

fn pool_id() -> PoolId {
    let Ok(id) = PoolId::new("prop") else {
        panic!("valid id");
    };
    id
}

fn direction(zero_for_one: bool) -> Direction {
    if zero_for_one {
        Direction::ZeroForOne
    } else {
        Direction::OneForZero
    }
}

// ---------------------------------------------------------------------------
// Pool helpers (each creates a fresh pool from random parameters)
// ---------------------------------------------------------------------------

fn make_cp(r0: u128, r1: u128) -> ConstantProductPool {
    let Ok(cfg) = ConstantProductConfig::new(
        pool_id(),
        make_pair(),
        FeeTier::TIER_0_30_PERCENT,
        Amount::from_u128(r0),
        Amount::from_u128(r1),
    ) else {
        panic!("valid CP config");
    };
    let Ok(pool) = ConstantProductPool::from_config(&cfg) else {
        panic!("valid CP pool");
    };
    pool
}

fn make_stable(amp: u64, r0: u128, r1: u128) -> StablePool {
    let Ok(cfg) = StableConfig::new(
        pool_id(),
        make_pair(),
        FeeTier::TIER_0_05_PERCENT,
        amp,
        Amount::from_u128(r0),
        Amount::from_u128(r1),
    ) else {
        panic!("valid stable config");
    };
    let Ok(pool) = StablePool::from_config(&cfg) else {
        panic!("valid stable pool");
    };
    pool
}

/// Two overlapping positions around tick 0, with the pool parked at `current`.
fn make_clmm(inner: i32, outer: i32, liquidity: u128, current: i32) -> ClmmPool {
    let tick = |v: i32| {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    };
    let (Ok(wide), Ok(narrow)) = (
        Position::new(tick(-outer), tick(outer), Liquidity::new(liquidity)),
        Position::new(tick(-inner), tick(inner), Liquidity::new(liquidity * 2)),
    ) else {
        panic!("valid positions");
    };
    let Ok(ticks) = TickMap::from_positions(&[wide, narrow]) else {
        panic!("balanced map");
    };
    let Ok(active) = ticks.liquidity_at(current) else {
        panic!("non-negative");
    };
    let Ok(state) = ClmmState::at_tick(tick(current), active) else {
        panic!("valid state");
    };
    let Ok(cfg) = ClmmConfig::new(pool_id(), make_pair(), FeeTier::TIER_0_30_PERCENT, ticks, state)
    else {
        panic!("valid CLMM config");
    };
    let Ok(pool) = ClmmPool::from_config(&cfg) else {
        panic!("valid CLMM pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in `[1e9, 1e18]`, far from dust.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000u128..=1_000_000_000_000_000_000u128
}

/// Trade size as a fraction of the input reserve, `[1e-6, 0.1]`.
fn fraction_strategy() -> impl Strategy<Value = f64> {
    (1u32..=100_000u32).prop_map(|v| f64::from(v) / 1_000_000.0)
}

/// Amplification values for stable pools in `[1, 5000]`.
fn amplification_strategy() -> impl Strategy<Value = u64> {
    1u64..=5_000u64
}

/// Tick values in valid range for CLMM.
fn tick_strategy() -> impl Strategy<Value = i32> {
    -500_000i32..=500_000i32
}

// ---------------------------------------------------------------------------
// Property 1: Round Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_constant_product(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fraction in fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let pool = make_cp(r0, r1);
        let dir = direction(zero_for_one);
        let reserve_in = (if zero_for_one { r0 } else { r1 }) as f64;
        let amount = reserve_in * fraction;

        let Ok(fwd) = pool.quote_output(amount, dir) else {
            return Ok(());
        };
        if fwd.amount_out() <= 0.0 { return Ok(()); }
        let Ok(inv) = pool.quote_input(fwd.amount_out(), dir) else {
            return Err(TestCaseError::fail("inverse of a reachable output failed"));
        };
        let tol = round_trip_tolerance(fwd.amount_out(), amount);
        prop_assert!(
            close_values(inv.amount_in(), amount, tol),
            "cp round trip: in={} back={} tol={}",
            amount, inv.amount_in(), tol
        );
    }

    #[test]
    fn prop_round_trip_stable(
        amp in amplification_strategy(),
        r0 in reserve_strategy(),
        skew in 1u128..=10u128,
        fraction in fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let r1 = r0 / skew;
        let pool = make_stable(amp, r0, r1);
        let dir = direction(zero_for_one);
        // sized against the smaller reserve to stay off the drained tail
        let amount = r1 as f64 * fraction;

        let Ok(fwd) = pool.quote_output(amount, dir) else {
            return Ok(());
        };
        if fwd.amount_out() <= 0.0 { return Ok(()); }
        let Ok(inv) = pool.quote_input(fwd.amount_out(), dir) else {
            return Err(TestCaseError::fail("inverse of a reachable output failed"));
        };
        let tol = round_trip_tolerance(fwd.amount_out(), amount);
        prop_assert!(
            close_values(inv.amount_in(), amount, tol),
            "stable round trip: amp={} in={} back={} tol={}",
            amp, amount, inv.amount_in(), tol
        );
    }

    #[test]
    fn prop_round_trip_clmm(
        inner in 60i32..=600i32,
        extra in 60i32..=6_000i32,
        fraction in fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let liquidity = 1_000_000_000_000_000_000u128;
        let pool = make_clmm(inner, inner + extra, liquidity, 0);
        let dir = direction(zero_for_one);
        let amount = liquidity as f64 * fraction * 0.1;

        let Ok(fwd) = pool.quote_output(amount, dir) else {
            return Err(TestCaseError::fail("forward quote failed"));
        };
        if fwd.is_partial_fill() || fwd.amount_out() <= 0.0 { return Ok(()); }
        let Ok(inv) = pool.quote_input(fwd.amount_out(), dir) else {
            return Err(TestCaseError::fail("inverse of a reachable output failed"));
        };
        let tol = round_trip_tolerance(fwd.amount_out(), amount);
        prop_assert!(
            close_values(inv.amount_in(), amount, tol),
            "clmm round trip: in={} back={} tol={}",
            amount, inv.amount_in(), tol
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_monotone_constant_product(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let pool = make_cp(r0, r1);
        let small = r0 as f64 * fraction;
        let (Ok(a), Ok(b)) = (
            pool.quote_output(small, Direction::ZeroForOne),
            pool.quote_output(small * 2.0, Direction::ZeroForOne),
        ) else {
            return Ok(());
        };
        prop_assert!(b.amount_out() >= a.amount_out());
        prop_assert!(b.amount_out() < r1 as f64);
    }

    #[test]
    fn prop_output_monotone_stable(
        amp in amplification_strategy(),
        r0 in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let pool = make_stable(amp, r0, r0);
        let small = r0 as f64 * fraction;
        let (Ok(a), Ok(b)) = (
            pool.quote_output(small, Direction::OneForZero),
            pool.quote_output(small * 2.0, Direction::OneForZero),
        ) else {
            return Ok(());
        };
        prop_assert!(b.amount_out() >= a.amount_out());
        prop_assert!(b.amount_out() <= r0 as f64);
    }

    #[test]
    fn prop_output_monotone_clmm(
        inner in 60i32..=600i32,
        fraction in fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let pool = make_clmm(inner, inner * 4, 1_000_000_000_000_000_000, 0);
        let dir = direction(zero_for_one);
        let small = 1e16 * fraction;
        let (Ok(a), Ok(b)) = (
            pool.quote_output(small, dir),
            pool.quote_output(small * 3.0, dir),
        ) else {
            return Err(TestCaseError::fail("clmm quote failed"));
        };
        prop_assert!(b.amount_out() >= a.amount_out());
        prop_assert!(b.gas() >= a.gas());
    }
}

// ---------------------------------------------------------------------------
// Property 3: Reciprocal Spot Price
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reciprocal_price_constant_product(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
    ) {
        let pool = make_cp(r0, r1);
        let (Ok(p01), Ok(p10)) = (
            pool.spot_price(Direction::ZeroForOne),
            pool.spot_price(Direction::OneForZero),
        ) else {
            return Err(TestCaseError::fail("spot price failed"));
        };
        let tol = price_tolerance(r0 as f64, r1 as f64);
        prop_assert!(relative_error(p01.get() * p10.get(), 1.0) < tol);
    }

    #[test]
    fn prop_reciprocal_price_stable(
        amp in amplification_strategy(),
        r0 in reserve_strategy(),
        skew in 1u128..=10u128,
    ) {
        let r1 = r0 / skew;
        let pool = make_stable(amp, r0, r1);
        let (Ok(p01), Ok(p10)) = (
            pool.spot_price(Direction::ZeroForOne),
            pool.spot_price(Direction::OneForZero),
        ) else {
            return Err(TestCaseError::fail("spot price failed"));
        };
        let tol = price_tolerance(r0 as f64, r1 as f64);
        prop_assert!(
            relative_error(p01.get() * p10.get(), 1.0) < tol,
            "stable reciprocal: {} x {}",
            p01.get(), p10.get()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 4 and 5: No Mutation, Partial Fills
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quotes_do_not_mutate(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fraction in fraction_strategy(),
    ) {
        let pool = make_cp(r0, r1);
        let before = pool.clone();
        let _ = pool.quote_output(r0 as f64 * fraction, Direction::ZeroForOne);
        let _ = pool.quote_input(r0 as f64 * fraction, Direction::OneForZero);
        prop_assert_eq!(pool, before);
    }

    #[test]
    fn prop_clmm_consumed_never_exceeds_request(
        inner in 60i32..=600i32,
        current in -50i32..=50i32,
        exponent in 10i32..=24i32,
        zero_for_one in any::<bool>(),
    ) {
        let pool = make_clmm(inner, inner * 2, 1_000_000_000_000_000_000, current);
        let amount = 10f64.powi(exponent);
        let Ok(q) = pool.quote_output(amount, direction(zero_for_one)) else {
            return Err(TestCaseError::fail("clmm quote failed"));
        };
        prop_assert!(q.amount_in() <= q.requested());
        prop_assert_eq!(q.requested(), amount);
        if q.is_partial_fill() {
            // running out of ticks means every band was crossed
            prop_assert!(q.gas() >= 70_000 + 20_000 * 2);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: CLMM snapshots from sqrtPriceX96
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_clmm_snapshot_tick_brackets_price(
        tick_val in tick_strategy(),
        offset in 0.0f64..0.999,
    ) {
        let sqrt_price = crate::math::sqrt_price_at_tick(tick_val) * 1.0001f64.powf(offset / 2.0);
        let Ok(x96) = crate::math::sqrt_price_to_x96(sqrt_price) else {
            return Err(TestCaseError::fail("sqrt price not encodable"));
        };
        let Ok(state) = ClmmState::from_sqrt_price_x96(
            Amount::ZERO,
            Amount::ZERO,
            Liquidity::ZERO,
            x96,
        ) else {
            return Err(TestCaseError::fail(format!("snapshot rejected at {tick_val}+{offset}")));
        };
        prop_assert_eq!(state.tick().get(), tick_val);
        prop_assert!(relative_error(state.sqrt_price(), sqrt_price) < 1e-15);
    }
}
