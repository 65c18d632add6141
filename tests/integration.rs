//! Integration tests exercising the full system from config to quote.
//!
//! These tests verify end-to-end flows through the public API:
//! factory construction, concrete pricing scenarios for every pool
//! family, the concentrated-liquidity tick walk, state refresh, and
//! routing across a heterogeneous set of pools.
//!
//! These tests require all pool features to be enabled.

#![cfg(all(feature = "constant-product", feature = "stable", feature = "clmm"))]
#![allow(clippy::panic)]

use amm_pricing::config::{
    AmmConfig, ClmmConfig, ClmmState, ConstantProductConfig, ReserveState, StableConfig,
};
use amm_pricing::domain::{
    Amount, Decimals, Direction, FeeTier, Liquidity, PoolId, Position, Rounding, Tick, TickMap,
    Token, TokenAddress, TokenPair,
};
use amm_pricing::error::AmmError;
use amm_pricing::factory::DefaultPoolFactory;
use amm_pricing::math::{
    close_values, price_tolerance, relative_error, round_trip_tolerance, sqrt_price_at_tick,
};
use amm_pricing::pools::{ClmmPool, PoolBox, PoolState, StablePool};
use amm_pricing::traits::{FromConfig, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Initialize tracing for tests (`RUST_LOG=amm_pricing=trace` to see crossings).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn tok_a() -> Token {
    Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", Decimals::EIGHTEEN)
}

fn tok_b() -> Token {
    let Ok(d) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d)
}

fn make_pair() -> TokenPair {
    let Ok(pair) = TokenPair::new(tok_a(), tok_b()) else {
        panic!("valid pair");
    };
    pair
}

fn pool_id(name: &str) -> PoolId {
    let Ok(id) = PoolId::new(name) else {
        panic!("valid pool id");
    };
    id
}

fn amount(v: f64) -> Amount {
    let Ok(a) = Amount::from_f64(v, Rounding::Down) else {
        panic!("representable amount {v}");
    };
    a
}

fn fee(fraction: f64) -> FeeTier {
    let Ok(f) = FeeTier::new(fraction) else {
        panic!("valid fee {fraction}");
    };
    f
}

fn tick(v: i32) -> Tick {
    let Ok(t) = Tick::new(v) else {
        panic!("valid tick");
    };
    t
}

fn position(lower: i32, upper: i32, liquidity: u128) -> Position {
    let Ok(p) = Position::new(tick(lower), tick(upper), Liquidity::new(liquidity)) else {
        panic!("valid position");
    };
    p
}

/// Forward quote, then invert its output: the input must come back.
fn check_swap<P: SwapPool>(pool: &P, amount_in: f64, direction: Direction) -> f64 {
    let Ok(fwd) = pool.quote_output(amount_in, direction) else {
        panic!("forward quote failed: in={amount_in} dir={direction}");
    };
    assert!(fwd.gas() > 0);
    assert!(fwd.amount_out() >= 0.0);

    let Ok(inv) = pool.quote_input(fwd.amount_out(), direction) else {
        panic!("inverse quote failed: out={} dir={direction}", fwd.amount_out());
    };
    assert!(inv.gas() > 0);
    assert!(inv.amount_in() >= 0.0);

    let tol = round_trip_tolerance(fwd.amount_out(), inv.amount_in());
    assert!(
        close_values(inv.amount_in(), amount_in, tol),
        "round trip: in={amount_in} out={} back={} dir={direction}",
        fwd.amount_out(),
        inv.amount_in()
    );
    fwd.amount_out()
}

/// `price(0→1) × price(1→0) ≈ 1`.
fn check_reciprocal_price<P: SwapPool>(pool: &P, reserve0: f64, reserve1: f64) -> f64 {
    let (Ok(p01), Ok(p10)) = (
        pool.spot_price(Direction::ZeroForOne),
        pool.spot_price(Direction::OneForZero),
    ) else {
        panic!("spot price failed");
    };
    let tol = price_tolerance(reserve0, reserve1);
    assert!(
        relative_error(p01.get() * p10.get(), 1.0) < tol,
        "reciprocal price: {} x {}",
        p01.get(),
        p10.get()
    );
    p01.get()
}

// ---------------------------------------------------------------------------
// Config builders for each pool type
// ---------------------------------------------------------------------------

fn cp_config(r0: f64, r1: f64, fee_fraction: f64) -> AmmConfig {
    let Ok(cfg) = ConstantProductConfig::new(
        pool_id("cp"),
        make_pair(),
        fee(fee_fraction),
        amount(r0),
        amount(r1),
    ) else {
        panic!("valid CP config");
    };
    AmmConfig::ConstantProduct(cfg)
}

fn stable_config(amp: u64, r0: f64, r1: f64, fee_fraction: f64) -> AmmConfig {
    let Ok(cfg) = StableConfig::new(
        pool_id("stable"),
        make_pair(),
        fee(fee_fraction),
        amp,
        amount(r0),
        amount(r1),
    ) else {
        panic!("valid stable config");
    };
    AmmConfig::Stable(cfg)
}

fn clmm_config(positions: &[Position], current: i32, fee_fraction: f64) -> ClmmConfig {
    let Ok(ticks) = TickMap::from_positions(positions) else {
        panic!("balanced tick map");
    };
    let Ok(liquidity) = ticks.liquidity_at(current) else {
        panic!("non-negative liquidity");
    };
    let Ok(state) = ClmmState::at_tick(tick(current), liquidity) else {
        panic!("valid state");
    };
    let Ok(cfg) = ClmmConfig::new(pool_id("clmm"), make_pair(), fee(fee_fraction), ticks, state)
    else {
        panic!("valid CLMM config");
    };
    cfg
}

fn create(config: &AmmConfig) -> PoolBox {
    let Ok(pool) = DefaultPoolFactory::create(config) else {
        panic!("factory failed for {config}");
    };
    pool
}

fn make_clmm(positions: &[Position], current: i32) -> ClmmPool {
    let Ok(pool) = ClmmPool::from_config(&clmm_config(positions, current, 0.003)) else {
        panic!("valid CLMM pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Constant product
// ---------------------------------------------------------------------------

#[test]
fn constant_product_typical_pool() {
    init_tracing();
    let pool = create(&cp_config(1e13, 1e13, 0.0));

    let out = check_swap(&pool, 1e8, Direction::ZeroForOne);
    let expected = 1e13 * 1e8 / (1e13 + 1e8);
    assert!(close_values(out, expected, 1e-12));

    check_swap(&pool, 1e8, Direction::OneForZero);
    let price = check_reciprocal_price(&pool, 1e13, 1e13);
    assert!(relative_error(price, 1.0) < 1e-15);
}

#[test]
fn constant_product_fee_and_gas() {
    let pool = create(&cp_config(1e13, 2e13, 0.003));
    let Ok(q) = pool.quote_output(1e10, Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    let net = 1e10 * 0.997;
    assert!(close_values(q.amount_out(), 2e13 * net / (1e13 + net), 1e-12));
    assert_eq!(q.gas(), 60_000);
    assert!(!q.is_partial_fill());
}

#[test]
fn constant_product_unreachable_output() {
    let pool = create(&cp_config(1e13, 1e13, 0.003));
    assert!(matches!(
        pool.quote_input(1e13, Direction::ZeroForOne),
        Err(AmmError::InsufficientLiquidity)
    ));
}

// ---------------------------------------------------------------------------
// Stable
// ---------------------------------------------------------------------------

#[test]
fn stable_typical_pool() {
    init_tracing();
    let pool = create(&stable_config(2_000, 1e13, 1e13, 1e-4));
    let out01 = check_swap(&pool, 1e8, Direction::ZeroForOne);
    let out10 = check_swap(&pool, 1e8, Direction::OneForZero);

    // deep balanced pool: only the fee and a sliver of slippage
    assert!(out01 < 1e8 * (1.0 - 1e-4));
    assert!(out01 > 1e8 * (1.0 - 2e-4));
    assert!(close_values(out01, out10, 1e-12));

    let price = check_reciprocal_price(&pool, 1e13, 1e13);
    assert!(relative_error(price, 1.0) < 1e-12);
}

#[test]
fn stable_price_matches_small_trade_rate() {
    let Ok(cfg) = StableConfig::new(
        pool_id("stable-scaled"),
        make_pair(),
        fee(1e-4),
        2_000,
        amount(1e46),
        amount(3e46),
    ) else {
        panic!("valid config");
    };
    let Ok(pool) = StablePool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let Ok(price) = pool.spot_price(Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    let net = 1e46 / 1e15;
    let Ok(q) = pool.quote_output(net / (1.0 - 1e-4), Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    assert!(relative_error(price.get(), q.amount_out() / net) < 1e-10);
}

#[test]
fn stable_beats_constant_product_near_peg() {
    let stable = create(&stable_config(500, 1e13, 1e13, 0.0005));
    let cp = create(&cp_config(1e13, 1e13, 0.0005));
    let (Ok(s), Ok(c)) = (
        stable.quote_output(1e11, Direction::ZeroForOne),
        cp.quote_output(1e11, Direction::ZeroForOne),
    ) else {
        panic!("expected Ok");
    };
    assert!(s.amount_out() > c.amount_out());
    assert_eq!(s.gas(), 90_000);
}

// ---------------------------------------------------------------------------
// Concentrated liquidity
// ---------------------------------------------------------------------------

const L: u128 = 1_000_000_000_000_000_000;

#[test]
fn clmm_empty_pool_is_zero_partial_fill() {
    init_tracing();
    let pool = make_clmm(&[], 0);
    for direction in [Direction::ZeroForOne, Direction::OneForZero] {
        let Ok(q) = pool.quote_output(1e6, direction) else {
            panic!("expected Ok");
        };
        assert!(q.is_partial_fill());
        assert_eq!(q.amount_out(), 0.0);
        assert_eq!(q.amount_in(), 0.0);
        assert_eq!(q.unfilled(), 1e6);
    }
}

#[test]
fn clmm_single_position_without_crossing() {
    init_tracing();
    let pool = make_clmm(&[position(-540, 540, L)], 0);
    let l = L as f64;
    for direction in [Direction::ZeroForOne, Direction::OneForZero] {
        let out = check_swap(&pool, 1e16, direction);
        let net = 1e16 * 0.997;
        // sp = 1: both directions reduce to the same closed form
        assert!(close_values(out, l * net / (net + l), 1e-12));
        let Ok(q) = pool.quote_output(1e16, direction) else {
            panic!("expected Ok");
        };
        assert_eq!(q.gas(), 70_000);
    }
}

#[test]
fn clmm_out_of_range_positions() {
    init_tracing();
    // liquidity above the current price only
    let above = make_clmm(&[position(420, 540, L)], 0);
    let Ok(q) = above.quote_output(1e15, Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    assert!(q.is_partial_fill());
    assert_eq!(q.amount_out(), 0.0);
    check_swap(&above, 1e15, Direction::OneForZero);

    // liquidity below the current price only
    let below = make_clmm(&[position(-540, 420, L)], 480);
    assert!(below.liquidity().is_zero());
    let Ok(q) = below.quote_output(1e15, Direction::OneForZero) else {
        panic!("expected Ok");
    };
    assert!(q.is_partial_fill());
    let Ok(q) = below.quote_output(1e15, Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    assert!(!q.is_partial_fill());
    assert_eq!(q.gas(), 90_000);
    check_swap(&below, 1e15, Direction::ZeroForOne);
}

#[test]
fn clmm_crossing_costs_more_than_staying_in_range() {
    let pool = make_clmm(&[position(-540, 540, L), position(-60, 60, 4 * L)], 0);
    let Ok(small) = pool.quote_output(1e15, Direction::OneForZero) else {
        panic!("expected Ok");
    };
    let Ok(large) = pool.quote_output(3e16, Direction::OneForZero) else {
        panic!("expected Ok");
    };
    assert_eq!(small.gas(), 70_000);
    assert_eq!(large.gas(), 90_000);
    assert!(large.gas() > small.gas());
    check_swap(&pool, 3e16, Direction::OneForZero);
    check_swap(&pool, 3e16, Direction::ZeroForOne);
}

#[test]
fn clmm_partial_fill_retry_with_consumed_amount() {
    init_tracing();
    let pool = make_clmm(&[position(-540, 540, L)], 0);
    for direction in [Direction::ZeroForOne, Direction::OneForZero] {
        let Ok(first) = pool.quote_output(1e20, direction) else {
            panic!("expected Ok");
        };
        assert!(first.is_partial_fill());
        assert!(first.amount_in() < first.requested());

        let Ok(retry) = pool.quote_output(first.amount_in(), direction) else {
            panic!("expected Ok");
        };
        assert!(close_values(retry.amount_out(), first.amount_out(), 1e-12));
    }

    // the exhausted band is exactly L·(1 − √P(-540)) of token1
    let Ok(down) = pool.quote_output(1e20, Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    let expected = L as f64 * (1.0 - sqrt_price_at_tick(-540));
    assert!(close_values(down.amount_out(), expected, 1e-12));
}

#[test]
fn clmm_refresh_then_quote() {
    let mut pool = make_clmm(&[position(-540, 540, L), position(0, 540, L)], 0);
    let Ok(moved) = ClmmState::at_tick(tick(-120), Liquidity::new(L)) else {
        panic!("valid state");
    };
    assert!(pool.refresh_state(moved).is_ok());
    let Ok(price) = pool.spot_price(Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    assert!(relative_error(price.get(), 1.0001f64.powi(-120)) < 1e-12);

    // moving back above tick 0 without the extra liquidity is rejected
    let Ok(bad) = ClmmState::at_tick(tick(10), Liquidity::new(L)) else {
        panic!("valid state");
    };
    assert!(matches!(
        pool.refresh_state(bad),
        Err(AmmError::InconsistentLiquidity(_))
    ));
    assert_eq!(pool.current_tick(), tick(-120));
}

// ---------------------------------------------------------------------------
// Factory, dispatch and routing
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_every_family() {
    let configs = [
        cp_config(1e13, 1e13, 0.003),
        stable_config(100, 1e13, 1e13, 0.0004),
        AmmConfig::Clmm(clmm_config(&[position(-540, 540, L)], 0, 0.0005)),
    ];
    let Ok(pools) = DefaultPoolFactory::create_all(&configs) else {
        panic!("expected Ok");
    };
    let kinds: Vec<&str> = pools.iter().map(PoolBox::kind).collect();
    assert_eq!(kinds, vec!["constant-product", "stable", "clmm"]);
    for pool in &pools {
        assert_eq!(*pool.token_pair(), make_pair());
    }
}

#[test]
fn best_route_across_pools() {
    let pools = [
        create(&cp_config(1e13, 1e13, 0.003)),
        create(&stable_config(200, 1e13, 1e13, 0.0004)),
        create(&AmmConfig::Clmm(clmm_config(
            &[position(-540, 540, 100_000_000_000_000)],
            0,
            0.0005,
        ))),
    ];
    let best = pools
        .iter()
        .filter_map(|p| {
            p.quote_token_output(&tok_a(), 1e9)
                .ok()
                .filter(|q| !q.is_partial_fill())
                .map(|q| (p.kind(), q.amount_out()))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));
    let Some((kind, _)) = best else {
        panic!("at least one pool quotes");
    };
    assert_eq!(kind, "stable");
}

#[test]
fn pool_box_refresh_round_trip() {
    let mut pool = create(&cp_config(1e13, 1e13, 0.003));
    let Ok(reserves) = ReserveState::new(amount(5e12), amount(2e13)) else {
        panic!("valid reserves");
    };
    assert!(pool.refresh_state(PoolState::ConstantProduct(reserves)).is_ok());
    check_reciprocal_price(&pool, 5e12, 2e13);
    let Ok(price) = pool.spot_price(Direction::ZeroForOne) else {
        panic!("expected Ok");
    };
    assert!(relative_error(price.get(), 4.0) < 1e-15);

    assert!(matches!(
        pool.refresh_state(PoolState::Stable(reserves)),
        Err(AmmError::StateMismatch(_))
    ));
}

#[test]
fn token_not_in_pair_is_rejected() {
    let pool = create(&cp_config(1e13, 1e13, 0.003));
    let stranger = Token::new(TokenAddress::from_bytes([9u8; 20]), "X", "X", Decimals::EIGHTEEN);
    assert!(matches!(
        pool.quote_token_output(&stranger, 1.0),
        Err(AmmError::InvalidToken(_))
    ));
}

#[test]
fn invalid_trade_amounts_are_rejected() {
    let pool = create(&stable_config(100, 1e13, 1e13, 0.0004));
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        let Err(e) = pool.quote_output(bad, Direction::ZeroForOne) else {
            panic!("expected Err for {bad}");
        };
        assert!(e.is_invalid_input());
    }
}
