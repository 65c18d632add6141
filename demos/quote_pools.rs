//! Quoting across every pool family.
//!
//! Builds a constant-product, a StableSwap, and a concentrated-liquidity
//! pool for the same USDC/USDT pair, quotes the same trade on each, picks
//! the best route, then shows a CLMM partial fill and a state refresh.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=amm_pricing=debug cargo run --example quote_pools
//! ```

use amm_pricing::config::{
    AmmConfig, ClmmConfig, ClmmState, ConstantProductConfig, ReserveState, StableConfig,
};
use amm_pricing::domain::{
    Amount, Decimals, FeeTier, Liquidity, PoolId, Position, Tick, TickMap, Token, TokenAddress,
    TokenPair,
};
use amm_pricing::factory::DefaultPoolFactory;
use amm_pricing::pools::PoolState;
use amm_pricing::traits::SwapPool;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== AMM pricing: one trade, three pools ===\n");

    // ── 1. Define tokens ────────────────────────────────────────────────
    let d6 = Decimals::new(6)?;
    let usdc = Token::new(
        "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse::<TokenAddress>()?,
        "USDC",
        "USD Coin",
        d6,
    );
    let usdt = Token::new(
        "0xdac17f958d2ee523a2206206994597c13d831ec7".parse::<TokenAddress>()?,
        "USDT",
        "Tether USD",
        d6,
    );
    let pair = TokenPair::new_sorted(usdc.clone(), usdt)?;
    let ten_million = Amount::from_u128(10_000_000_000_000); // 10M with 6 decimals

    // ── 2. Describe the pools ───────────────────────────────────────────
    let cp = AmmConfig::ConstantProduct(ConstantProductConfig::new(
        PoolId::new("usdc-usdt-v2")?,
        pair.clone(),
        FeeTier::TIER_0_30_PERCENT,
        ten_million,
        ten_million,
    )?);

    let stable = AmmConfig::Stable(StableConfig::new(
        PoolId::new("usdc-usdt-curve")?,
        pair.clone(),
        FeeTier::TIER_0_01_PERCENT,
        2_000,
        ten_million,
        ten_million,
    )?);

    // Deep liquidity within ±0.5% of the peg, a thin layer out to ±10%.
    let band = Position::new(
        Tick::new(-50)?,
        Tick::new(50)?,
        Liquidity::new(2_000_000_000_000_000),
    )?;
    let wide = Position::new(
        Tick::new(-1_000)?,
        Tick::new(1_000)?,
        Liquidity::new(50_000_000_000_000),
    )?;
    let ticks = TickMap::from_positions(&[band, wide])?;
    let state = ClmmState::at_tick(Tick::ZERO, ticks.liquidity_at(0)?)?;
    let clmm = AmmConfig::Clmm(ClmmConfig::new(
        PoolId::new("usdc-usdt-v3")?,
        pair.clone(),
        FeeTier::TIER_0_01_PERCENT,
        ticks,
        state,
    )?);

    // ── 3. Create the pools via the factory ─────────────────────────────
    let mut pools = DefaultPoolFactory::create_all([&cp, &stable, &clmm])?;
    for pool in &pools {
        println!("{pool}: fee {}", pool.fee_tier());
    }

    // ── 4. Quote selling 250 000 USDC on each ───────────────────────────
    let amount_in = 250_000_000_000.0;
    println!("\nSelling {} {}:", amount_in / 1e6, usdc.symbol());
    let mut best: Option<(String, f64)> = None;
    for pool in &pools {
        let quote = pool.quote_token_output(&usdc, amount_in)?;
        println!(
            "  {:<28} out = {:>14.2}  gas = {:>6}{}",
            pool.to_string(),
            quote.amount_out() / 1e6,
            quote.gas(),
            if quote.is_partial_fill() { "  (partial)" } else { "" }
        );
        if !quote.is_partial_fill() && best.as_ref().is_none_or(|(_, out)| quote.amount_out() > *out) {
            best = Some((pool.to_string(), quote.amount_out()));
        }
    }
    if let Some((name, out)) = best {
        println!("Best route: {name} ({:.2} out)", out / 1e6);
    }

    // ── 5. Invert: what does 100 000 USDT cost? ─────────────────────────
    let direction = pair.direction_of(&usdc)?;
    println!("\nBuying 100 000 out:");
    for pool in &pools {
        let quote = pool.quote_input(100_000_000_000.0, direction)?;
        println!("  {:<28} in  = {:>14.2}", pool.to_string(), quote.amount_in() / 1e6);
    }

    // ── 6. Exhaust the concentrated pool ────────────────────────────────
    let whale = 50_000_000_000_000.0;
    let quote = pools[2].quote_token_output(&usdc, whale)?;
    println!(
        "\nWhale trade on {}: consumed {:.2} of {:.2}, partial = {}",
        pools[2],
        quote.amount_in() / 1e6,
        quote.requested() / 1e6,
        quote.is_partial_fill()
    );

    // ── 7. Refresh the constant-product pool and re-quote ───────────────
    let drained = ReserveState::new(
        Amount::from_u128(12_000_000_000_000),
        Amount::from_u128(8_000_000_000_000),
    )?;
    pools[0].refresh_state(PoolState::ConstantProduct(drained))?;
    println!(
        "\nAfter refresh {}: spot {} , 250k out = {:.2}",
        pools[0],
        pools[0].spot_price(direction)?,
        pools[0].quote_output(amount_in, direction)?.amount_out() / 1e6
    );

    Ok(())
}
