//! # AMM Pricing
//!
//! Off-chain pricing engine for decentralized-exchange pools: quote how much
//! a swap returns (or costs) against a snapshot of on-chain pool state,
//! without touching the chain.
//!
//! Three pool families share one contract, [`SwapPool`](traits::SwapPool):
//!
//! - **Constant Product** (Uniswap v2 style): `constant-product` feature
//! - **StableSwap** (Curve style, two coins): `stable` feature
//! - **Concentrated Liquidity** (Uniswap v3 style): `clmm` feature
//!
//! Every pool answers four questions: how much comes out for a given
//! input, how much must go in for a given output, what the marginal price
//! is right now, and how to absorb a fresh state snapshot.  Quotes never
//! mutate the pool.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `constant-product` | yes | `x · y = k` pools |
//! | `stable` | yes | StableSwap pools with a bounded Newton solver |
//! | `clmm` | yes | Tick-walking concentrated-liquidity pools |
//! | `all-pools` | yes | Enables all three pool types |
//! | `serde` | no | `Serialize`/`Deserialize` for configs, states and quotes |
//!
//! # Quick Start
//!
//! ```rust
//! use amm_pricing::config::{AmmConfig, ConstantProductConfig};
//! use amm_pricing::domain::{
//!     Amount, Decimals, Direction, FeeTier, PoolId, Token, TokenAddress, TokenPair,
//! };
//! use amm_pricing::factory::DefaultPoolFactory;
//! use amm_pricing::traits::SwapPool;
//!
//! // 1. Define two tokens
//! let weth = Token::new(
//!     TokenAddress::from_bytes([1u8; 20]),
//!     "WETH",
//!     "Wrapped Ether",
//!     Decimals::EIGHTEEN,
//! );
//! let usdc = Token::new(
//!     TokenAddress::from_bytes([2u8; 20]),
//!     "USDC",
//!     "USD Coin",
//!     Decimals::new(6).expect("valid decimals"),
//! );
//!
//! // 2. Describe a constant-product pool: 1 000 WETH against 3 000 000 USDC
//! let config = AmmConfig::ConstantProduct(
//!     ConstantProductConfig::new(
//!         PoolId::new("weth-usdc").expect("non-empty"),
//!         TokenPair::new(weth.clone(), usdc).expect("distinct tokens"),
//!         FeeTier::TIER_0_30_PERCENT,
//!         Amount::from_dec_str("1000000000000000000000").expect("decimal"),
//!         Amount::from_u128(3_000_000_000_000),
//!     )
//!     .expect("valid config"),
//! );
//!
//! // 3. Create the pool via the factory
//! let pool = DefaultPoolFactory::create(&config).expect("pool created");
//!
//! // 4. Quote selling 1 WETH
//! let quote = pool.quote_token_output(&weth, 1e18).expect("quote ok");
//! assert!(quote.amount_out() > 2_980e6 && quote.amount_out() < 3_000e6);
//! assert_eq!(quote.gas(), 60_000);
//!
//! // 5. Invert it: how much WETH buys exactly that much USDC?
//! let back = pool
//!     .quote_input(quote.amount_out(), Direction::ZeroForOne)
//!     .expect("reachable");
//! assert!((back.amount_in() / 1e18 - 1.0).abs() < 1e-9);
//! ```
//!
//! # Representation
//!
//! | Quantity | Type | Notes |
//! |----------|------|-------|
//! | Reserves | [`Amount`](domain::Amount) (`U256`) | Raw base units, as on chain |
//! | CLMM liquidity | [`Liquidity`](domain::Liquidity) (`u128`) | Crossed with exact `i128` deltas |
//! | CLMM sqrt-price | `U256` Q64.96 | Read as `sqrt_price_x96 / 2^96` |
//! | Trade amounts | `f64` | Raw base units, finite and non-negative |
//! | Prices | [`Price`](domain::Price) (`f64`) | Output per input, raw units |
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  uses AmmConfig + DefaultPoolFactory
//! └──────┬──────┘
//!        │ create(&config)
//!        ▼
//! ┌─────────────┐
//! │   Factory    │  validates config, dispatches to FromConfig
//! └──────┬──────┘
//!        │ PoolBox (enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  ConstantProduct, Stable, Clmm
//! └──────┬──────┘
//!        │ SwapPool trait
//!        ▼
//! ┌─────────────┐
//! │ Domain/Math  │  Amount, Tick, TickMap, SwapQuote, solver, tick math
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Price`](domain::Price), [`TickMap`](domain::TickMap), [`SwapQuote`](domain::SwapQuote), etc. |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative pool blueprints and state snapshots |
//! | [`pools`]  | Feature-gated pool implementations and [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) for config-driven pool construction |
//! | [`math`]   | Root finding, tick math, wide-integer conversion, tolerances |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.
//! State refreshes and partial fills log at `debug`, each tick crossing at
//! `trace`, and solver non-convergence at `warn`.

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
