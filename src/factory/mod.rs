//! Config-driven pool construction.
//!
//! [`DefaultPoolFactory`] turns an [`AmmConfig`] into a [`PoolBox`], so a
//! router can hold pools of every family in one `Vec` and quote them
//! side by side.  [`DefaultPoolFactory::create_all`] builds a batch and
//! fails on the first bad config.
//!
//! # Usage
//!
//! ```rust
//! use amm_pricing::config::{AmmConfig, ConstantProductConfig};
//! use amm_pricing::domain::{
//!     Amount, Decimals, FeeTier, PoolId, Token, TokenAddress, TokenPair,
//! };
//! use amm_pricing::factory::DefaultPoolFactory;
//! use amm_pricing::traits::SwapPool;
//!
//! let d18 = Decimals::EIGHTEEN;
//! let tok_a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", d18);
//! let tok_b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d18);
//! let pair = TokenPair::new(tok_a, tok_b).expect("distinct");
//! let fee = FeeTier::TIER_0_30_PERCENT;
//! let cfg = ConstantProductConfig::new(
//!     PoolId::new("a-b").expect("non-empty"),
//!     pair,
//!     fee,
//!     Amount::from_u128(1_000_000),
//!     Amount::from_u128(1_000_000),
//! )
//! .expect("valid");
//!
//! let pool = DefaultPoolFactory::create(&AmmConfig::ConstantProduct(cfg))
//!     .expect("pool created");
//! assert_eq!(pool.fee_tier(), fee);
//! ```
//!
//! # Feature Gating
//!
//! A config whose pool family is compiled out yields
//! [`AmmError::InvalidConfiguration`] rather than a missing variant.
//!
//! [`AmmConfig`]: crate::config::AmmConfig
//! [`PoolBox`]: crate::pools::PoolBox
//! [`AmmError::InvalidConfiguration`]: crate::error::AmmError::InvalidConfiguration

mod default_factory;

pub use default_factory::DefaultPoolFactory;
