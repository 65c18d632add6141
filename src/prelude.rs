//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use amm_pricing::prelude::*;
//! ```
//!
//! This re-exports the most frequently used domain types, core traits,
//! configuration types, error types, and factory utilities so that
//! consumers don't need to import from individual submodules.

// Re-export domain types
pub use crate::domain::{
    Amount, Decimals, Direction, FeeTier, Liquidity, PoolId, Position, Price, SwapQuote, Tick,
    TickMap, Token, TokenAddress, TokenPair,
};

// Re-export core traits
pub use crate::traits::{FromConfig, SwapPool};

// Re-export configuration
pub use crate::config::{
    AmmConfig, ClmmConfig, ClmmState, ConstantProductConfig, ReserveState, StableConfig,
};

// Re-export error types
pub use crate::error::{AmmError, Result};

// Re-export factory
pub use crate::factory::DefaultPoolFactory;

// Re-export pool dispatch
pub use crate::pools::{PoolBox, PoolState};
