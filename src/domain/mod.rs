//! Fundamental domain value types used throughout the pricing engine.
//!
//! This module contains the value types that model pool state and quotes:
//! tokens, integer amounts, prices, ticks, positions, tick maps, fee tiers,
//! and quote results.  Newtypes with validated constructors enforce the
//! invariants each type documents.

mod amount;
mod decimals;
mod direction;
mod fee_tier;
mod liquidity;
mod pool_id;
mod position;
mod price;
mod rounding;
mod swap_quote;
mod tick;
mod tick_map;
mod token;
mod token_address;
mod token_pair;

pub use amount::Amount;
pub use decimals::Decimals;
pub use direction::Direction;
pub use fee_tier::FeeTier;
pub use liquidity::Liquidity;
pub use pool_id::PoolId;
pub use position::Position;
pub use price::Price;
pub use rounding::Rounding;
pub use swap_quote::SwapQuote;
pub use tick::Tick;
pub use tick_map::TickMap;
pub use token::Token;
pub use token_address::TokenAddress;
pub use token_pair::TokenPair;
