//! Core trait abstractions for pool pricing.
//!
//! [`SwapPool`] is the quoting contract every pool model satisfies, and
//! [`FromConfig`] builds a pool from its configuration struct.

mod from_config;
mod swap_pool;

pub use from_config::FromConfig;
pub use swap_pool::SwapPool;
pub(crate) use swap_pool::check_trade_amount;
