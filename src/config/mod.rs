//! Pool configuration and state snapshots.
//!
//! This module contains the [`AmmConfig`] enum, the top-level declarative
//! blueprint for creating any pool type, along with the per-pool
//! configuration structs and the live-state snapshots accepted by
//! [`SwapPool::refresh_state`](crate::traits::SwapPool::refresh_state).

mod amm_config;
mod clmm;
mod constant_product;
mod reserves;
mod stable;

pub use amm_config::AmmConfig;
pub use clmm::{ClmmConfig, ClmmState, SQRT_PRICE_BAND_SLACK};
pub use constant_product::ConstantProductConfig;
pub use reserves::ReserveState;
pub use stable::{MAX_AMPLIFICATION, StableConfig};
