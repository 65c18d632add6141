//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool instances
//! from their respective configuration structs.  Each pool type implements
//! `FromConfig<C>` for its own config variant, enabling the factory to
//! dispatch construction without `dyn` trait objects.
//!
//! # Validation Contract
//!
//! Implementations validate the configuration again during construction,
//! since a config may arrive through deserialization without passing
//! through `new`.  A successfully constructed pool is in a valid initial state:
//!
//! - the pool id is non-empty and the token pair has two distinct
//!   addresses;
//! - reserves are non-zero;
//! - model parameters are valid (`A ≥ 1` for stable pools; a balanced
//!   tick map consistent with the active tick for CLMM pools).
//!
//! # Factory Integration
//!
//! ```text
//! AmmConfig::ConstantProduct(cfg) => ConstantProductPool::from_config(&cfg)
//! AmmConfig::Stable(cfg)          => StablePool::from_config(&cfg)
//! AmmConfig::Clmm(cfg)            => ClmmPool::from_config(&cfg)
//! ```

use crate::error::AmmError;

/// Builds a pool from its configuration struct.
///
/// # Implementors
///
/// - `impl FromConfig<ConstantProductConfig> for ConstantProductPool`
/// - `impl FromConfig<StableConfig> for StablePool`
/// - `impl FromConfig<ClmmConfig> for ClmmPool`
///
/// # Errors
///
/// Returns [`AmmError::InvalidConfiguration`] (or a more specific
/// variant) if the configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of `config`.
    fn from_config(config: &C) -> Result<Self, AmmError>
    where
        Self: Sized;
}
