//! Configuration for constant-product pools (Uniswap V2 style).

use super::ReserveState;
use crate::domain::{Amount, FeeTier, PoolId, TokenPair};
use crate::error::AmmError;

/// Configuration for a constant-product pool (`x · y = k`).
///
/// # Derived Values
///
/// - Invariant: `k = reserve0 × reserve1`
/// - Spot price of token0 in token1: `P = reserve1 / reserve0`
///
/// # Validation
///
/// - The pool id must be non-empty (enforced by [`PoolId`]).
/// - Both reserves must be non-zero.
/// - The token pair and fee are validated at construction of
///   [`TokenPair`] and [`FeeTier`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantProductConfig {
    pool_id: PoolId,
    token_pair: TokenPair,
    fee_tier: FeeTier,
    reserves: ReserveState,
}

impl ConstantProductConfig {
    /// Creates a new `ConstantProductConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn new(
        pool_id: PoolId,
        token_pair: TokenPair,
        fee_tier: FeeTier,
        reserve0: Amount,
        reserve1: Amount,
    ) -> Result<Self, AmmError> {
        let config = Self {
            pool_id,
            token_pair,
            fee_tier,
            reserves: ReserveState::new(reserve0, reserve1)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        self.reserves.validate()
    }

    /// Returns the pool identifier.
    #[must_use]
    pub const fn pool_id(&self) -> &PoolId {
        &self.pool_id
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the initial reserves.
    #[must_use]
    pub const fn reserves(&self) -> ReserveState {
        self.reserves
    }
}
