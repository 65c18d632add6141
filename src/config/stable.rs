//! Configuration for StableSwap pools (Curve style).

use super::ReserveState;
use crate::domain::{Amount, FeeTier, PoolId, TokenPair};
use crate::error::AmmError;

/// Largest amplification coefficient accepted, matching Curve's `MAX_A`.
pub const MAX_AMPLIFICATION: u64 = 1_000_000;

/// Configuration for a two-coin StableSwap pool.
///
/// Defines the parameters of a Curve-style pool specialized in
/// low-slippage swaps between similarly-priced assets.
///
/// # Amplification Parameter
///
/// `amplification` is `A` as the pool contract reports it.  The invariant
/// uses `Ann = A · n` with `n = 2`:
///
/// - `A = 1`: the curve sits close to constant product
/// - `A → ∞`: the curve approaches constant sum (1:1 swaps)
/// - Typical range for stablecoin pairs: 50–5000
///
/// `A` is pool identity, not state: refreshing the pool replaces only the
/// reserves.
///
/// # Invariant
///
/// ```text
/// Ann · (x + y) + D = Ann · D + D³ / (4xy)
/// ```
///
/// # Validation
///
/// - Both reserves must be non-zero.
/// - `1 ≤ amplification ≤ MAX_AMPLIFICATION`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StableConfig {
    pool_id: PoolId,
    token_pair: TokenPair,
    fee_tier: FeeTier,
    amplification: u64,
    reserves: ReserveState,
}

impl StableConfig {
    /// Creates a new `StableConfig`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `amplification` is zero or
    ///   above [`MAX_AMPLIFICATION`].
    /// - [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn new(
        pool_id: PoolId,
        token_pair: TokenPair,
        fee_tier: FeeTier,
        amplification: u64,
        reserve0: Amount,
        reserve1: Amount,
    ) -> Result<Self, AmmError> {
        let config = Self {
            pool_id,
            token_pair,
            fee_tier,
            amplification,
            reserves: ReserveState::new(reserve0, reserve1)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if `amplification` is out of
    ///   range.
    /// - [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.amplification == 0 {
            return Err(AmmError::InvalidConfiguration(
                "amplification must be at least one",
            ));
        }
        if self.amplification > MAX_AMPLIFICATION {
            return Err(AmmError::InvalidConfiguration(
                "amplification exceeds the supported maximum",
            ));
        }
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

    /// Returns `A` as reported by the pool contract.
    #[must_use]
    pub const fn amplification(&self) -> u64 {
        self.amplification
    }

    /// Returns the initial reserves.
    #[must_use]
    pub const fn reserves(&self) -> ReserveState {
        self.reserves
    }
}
