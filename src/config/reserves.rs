//! Two-sided reserve snapshot shared by reserve-based pools.

use crate::domain::Amount;
use crate::error::AmmError;

/// Live reserves of a constant-product or stable pool.
///
/// Reserves are on-chain integers in raw base units of each token.
///
/// # Examples
///
/// ```
/// use amm_pricing::config::ReserveState;
/// use amm_pricing::domain::Amount;
///
/// let state = ReserveState::new(Amount::from_u128(10_000), Amount::from_u128(20_000))
///     .expect("non-zero reserves");
/// assert_eq!(state.reserve1(), Amount::from_u128(20_000));
/// assert!(ReserveState::new(Amount::ZERO, Amount::from_u128(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReserveState {
    reserve0: Amount,
    reserve1: Amount,
}

impl ReserveState {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn new(reserve0: Amount, reserve1: Amount) -> Result<Self, AmmError> {
        let state = Self { reserve0, reserve1 };
        state.validate()?;
        Ok(state)
    }

    /// Validates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if either reserve is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.reserve0.is_zero() || self.reserve1.is_zero() {
            return Err(AmmError::ZeroReserve);
        }
        Ok(())
    }

    /// Reserve of token0.
    #[must_use]
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// Reserve of token1.
    #[must_use]
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }

    /// Both reserves as `f64`, for quoting.
    #[must_use]
    pub fn to_f64_pair(&self) -> (f64, f64) {
        (self.reserve0.to_f64(), self.reserve1.to_f64())
    }
}
