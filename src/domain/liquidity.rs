//! Active liquidity of a concentrated-liquidity pool.

use core::fmt;

use crate::error::{AmmError, Result};

/// Liquidity units (`L`) active in the current price band.
///
/// Distinct from [`Amount`](super::Amount): `L` measures depth in a price
/// range, not a balance of either token.  Crossing a tick changes it by a
/// signed delta, see [`apply_delta`](Self::apply_delta).
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Liquidity;
///
/// let l = Liquidity::new(1_000);
/// assert_eq!(l.apply_delta(-400).expect("non-negative"), Liquidity::new(600));
/// assert!(l.apply_delta(-1_001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Liquidity(u128);

impl Liquidity {
    /// No liquidity.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Liquidity` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the liquidity is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Liquidity as `f64`, for quoting.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Applies a signed tick delta.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InconsistentLiquidity`] if the result would be
    /// negative or exceed `u128::MAX`.
    pub fn apply_delta(&self, delta: i128) -> Result<Self> {
        self.0
            .checked_add_signed(delta)
            .map(Self)
            .ok_or(AmmError::InconsistentLiquidity(
                "tick delta drives liquidity out of range",
            ))
    }
}

impl From<u128> for Liquidity {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
