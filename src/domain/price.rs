//! Marginal exchange rate quoted by a pool.

use core::fmt;

use crate::error::AmmError;

/// A fee-free marginal price: units of the output token per unit of the
/// input token.
///
/// Wraps an `f64` that must be finite and strictly positive, since every
/// pool with non-empty reserves has a positive marginal rate.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Price;
///
/// let price = Price::new(1.5).expect("positive");
/// let inverse = price.inverse().expect("positive");
/// assert!((price.get() * inverse.get() - 1.0).abs() < 1e-15);
/// assert!(Price::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(f64);

impl Price {
    /// Price ratio of 1:1.
    pub const ONE: Self = Self(1.0);

    /// Creates a new `Price`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrice`] if the value is zero, negative,
    /// NaN, or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(AmmError::InvalidPrice(
                "price must be finite and strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Computes the reciprocal price (`1 / self`).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrice`] if the reciprocal overflows or
    /// underflows to zero.
    pub fn inverse(&self) -> crate::error::Result<Self> {
        Self::new(1.0 / self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
