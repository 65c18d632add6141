//! Token decimal places.

use crate::error::AmmError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places between a token's human-readable unit and its
/// raw on-chain base unit.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.to_base_units(2.5), 2_500_000.0);
/// assert_eq!(d.from_base_units(2_500_000.0), 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// The usual 18 decimal places of ERC-20 tokens.
    pub const EIGHTEEN: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrecision`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidPrecision("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Human-readable amount to base units: `amount × 10^decimals`.
    #[must_use]
    pub fn to_base_units(&self, amount: f64) -> f64 {
        amount * self.factor()
    }

    /// Base units to a human-readable amount: `raw / 10^decimals`.
    #[must_use]
    pub fn from_base_units(&self, raw: f64) -> f64 {
        raw / self.factor()
    }

    fn factor(&self) -> f64 {
        10f64.powi(i32::from(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn range_is_validated() {
        assert!(Decimals::new(0).is_ok());
        assert!(Decimals::new(18).is_ok());
        let Err(e) = Decimals::new(19) else {
            panic!("expected Err");
        };
        assert!(matches!(e, AmmError::InvalidPrecision(_)));
    }

    #[test]
    fn scaling_round_trip() {
        let d = Decimals::EIGHTEEN;
        assert_eq!(d.to_base_units(1.0), 1e18);
        assert_eq!(d.from_base_units(1e18), 1.0);
        assert_eq!(Decimals::ZERO.to_base_units(42.0), 42.0);
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Decimals::default(), Decimals::ZERO);
    }
}
