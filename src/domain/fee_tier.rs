//! Swap fee expressed as a fraction of the input amount.

use core::fmt;

use crate::error::{AmmError, Result};

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: f64 = 10_000.0;

/// Pip denominator used by Uniswap v3 style pools (1 000 000 = 100%).
const PIPS_DENOMINATOR: f64 = 1_000_000.0;

/// A pool's swap fee as a fraction in `[0, 1)`.
///
/// The fee is always taken from the input side:
/// `net_input = amount_in × (1 − fee)`.  The inverse,
/// [`gross_of_fee`](Self::gross_of_fee), recovers the input a trader must
/// send for a desired net amount.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::FeeTier;
///
/// let tier = FeeTier::from_basis_points(30).expect("valid");
/// assert!((tier.fraction() - 0.003).abs() < 1e-15);
/// let net = tier.net_of_fee(1_000.0);
/// assert!((tier.gross_of_fee(net) - 1_000.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(f64);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(0.0);

    /// 0.01% fee (1 bp), typical for pegged pairs.
    pub const TIER_0_01_PERCENT: Self = Self(0.0001);

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(0.0005);

    /// 0.30% fee (30 bp), the classic constant-product fee.
    pub const TIER_0_30_PERCENT: Self = Self(0.003);

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(0.01);

    /// Creates a fee tier from a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] unless `0 ≤ fraction < 1`.
    pub fn new(fraction: f64) -> Result<Self> {
        if !fraction.is_finite() || !(0.0..1.0).contains(&fraction) {
            return Err(AmmError::InvalidFee("fee must be within [0, 1)"));
        }
        Ok(Self(fraction))
    }

    /// Creates a fee tier from parts per ten thousand (`30` = 0.30%).
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for `bps ≥ 10 000`.
    pub fn from_basis_points(bps: u32) -> Result<Self> {
        Self::new(f64::from(bps) / BPS_DENOMINATOR)
    }

    /// Creates a fee tier from parts per million (`3000` = 0.30%), the unit
    /// concentrated-liquidity contracts report.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] for `pips ≥ 1 000 000`.
    pub fn from_pips(pips: u32) -> Result<Self> {
        Self::new(f64::from(pips) / PIPS_DENOMINATOR)
    }

    /// Returns the fee fraction.
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Input remaining after the fee: `amount × (1 − fee)`.
    #[must_use]
    pub fn net_of_fee(&self, amount: f64) -> f64 {
        amount * (1.0 - self.0)
    }

    /// Input required so that `net` remains after the fee: `net / (1 − fee)`.
    #[must_use]
    pub fn gross_of_fee(&self, net: f64) -> f64 {
        net / (1.0 - self.0)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({}%)", self.0 * 100.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn accepts_zero_and_rejects_one() {
        assert!(FeeTier::new(0.0).is_ok());
        assert!(FeeTier::new(0.999).is_ok());
        assert!(FeeTier::new(1.0).is_err());
        assert!(FeeTier::new(-0.001).is_err());
        assert!(FeeTier::new(f64::NAN).is_err());
    }

    #[test]
    fn basis_points_and_pips_agree() {
        let Ok(bps) = FeeTier::from_basis_points(5) else {
            panic!("expected Ok");
        };
        let Ok(pips) = FeeTier::from_pips(500) else {
            panic!("expected Ok");
        };
        assert!((bps.fraction() - pips.fraction()).abs() < 1e-18);
        assert!((bps.fraction() - FeeTier::TIER_0_05_PERCENT.fraction()).abs() < 1e-18);
    }

    #[test]
    fn hundred_percent_rejected() {
        let Err(e) = FeeTier::from_basis_points(10_000) else {
            panic!("expected Err");
        };
        assert!(matches!(e, AmmError::InvalidFee(_)));
        assert!(FeeTier::from_pips(1_000_000).is_err());
    }

    // -- Fee application ----------------------------------------------------

    #[test]
    fn net_and_gross_are_inverse() {
        let tier = FeeTier::TIER_0_30_PERCENT;
        let net = tier.net_of_fee(1e8);
        assert!((net - 99_700_000.0).abs() < 1e-6);
        assert!((tier.gross_of_fee(net) / 1e8 - 1.0).abs() < 1e-15);
    }

    #[test]
    fn zero_fee_is_identity() {
        assert_eq!(FeeTier::ZERO.net_of_fee(123.0), 123.0);
        assert_eq!(FeeTier::ZERO.gross_of_fee(123.0), 123.0);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", FeeTier::ZERO), "FeeTier(0%)");
    }
}
