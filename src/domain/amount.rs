//! Raw on-chain token quantity backed by a 256-bit unsigned integer.

use core::fmt;

use primitive_types::U256;

use super::Rounding;
use crate::error::Result;
use crate::math::{parse_u256, u256_from_f64, u256_to_f64};

/// A raw token amount in the smallest unit (wei or equivalent).
///
/// Pool snapshots carry reserves as `Amount` so that any on-chain balance,
/// up to `2^256 − 1`, is represented exactly.  Quotes are computed in
/// `f64`; use [`to_f64`](Self::to_f64) and [`from_f64`](Self::from_f64) to
/// cross that boundary explicitly.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Amount;
///
/// let a = Amount::from_u128(100);
/// let b = Amount::from_u128(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::from_u128(300)));
/// assert_eq!(b.to_f64(), 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256::MAX);

    /// Wraps a raw [`U256`].
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Creates an amount from a `u128`.
    pub fn from_u128(value: u128) -> Self {
        Self(U256::from(value))
    }

    /// Converts an `f64` quantity to an integer amount.
    ///
    /// # Errors
    ///
    /// Propagates [`u256_from_f64`](crate::math::u256_from_f64) failures:
    /// negative, non-finite, or out-of-range values.
    pub fn from_f64(value: f64, rounding: Rounding) -> Result<Self> {
        u256_from_f64(value, rounding).map(Self)
    }

    /// Parses a decimal integer string such as `"1000000000000000000"`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidQuantity`](crate::error::AmmError::InvalidQuantity)
    /// for malformed or oversized input.
    pub fn from_dec_str(text: &str) -> Result<Self> {
        parse_u256(text).map(Self)
    }

    /// Returns the underlying [`U256`].
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Nearest `f64` to this amount.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        u256_to_f64(self.0)
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked division with explicit rounding direction.
    ///
    /// [`Rounding::Nearest`] rounds half up.  Returns `None` if `divisor`
    /// is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0.is_zero() {
            return None;
        }
        let (q, r) = self.0.div_mod(divisor.0);
        let bump = match rounding {
            Rounding::Down => false,
            Rounding::Up => !r.is_zero(),
            // r ≥ d − r  ⇔  2r ≥ d, written without doubling r
            Rounding::Nearest => r >= divisor.0 - r,
        };
        if bump { q.checked_add(U256::one()).map(Self) } else { Some(Self(q)) }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
