//! 256-bit integer helpers and the conversion boundary to `f64`.
//!
//! On-chain quantities (reserves, raw token amounts, Q64.96 prices) are kept
//! as [`U256`] so that snapshots up to `~1.16e77` round-trip exactly.  All
//! pricing math runs in `f64`; the functions here are the only places where
//! values cross between the two representations.
//!
//! | Direction | Function | Precision |
//! |-----------|----------|-----------|
//! | `U256 → f64` | [`u256_to_f64`] | nearest `f64` (≤ 1 ulp) |
//! | `f64 → U256` | [`u256_from_f64`] | exact for integral inputs, explicit [`Rounding`] otherwise |

use primitive_types::U256;

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Number of explicit mantissa bits in an IEEE 754 double.
const MANTISSA_BITS: u32 = 52;

/// Exponent bias plus mantissa width: `value = mantissa × 2^(exp − 1075)`.
const EXPONENT_OFFSET: i32 = 1075;

/// Converts a [`U256`] to the nearest `f64`.
///
/// Values up to 128 bits go through the native `u128` conversion.  Wider
/// values keep their top 128 bits and are rescaled by a power of two,
/// which is exact in binary floating point.
///
/// # Examples
///
/// ```
/// use amm_pricing::math::u256_to_f64;
/// use primitive_types::U256;
///
/// assert_eq!(u256_to_f64(U256::from(1_000_000u64)), 1e6);
/// assert_eq!(u256_to_f64(U256::exp10(40)), 1e40);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn u256_to_f64(value: U256) -> f64 {
    let bits = value.bits();
    if bits <= 128 {
        return value.low_u128() as f64;
    }
    let shift = bits - 128;
    let top = (value >> shift).low_u128() as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let scale = 2f64.powi(shift as i32);
    top * scale
}

/// Converts a non-negative, finite `f64` to a [`U256`].
///
/// The value is first rounded to an integer in the requested direction,
/// then decoded from its IEEE 754 bit pattern, so the result is exact
/// for every integral `f64` below `2^256`.
///
/// # Errors
///
/// - [`AmmError::InvalidQuantity`] if `value` is negative, NaN, or infinite.
/// - [`AmmError::Overflow`] if the rounded value does not fit in 256 bits.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Rounding;
/// use amm_pricing::math::u256_from_f64;
/// use primitive_types::U256;
///
/// let v = u256_from_f64(1e30, Rounding::Down).expect("finite");
/// assert_eq!(v, U256::exp10(30));
/// ```
pub fn u256_from_f64(value: f64, rounding: Rounding) -> Result<U256> {
    if !value.is_finite() || value < 0.0 {
        return Err(AmmError::InvalidQuantity(
            "value must be finite and non-negative",
        ));
    }
    let rounded = rounding.apply(value);
    if rounded < 1.0 {
        return Ok(U256::zero());
    }

    let raw = rounded.to_bits();
    #[allow(clippy::cast_possible_truncation)]
    let biased = ((raw >> MANTISSA_BITS) & 0x7ff) as i32;
    let exponent = biased - EXPONENT_OFFSET;
    let mantissa = (raw & ((1u64 << MANTISSA_BITS) - 1)) | (1u64 << MANTISSA_BITS);

    if exponent >= 0 {
        // mantissa carries 53 significant bits
        if exponent > 256 - 53 {
            return Err(AmmError::Overflow("value exceeds 256-bit range"));
        }
        #[allow(clippy::cast_sign_loss)]
        let shift = exponent as usize;
        Ok(U256::from(mantissa) << shift)
    } else {
        Ok(U256::from(mantissa >> exponent.unsigned_abs()))
    }
}

/// Parses a base-10 integer string into a [`U256`].
///
/// # Errors
///
/// Returns [`AmmError::InvalidQuantity`] if the string is empty, contains
/// non-digit characters, or overflows 256 bits.
pub fn parse_u256(text: &str) -> Result<U256> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AmmError::InvalidQuantity("empty integer literal"));
    }
    U256::from_dec_str(trimmed)
        .map_err(|_| AmmError::InvalidQuantity("malformed or oversized integer literal"))
}

/// Returns `10^exp` as a [`U256`].
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] when `exp > 77`.
pub fn pow10(exp: u32) -> Result<U256> {
    if exp > 77 {
        return Err(AmmError::Overflow("10^exp exceeds 256-bit range"));
    }
    Ok(U256::exp10(exp as usize))
}
