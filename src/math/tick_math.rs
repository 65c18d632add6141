//! Tick, price, and Q64.96 sqrt-price conversions for concentrated
//! liquidity pools.
//!
//! A tick `t` marks the price `1.0001^t`; its sqrt-price boundary is
//! `1.0001^(t/2)`.  On-chain pools store the sqrt-price as a Q64.96
//! unsigned fixed-point integer (`sqrtPriceX96`), which this crate keeps
//! as a [`U256`] and converts to `f64` only for quoting.
//!
//! # Examples
//!
//! ```
//! use amm_pricing::math::{
//!     sqrt_price_at_tick, sqrt_price_from_x96, sqrt_price_to_x96, tick_at_sqrt_price,
//! };
//!
//! let sp = sqrt_price_at_tick(100);
//! let x96 = sqrt_price_to_x96(sp).expect("positive");
//! let back = sqrt_price_from_x96(x96);
//! assert!((back / sp - 1.0).abs() < 1e-15);
//! assert_eq!(tick_at_sqrt_price(back).expect("in range").get(), 100);
//! ```

use primitive_types::U256;

use super::wide::{u256_from_f64, u256_to_f64};
use crate::domain::{Rounding, Tick};
use crate::error::{AmmError, Result};

/// Base of the tick-price exponential: `price = BASE^tick`.
const BASE: f64 = 1.0001;

/// `2^96`, the Q64.96 scaling factor.  Powers of two are exact in `f64`.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Distance in ticks within which a computed tick snaps to the nearest
/// integer.
const SNAP_EPSILON: f64 = 1e-9;

/// Sqrt-price at the lower boundary of `tick`: `1.0001^(tick / 2)`.
#[must_use]
pub fn sqrt_price_at_tick(tick: i32) -> f64 {
    BASE.powf(f64::from(tick) / 2.0)
}

/// Active tick for a sqrt-price: the greatest `t` with
/// `sqrt_price_at_tick(t) <= sqrt_price`.
///
/// Values within `SNAP_EPSILON` ticks of an integer snap to it, so a
/// sqrt-price read back from a rounded-down Q64.96 boundary maps to that
/// boundary's own tick.
///
/// # Errors
///
/// - [`AmmError::InvalidPrice`] if `sqrt_price` is not strictly positive and finite.
/// - [`AmmError::InvalidTick`] if the tick falls outside `[-887272, 887272]`.
pub fn tick_at_sqrt_price(sqrt_price: f64) -> Result<Tick> {
    if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
        return Err(AmmError::InvalidPrice(
            "sqrt price must be positive and finite",
        ));
    }
    let raw = 2.0 * sqrt_price.ln() / BASE.ln();
    let rounded = raw.round();
    let tick = if (raw - rounded).abs() < SNAP_EPSILON {
        rounded
    } else {
        raw.floor()
    };
    if tick < f64::from(Tick::MIN.get()) || tick > f64::from(Tick::MAX.get()) {
        return Err(AmmError::InvalidTick("price maps outside the tick range"));
    }
    #[allow(clippy::cast_possible_truncation)]
    Tick::new(tick as i32)
}

/// Converts a Q64.96 sqrt-price to `f64`.
#[must_use]
pub fn sqrt_price_from_x96(sqrt_price_x96: U256) -> f64 {
    u256_to_f64(sqrt_price_x96) / Q96
}

/// Encodes an `f64` sqrt-price as Q64.96, rounding down.
///
/// # Errors
///
/// - [`AmmError::InvalidPrice`] if `sqrt_price` is not strictly positive and finite.
/// - [`AmmError::Overflow`] if the encoded value exceeds 256 bits.
pub fn sqrt_price_to_x96(sqrt_price: f64) -> Result<U256> {
    if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
        return Err(AmmError::InvalidPrice(
            "sqrt price must be positive and finite",
        ));
    }
    u256_from_f64(sqrt_price * Q96, Rounding::Down)
}

/// Q64.96 sqrt-price at the lower boundary of `tick`.
///
/// # Errors
///
/// Propagates [`sqrt_price_to_x96`] failures (none for valid ticks).
pub fn sqrt_price_x96_at_tick(tick: Tick) -> Result<U256> {
    sqrt_price_to_x96(sqrt_price_at_tick(tick.get()))
}
