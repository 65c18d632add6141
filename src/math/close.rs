//! Closeness comparators and the tolerance bounds used to validate quotes.
//!
//! Quotes are computed in `f64` but mirror integer on-chain arithmetic, so
//! agreement is judged relative to magnitude: a handful of base units of
//! rounding at either end of a trade is acceptable, which is why the bounds
//! loosen as `C / amount` for small amounts.

/// Absolute difference accepted when a compared value is too small for a
/// relative bound to be meaningful.
pub const ABSOLUTE_FLOOR: f64 = 10.0;

/// Tightest relative tolerance any quote comparison uses.
pub const MIN_RELATIVE_TOLERANCE: f64 = 1e-10;

/// Base-unit slack allowed in a forward/inverse round trip.
pub const ROUND_TRIP_UNITS: f64 = 100.0;

/// Base-unit slack allowed in the reciprocal price identity.
pub const PRICE_UNITS: f64 = 10.0;

/// Returns `true` if `a` and `b` agree within `precision`.
///
/// - `precision == 0` demands exact equality.
/// - When either value is below `1 / precision` in magnitude the check is
///   absolute (`|a − b| ≤ ABSOLUTE_FLOOR`).
/// - Otherwise the check is relative: `|a / b − 1| < precision`.
///
/// # Examples
///
/// ```
/// use amm_pricing::math::close_values;
///
/// assert!(close_values(1e12, 1e12 + 1.0, 1e-10));
/// assert!(!close_values(1e12, 1.001e12, 1e-10));
/// ```
#[must_use]
pub fn close_values(a: f64, b: f64, precision: f64) -> bool {
    if precision == 0.0 {
        return a == b;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    let threshold = 1.0 / precision;
    if a.abs() < threshold || b.abs() < threshold {
        return (a - b).abs() <= ABSOLUTE_FLOOR;
    }
    (a / b - 1.0).abs() < precision
}

/// Relative difference `|a / b − 1|`, or `|a|` when `b` is zero.
#[must_use]
pub fn relative_error(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return a.abs();
    }
    (a / b - 1.0).abs()
}

/// Tolerance for `quote_input(quote_output(a).out).in ≈ a`:
/// `max(1e-10, 100 / out, 100 / in)`.
#[must_use]
pub fn round_trip_tolerance(amount_out: f64, amount_in: f64) -> f64 {
    MIN_RELATIVE_TOLERANCE
        .max(ROUND_TRIP_UNITS / amount_out)
        .max(ROUND_TRIP_UNITS / amount_in)
}

/// Tolerance for `price(true) × price(false) ≈ 1`:
/// `max(1e-10, 10 / reserve0, 10 / reserve1)`.
#[must_use]
pub fn price_tolerance(reserve0: f64, reserve1: f64) -> f64 {
    MIN_RELATIVE_TOLERANCE
        .max(PRICE_UNITS / reserve0)
        .max(PRICE_UNITS / reserve1)
}
