//! Numeric utilities for pool math.
//!
//! - [`wide`]: lossy but well-defined conversions between 256-bit integers
//!   and `f64`.
//! - [`tick_math`]: tick indices, sqrt prices, and the Q64.96 encoding.
//! - [`solver`]: a bracketed Newton root finder with a bisection fallback.
//! - [`close`]: tolerance helpers for comparing quotes against references.
//! - [`sampling`]: a seeded sampler for reproducible randomized scenarios.

pub mod close;
pub mod sampling;
pub mod solver;
pub mod tick_math;
pub mod wide;

pub use close::{close_values, price_tolerance, relative_error, round_trip_tolerance};
pub use sampling::SeededSampler;
pub use solver::{MAX_ITERATIONS, Solution, find_root};
pub use tick_math::{
    sqrt_price_at_tick, sqrt_price_from_x96, sqrt_price_to_x96, sqrt_price_x96_at_tick,
    tick_at_sqrt_price,
};
pub use wide::{parse_u256, pow10, u256_from_f64, u256_to_f64};
