//! Bounded, safeguarded Newton root finder.
//!
//! Used by the StableSwap pool to invert its invariant in both trade
//! directions.  The solver keeps a sign bracket `[lo, hi]` around the root
//! and falls back to bisection (or doubling, when `hi` is unbounded) whenever
//! a Newton step would leave it.  The loop is hard-capped at
//! [`MAX_ITERATIONS`]; hitting the cap is reported as
//! [`AmmError::NewtonRaphsonNonConvergence`], never as a silent NaN.

use crate::error::{AmmError, Result};

/// Hard iteration ceiling shared by every iterative solve in the crate.
pub const MAX_ITERATIONS: u32 = 256;

/// Relative step size below which an iterate is accepted as the root.
pub const RELATIVE_TOLERANCE: f64 = 1e-13;

/// A converged root together with the number of iterations spent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// The root estimate.
    pub root: f64,
    /// Newton (or fallback) iterations performed.
    pub iterations: u32,
}

/// Finds a root of `f` inside `[lo, hi]` starting from `start`.
///
/// `f` returns the function value and its derivative at a point.  The
/// bracket must enclose a sign change; `hi` may be `f64::INFINITY` when the
/// function is known to change sign somewhere above `lo`.
///
/// # Errors
///
/// - [`AmmError::InvalidConfiguration`] if the bracket is empty or `start`
///   lies outside it.
/// - [`AmmError::NewtonRaphsonNonConvergence`] after [`MAX_ITERATIONS`]
///   iterations without meeting the tolerance.
pub fn find_root<F>(f: F, start: f64, lo: f64, hi: f64) -> Result<Solution>
where
    F: Fn(f64) -> (f64, f64),
{
    if !(lo < hi) || !lo.is_finite() || !(start >= lo && start < hi) {
        return Err(AmmError::InvalidConfiguration("root bracket is empty"));
    }

    let (value_lo, _) = f(lo);
    if value_lo == 0.0 {
        return Ok(Solution {
            root: lo,
            iterations: 0,
        });
    }
    let sign_lo = value_lo.is_sign_positive();

    let (mut lo, mut hi) = (lo, hi);
    let mut t = start;

    for iteration in 1..=MAX_ITERATIONS {
        let (value, slope) = f(t);
        if value == 0.0 {
            return Ok(Solution {
                root: t,
                iterations: iteration,
            });
        }
        if value.is_sign_positive() == sign_lo {
            lo = lo.max(t);
        } else {
            hi = hi.min(t);
        }

        let newton = t - value / slope;
        let next = if newton.is_finite() && newton > lo && newton < hi {
            newton
        } else if hi.is_finite() {
            0.5 * (lo + hi)
        } else {
            2.0 * lo.max(t).max(f64::MIN_POSITIVE)
        };

        let scale = next.abs().max(f64::MIN_POSITIVE);
        let bracket_closed = hi.is_finite() && (hi - lo) <= RELATIVE_TOLERANCE * scale;
        if (next - t).abs() <= RELATIVE_TOLERANCE * scale || bracket_closed {
            tracing::trace!(iterations = iteration, root = next, "newton solve converged");
            return Ok(Solution {
                root: next,
                iterations: iteration,
            });
        }
        t = next;
    }

    tracing::warn!(
        max_iterations = MAX_ITERATIONS,
        last = t,
        "newton solve hit the iteration cap"
    );
    Err(AmmError::NewtonRaphsonNonConvergence(MAX_ITERATIONS))
}
