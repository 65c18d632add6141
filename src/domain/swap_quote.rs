//! Outcome of a quote request.

use core::fmt;

use crate::error::AmmError;

/// The result of a forward or inverse quote.
///
/// All amounts are finite and non-negative `f64` values in raw base units.
///
/// A forward quote may be **partially filled** by a concentrated-liquidity
/// pool that runs out of initialized ticks: `amount_in` is then the input
/// the pool could actually absorb, `requested` the input the caller asked
/// to sell, and [`is_partial_fill`](Self::is_partial_fill) returns `true`.
/// The flag is set by the pool, not inferred from the amounts: a walk that
/// runs out of ticks within rounding of the request is still partial.
/// For every other quote `amount_in == requested`.
///
/// `gas` is an abstract cost of the code path taken, comparable across
/// pools when choosing a route.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::SwapQuote;
///
/// let q = SwapQuote::filled(1_000.0, 990.0, 60_000).expect("finite");
/// assert!(!q.is_partial_fill());
///
/// let p = SwapQuote::partial(400.0, 1_000.0, 395.0, 90_000).expect("finite");
/// assert!(p.is_partial_fill());
/// assert_eq!(p.unfilled(), 600.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    amount_in: f64,
    amount_out: f64,
    requested: f64,
    gas: u64,
    partial: bool,
}

impl SwapQuote {
    /// A quote that consumed exactly the requested input.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if an amount is negative, NaN, or
    /// infinite, which signals a numeric breakdown in the pool math.
    pub fn filled(amount_in: f64, amount_out: f64, gas: u64) -> crate::error::Result<Self> {
        Self::checked(amount_in, amount_in, amount_out, gas, false)
    }

    /// A quote cut short after consuming `consumed` of the `requested`
    /// input.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Overflow`] if an amount is negative, NaN, or infinite.
    /// - [`AmmError::InvalidQuantity`] if `consumed > requested`.
    pub fn partial(
        consumed: f64,
        requested: f64,
        amount_out: f64,
        gas: u64,
    ) -> crate::error::Result<Self> {
        Self::checked(consumed, requested, amount_out, gas, true)
    }

    fn checked(
        consumed: f64,
        requested: f64,
        amount_out: f64,
        gas: u64,
        partial: bool,
    ) -> crate::error::Result<Self> {
        for v in [consumed, requested, amount_out] {
            if !v.is_finite() || v < 0.0 {
                return Err(AmmError::Overflow("quote amount is not a finite non-negative number"));
            }
        }
        if consumed > requested {
            return Err(AmmError::InvalidQuantity("consumed input exceeds the request"));
        }
        Ok(Self {
            amount_in: consumed,
            amount_out,
            requested,
            gas,
            partial,
        })
    }

    /// Input actually consumed.
    #[must_use]
    pub const fn amount_in(&self) -> f64 {
        self.amount_in
    }

    /// Output delivered for [`amount_in`](Self::amount_in).
    #[must_use]
    pub const fn amount_out(&self) -> f64 {
        self.amount_out
    }

    /// Input the caller asked to sell.
    #[must_use]
    pub const fn requested(&self) -> f64 {
        self.requested
    }

    /// Estimated gas for this code path.
    #[must_use]
    pub const fn gas(&self) -> u64 {
        self.gas
    }

    /// Returns `true` if the pool could not absorb the whole request.
    #[must_use]
    pub const fn is_partial_fill(&self) -> bool {
        self.partial
    }

    /// Requested input the pool could not absorb.
    #[must_use]
    pub fn unfilled(&self) -> f64 {
        self.requested - self.amount_in
    }

    /// Realized rate `amount_out / amount_in`, fee included.
    ///
    /// Returns `None` for an empty trade.
    #[must_use]
    pub fn execution_price(&self) -> Option<f64> {
        (self.amount_in > 0.0).then(|| self.amount_out / self.amount_in)
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, out={}, gas={}",
            self.amount_in, self.amount_out, self.gas
        )?;
        if self.is_partial_fill() {
            write!(f, ", partial of {}", self.requested)?;
        }
        write!(f, ")")
    }
}
