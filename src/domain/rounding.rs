//! Explicit rounding direction for float-to-integer conversions.

/// Rounding applied when a floating-point quote is converted back into an
/// integer on-chain quantity (see [`Amount::from_f64`](super::Amount::from_f64)).
///
/// Conversions never round implicitly; the caller picks the side that
/// favours the pool.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Rounding;
///
/// assert_eq!(Rounding::Up.apply(2.1), 3.0);
/// assert_eq!(Rounding::Down.apply(2.9), 2.0);
/// assert_eq!(Rounding::Nearest.apply(2.5), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round towards positive infinity (ceiling). Use for amounts owed to the pool.
    Up,
    /// Round towards zero (floor). Use for amounts paid out by the pool.
    Down,
    /// Round half away from zero.
    Nearest,
}

impl Rounding {
    /// Rounds a non-negative `f64` in this direction.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Up => value.ceil(),
            Self::Down => value.floor(),
            Self::Nearest => value.round(),
        }
    }

    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
