//! Trade direction through a two-token pool.

use core::fmt;

/// Which token of the pair is being sold.
///
/// Converts to and from `bool` with the convention `true` = token0 →
/// token1, matching the boolean `direction` argument most routing code
/// passes around.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::Direction;
///
/// assert_eq!(Direction::from(true), Direction::ZeroForOne);
/// assert_eq!(Direction::ZeroForOne.reverse(), Direction::OneForZero);
/// assert!(!bool::from(Direction::OneForZero));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Sell token0, receive token1.  Pool price (token1 per token0) falls.
    ZeroForOne,
    /// Sell token1, receive token0.  Pool price rises.
    OneForZero,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::ZeroForOne => Self::OneForZero,
            Self::OneForZero => Self::ZeroForOne,
        }
    }

    /// Returns `true` for [`Direction::ZeroForOne`].
    #[must_use]
    pub const fn is_zero_for_one(self) -> bool {
        matches!(self, Self::ZeroForOne)
    }

    /// Orders a `(token0, token1)` tuple as `(in, out)` for this direction.
    #[must_use]
    pub fn orient<T>(self, side0: T, side1: T) -> (T, T) {
        match self {
            Self::ZeroForOne => (side0, side1),
            Self::OneForZero => (side1, side0),
        }
    }
}

impl From<bool> for Direction {
    fn from(zero_for_one: bool) -> Self {
        if zero_for_one { Self::ZeroForOne } else { Self::OneForZero }
    }
}

impl From<Direction> for bool {
    fn from(direction: Direction) -> Self {
        direction.is_zero_for_one()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0->1"),
            Self::OneForZero => write!(f, "1->0"),
        }
    }
}
