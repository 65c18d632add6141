//! Concentrated liquidity position.

use core::fmt;

use super::{Liquidity, Tick};
use crate::error::AmmError;

/// A liquidity range `[lower, upper)` holding `liquidity` units.
///
/// Positions are the source of tick deltas: a position contributes `+L` at
/// its lower tick and `−L` at its upper tick, see
/// [`TickMap::from_positions`](super::TickMap::from_positions).
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::{Liquidity, Position, Tick};
///
/// let lower = Tick::new(-540).unwrap_or(Tick::ZERO);
/// let upper = Tick::new(540).unwrap_or(Tick::ZERO);
/// let pos = Position::new(lower, upper, Liquidity::new(1_000_000)).expect("valid range");
/// assert!(pos.contains(Tick::ZERO));
/// assert!(!pos.contains(upper));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    lower_tick: Tick,
    upper_tick: Tick,
    liquidity: Liquidity,
}

impl Position {
    /// Creates a new `Position`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTickRange`] if `lower_tick >= upper_tick`.
    /// - [`AmmError::InvalidQuantity`] if `liquidity` is zero.
    pub const fn new(
        lower_tick: Tick,
        upper_tick: Tick,
        liquidity: Liquidity,
    ) -> crate::error::Result<Self> {
        if lower_tick.get() >= upper_tick.get() {
            return Err(AmmError::InvalidTickRange(
                "lower tick must be less than upper tick",
            ));
        }
        if liquidity.is_zero() {
            return Err(AmmError::InvalidQuantity("position liquidity must be positive"));
        }
        Ok(Self {
            lower_tick,
            upper_tick,
            liquidity,
        })
    }

    /// Returns the lower tick boundary (inclusive).
    #[must_use]
    pub const fn lower_tick(&self) -> Tick {
        self.lower_tick
    }

    /// Returns the upper tick boundary (exclusive).
    #[must_use]
    pub const fn upper_tick(&self) -> Tick {
        self.upper_tick
    }

    /// Returns the liquidity in this position.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Returns `true` if the position is active when the pool sits at `tick`.
    #[must_use]
    pub const fn contains(&self, tick: Tick) -> bool {
        tick.get() >= self.lower_tick.get() && tick.get() < self.upper_tick.get()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position([{}, {}), L={})",
            self.lower_tick.get(),
            self.upper_tick.get(),
            self.liquidity
        )
    }
}
