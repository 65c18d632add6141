//! Sparse, ordered map of liquidity deltas keyed by tick index.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use super::{Liquidity, Position, Tick};
use crate::error::{AmmError, Result};

/// Initialized ticks of a concentrated-liquidity pool and their signed
/// liquidity deltas.
///
/// A delta is *added* to active liquidity when price crosses its tick
/// upward and *subtracted* when price crosses it downward.
///
/// # Invariants
///
/// Enforced by every constructor:
///
/// - tick indices are unique, ordered, and within the valid tick range;
/// - the deltas sum to zero (every position that opens also closes);
/// - every prefix sum is non-negative (liquidity never goes below zero).
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::{Liquidity, TickMap};
///
/// let ticks = TickMap::from_deltas([(-540, 1_000), (540, -1_000)]).expect("balanced");
/// assert_eq!(ticks.liquidity_at(0).expect("in range"), Liquidity::new(1_000));
/// assert_eq!(ticks.liquidity_at(540).expect("in range"), Liquidity::ZERO);
/// assert!(TickMap::from_deltas([(0, 5)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickMap {
    deltas: BTreeMap<i32, i128>,
}

impl TickMap {
    /// An empty map: a pool with no liquidity anywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(tick, delta)` pairs.
    ///
    /// Input order does not matter, but each tick may appear only once.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTick`] for an out-of-range or duplicated tick.
    /// - [`AmmError::InconsistentLiquidity`] if the invariants above fail.
    pub fn from_deltas<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, i128)>,
    {
        let mut deltas = BTreeMap::new();
        for (tick, delta) in entries {
            Tick::new(tick)?;
            if deltas.insert(tick, delta).is_some() {
                return Err(AmmError::InvalidTick("duplicate tick in delta list"));
            }
        }
        let map = Self { deltas };
        map.validate()?;
        Ok(map)
    }

    /// Builds a map from liquidity positions: `+L` at each lower tick and
    /// `−L` at each upper tick, merging shared boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if merged deltas exceed `i128`.
    pub fn from_positions(positions: &[Position]) -> Result<Self> {
        let mut deltas: BTreeMap<i32, i128> = BTreeMap::new();
        for position in positions {
            let l = i128::try_from(position.liquidity().get())
                .map_err(|_| AmmError::Overflow("position liquidity exceeds i128"))?;
            for (tick, delta) in [
                (position.lower_tick().get(), l),
                (position.upper_tick().get(), -l),
            ] {
                let slot = deltas.entry(tick).or_insert(0);
                *slot = slot
                    .checked_add(delta)
                    .ok_or(AmmError::Overflow("merged tick delta exceeds i128"))?;
            }
        }
        let map = Self { deltas };
        map.validate()?;
        Ok(map)
    }

    /// Checks the balance and non-negativity invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InconsistentLiquidity`] on the first violation.
    pub fn validate(&self) -> Result<()> {
        let mut running: i128 = 0;
        for delta in self.deltas.values() {
            running = running
                .checked_add(*delta)
                .ok_or(AmmError::Overflow("tick delta prefix sum exceeds i128"))?;
            if running < 0 {
                return Err(AmmError::InconsistentLiquidity(
                    "tick deltas drive liquidity negative",
                ));
            }
        }
        if running != 0 {
            return Err(AmmError::InconsistentLiquidity(
                "tick deltas must sum to zero",
            ));
        }
        Ok(())
    }

    /// Active liquidity implied by the deltas when the pool sits at `tick`:
    /// the sum of every delta at or below `tick`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sum leaves the `u128` range.
    pub fn liquidity_at(&self, tick: i32) -> Result<Liquidity> {
        let sum = self
            .deltas
            .range(..=tick)
            .try_fold(0i128, |acc, (_, d)| acc.checked_add(*d))
            .ok_or(AmmError::Overflow("tick delta prefix sum exceeds i128"))?;
        u128::try_from(sum)
            .map(Liquidity::new)
            .map_err(|_| AmmError::InconsistentLiquidity("negative liquidity below tick"))
    }

    /// The greatest initialized tick `≤ tick`, with its delta.
    #[must_use]
    pub fn at_or_below(&self, tick: i32) -> Option<(i32, i128)> {
        self.deltas.range(..=tick).next_back().map(|(t, d)| (*t, *d))
    }

    /// The smallest initialized tick `> tick`, with its delta.
    #[must_use]
    pub fn above(&self, tick: i32) -> Option<(i32, i128)> {
        self.deltas
            .range((Excluded(tick), Unbounded))
            .next()
            .map(|(t, d)| (*t, *d))
    }

    /// The delta stored at `tick`, if initialized.
    #[must_use]
    pub fn delta(&self, tick: i32) -> Option<i128> {
        self.deltas.get(&tick).copied()
    }

    /// Number of initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns `true` when no tick is initialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Iterates `(tick, delta)` pairs in ascending tick order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i128)> + '_ {
        self.deltas.iter().map(|(t, d)| (*t, *d))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn position(lower: i32, upper: i32, liquidity: u128) -> Position {
        let (Ok(lo), Ok(hi)) = (Tick::new(lower), Tick::new(upper)) else {
            panic!("valid ticks");
        };
        let Ok(p) = Position::new(lo, hi, Liquidity::new(liquidity)) else {
            panic!("valid position");
        };
        p
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn empty_map_is_valid() {
        let map = TickMap::new();
        assert!(map.is_empty());
        assert!(map.validate().is_ok());
        assert_eq!(map.liquidity_at(0).ok(), Some(Liquidity::ZERO));
    }

    #[test]
    fn unbalanced_deltas_rejected() {
        let Err(e) = TickMap::from_deltas([(-10, 100), (10, -90)]) else {
            panic!("expected Err");
        };
        assert!(matches!(e, AmmError::InconsistentLiquidity(_)));
    }

    #[test]
    fn negative_prefix_rejected() {
        let Err(e) = TickMap::from_deltas([(-10, -100), (10, 100)]) else {
            panic!("expected Err");
        };
        assert!(matches!(e, AmmError::InconsistentLiquidity(_)));
    }

    #[test]
    fn duplicate_tick_rejected() {
        let Err(e) = TickMap::from_deltas([(0, 1), (0, -1)]) else {
            panic!("expected Err");
        };
        assert!(matches!(e, AmmError::InvalidTick(_)));
    }

    #[test]
    fn out_of_range_tick_rejected() {
        assert!(matches!(
            TickMap::from_deltas([(-900_000, 1), (0, -1)]),
            Err(AmmError::InvalidTick(_))
        ));
    }

    #[test]
    fn positions_merge_shared_boundaries() {
        let Ok(map) = TickMap::from_positions(&[
            position(-540, 420, 1_000),
            position(420, 540, 3_000),
        ]) else {
            panic!("expected Ok");
        };
        assert_eq!(map.len(), 3);
        assert_eq!(map.delta(-540), Some(1_000));
        assert_eq!(map.delta(420), Some(2_000));
        assert_eq!(map.delta(540), Some(-3_000));
    }

    #[test]
    fn overlapping_positions_cancel_to_zero_delta() {
        let Ok(map) = TickMap::from_positions(&[position(0, 10, 5), position(10, 20, 5)]) else {
            panic!("expected Ok");
        };
        // the shared boundary stays initialized with a zero delta
        assert_eq!(map.delta(10), Some(0));
    }

    // -- queries ------------------------------------------------------------

    #[test]
    fn liquidity_at_sums_deltas_at_or_below() {
        let Ok(map) = TickMap::from_positions(&[
            position(-100, 100, 10),
            position(0, 200, 5),
        ]) else {
            panic!("expected Ok");
        };
        let at = |t: i32| map.liquidity_at(t).ok().map(|l| l.get());
        assert_eq!(at(-101), Some(0));
        assert_eq!(at(-100), Some(10));
        assert_eq!(at(0), Some(15));
        assert_eq!(at(99), Some(15));
        assert_eq!(at(100), Some(5));
        assert_eq!(at(200), Some(0));
    }

    #[test]
    fn neighbour_lookup() {
        let Ok(map) = TickMap::from_deltas([(-10, 7), (0, 0), (10, -7)]) else {
            panic!("expected Ok");
        };
        assert_eq!(map.at_or_below(0), Some((0, 0)));
        assert_eq!(map.at_or_below(-1), Some((-10, 7)));
        assert_eq!(map.at_or_below(-11), None);
        assert_eq!(map.above(0), Some((10, -7)));
        assert_eq!(map.above(-10), Some((0, 0)));
        assert_eq!(map.above(10), None);
    }

    #[test]
    fn iter_is_ascending() {
        let Ok(map) = TickMap::from_deltas([(10, -1), (-10, 1)]) else {
            panic!("expected Ok");
        };
        let ticks: Vec<i32> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(ticks, vec![-10, 10]);
    }
}
