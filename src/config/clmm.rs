//! Configuration and live state for concentrated-liquidity pools
//! (Uniswap V3 style).

use primitive_types::U256;

use crate::domain::{Amount, FeeTier, Liquidity, PoolId, Tick, TickMap, TokenPair};
use crate::error::AmmError;
use crate::math::{
    sqrt_price_at_tick, sqrt_price_from_x96, sqrt_price_x96_at_tick, tick_at_sqrt_price,
};

/// Relative slack allowed when checking that a sqrt-price lies in the band
/// `[sqrt_price(tick), sqrt_price(tick + 1))`.
pub const SQRT_PRICE_BAND_SLACK: f64 = 1e-9;

/// Live state of a concentrated-liquidity pool.
///
/// | Field | Representation |
/// |---|---|
/// | `reserve0`, `reserve1` | token balances, informational only |
/// | `tick` | active tick index |
/// | `liquidity` | active liquidity `L` |
/// | `sqrt_price_x96` | `√P · 2^96` as a Q64.96 [`U256`] |
/// | `ticks` | optional replacement tick map, used by refreshes |
///
/// # Examples
///
/// ```
/// use amm_pricing::config::ClmmState;
/// use amm_pricing::domain::{Liquidity, Tick};
///
/// let state = ClmmState::at_tick(Tick::ZERO, Liquidity::new(1_000_000)).expect("valid tick");
/// assert!((state.sqrt_price() - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClmmState {
    reserve0: Amount,
    reserve1: Amount,
    tick: Tick,
    liquidity: Liquidity,
    sqrt_price_x96: U256,
    ticks: Option<TickMap>,
}

impl ClmmState {
    /// Creates a state snapshot.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `sqrt_price_x96` is zero or outside
    ///   the band of `tick`.
    pub fn new(
        reserve0: Amount,
        reserve1: Amount,
        tick: Tick,
        liquidity: Liquidity,
        sqrt_price_x96: U256,
    ) -> Result<Self, AmmError> {
        let state = Self {
            reserve0,
            reserve1,
            tick,
            liquidity,
            sqrt_price_x96,
            ticks: None,
        };
        state.validate()?;
        Ok(state)
    }

    /// State sitting exactly on the lower boundary of `tick`, with zero
    /// informational reserves.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the sqrt-price cannot be encoded.
    pub fn at_tick(tick: Tick, liquidity: Liquidity) -> Result<Self, AmmError> {
        Self::new(
            Amount::ZERO,
            Amount::ZERO,
            tick,
            liquidity,
            sqrt_price_x96_at_tick(tick)?,
        )
    }

    /// Snapshot as most chain readers deliver it: `sqrtPriceX96` and active
    /// liquidity, with the tick derived from the price.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] if `sqrt_price_x96` is zero.
    /// - [`AmmError::InvalidTick`] if the price lies outside the tick range.
    pub fn from_sqrt_price_x96(
        reserve0: Amount,
        reserve1: Amount,
        liquidity: Liquidity,
        sqrt_price_x96: U256,
    ) -> Result<Self, AmmError> {
        let tick = tick_at_sqrt_price(sqrt_price_from_x96(sqrt_price_x96))?;
        Self::new(reserve0, reserve1, tick, liquidity, sqrt_price_x96)
    }

    /// Attaches a replacement tick map for [`refresh_state`].
    ///
    /// [`refresh_state`]: crate::traits::SwapPool::refresh_state
    #[must_use]
    pub fn with_ticks(mut self, ticks: TickMap) -> Self {
        self.ticks = Some(ticks);
        self
    }

    /// Detaches the optional tick map.
    #[must_use]
    pub fn split_ticks(mut self) -> (Self, Option<TickMap>) {
        let ticks = self.ticks.take();
        (self, ticks)
    }

    /// Checks that the sqrt-price is positive and lies in the band of the
    /// active tick.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidPrice`] on failure.
    pub fn validate(&self) -> Result<(), AmmError> {
        let sp = self.sqrt_price();
        if sp.is_nan() || sp <= 0.0 {
            return Err(AmmError::InvalidPrice("sqrt price must be positive"));
        }
        let lower = sqrt_price_at_tick(self.tick.get()) * (1.0 - SQRT_PRICE_BAND_SLACK);
        let upper = sqrt_price_at_tick(self.tick.get() + 1) * (1.0 + SQRT_PRICE_BAND_SLACK);
        if sp < lower || sp > upper {
            return Err(AmmError::InvalidPrice(
                "sqrt price lies outside the band of the active tick",
            ));
        }
        Ok(())
    }

    /// Full validation against the tick map the pool will price from: the
    /// band check plus `liquidity == Σ deltas(t ≤ tick)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidPrice`] from [`validate`](Self::validate).
    /// - [`AmmError::InconsistentLiquidity`] if the active liquidity
    ///   disagrees with the tick map.
    pub fn validate_against(&self, ticks: &TickMap) -> Result<(), AmmError> {
        self.validate()?;
        if ticks.liquidity_at(self.tick.get())? != self.liquidity {
            return Err(AmmError::InconsistentLiquidity(
                "active liquidity does not match the tick map",
            ));
        }
        Ok(())
    }

    /// Informational balance of token0.
    #[must_use]
    pub const fn reserve0(&self) -> Amount {
        self.reserve0
    }

    /// Informational balance of token1.
    #[must_use]
    pub const fn reserve1(&self) -> Amount {
        self.reserve1
    }

    /// Active tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Q64.96 sqrt-price.
    #[must_use]
    pub const fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    /// Sqrt-price as `f64`.
    #[must_use]
    pub fn sqrt_price(&self) -> f64 {
        sqrt_price_from_x96(self.sqrt_price_x96)
    }

    /// The attached replacement tick map, if any.
    #[must_use]
    pub const fn ticks(&self) -> Option<&TickMap> {
        self.ticks.as_ref()
    }
}

/// Configuration for a concentrated-liquidity pool.
///
/// # Key Relationships
///
/// - Price at tick `i`: `P(i) = 1.0001^i`
/// - Active liquidity equals the sum of the deltas of all ticks at or
///   below the active tick.
///
/// # Validation
///
/// - The tick map is balanced (see [`TickMap`]).
/// - The initial state passes [`ClmmState::validate_against`] for that map.
/// - The initial state carries no tick map of its own; the map is a
///   separate field here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClmmConfig {
    pool_id: PoolId,
    token_pair: TokenPair,
    fee_tier: FeeTier,
    ticks: TickMap,
    state: ClmmState,
}

impl ClmmConfig {
    /// Creates a new `ClmmConfig`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InconsistentLiquidity`] if the tick map is unbalanced
    ///   or disagrees with the state's liquidity.
    /// - [`AmmError::InvalidPrice`] if the sqrt-price is outside the
    ///   active tick's band.
    /// - [`AmmError::InvalidConfiguration`] if `state` carries a tick map.
    pub fn new(
        pool_id: PoolId,
        token_pair: TokenPair,
        fee_tier: FeeTier,
        ticks: TickMap,
        state: ClmmState,
    ) -> Result<Self, AmmError> {
        let config = Self {
            pool_id,
            token_pair,
            fee_tier,
            ticks,
            state,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.state.ticks().is_some() {
            return Err(AmmError::InvalidConfiguration(
                "initial state must not carry its own tick map",
            ));
        }
        self.ticks.validate()?;
        self.state.validate_against(&self.ticks)
    }

    /// Returns the pool identifier.
    #[must_use]
    pub const fn pool_id(&self) -> &PoolId {
        &self.pool_id
    }

    /// Returns the token pair.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    /// Returns the fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Returns the initialized ticks.
    #[must_use]
    pub const fn ticks(&self) -> &TickMap {
        &self.ticks
    }

    /// Returns the initial state.
    #[must_use]
    pub const fn state(&self) -> &ClmmState {
        &self.state
    }
}
