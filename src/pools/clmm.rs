//! Concentrated Liquidity Market Maker pool (Uniswap V3 style).
//!
//! Liquidity is concentrated within tick (price) ranges.  Within a single
//! range the pool behaves as a constant-product AMM parameterised by `√P`
//! (sqrt-price) and `L` (active liquidity).
//!
//! # Price Convention
//!
//! `price = 1.0001^tick`, each tick step is ~0.01%, and
//! `sqrt_price = 1.0001^(tick/2)`.  The live sqrt-price is stored as the
//! on-chain Q64.96 integer and read as `sqrt_price_x96 / 2^96`.
//!
//! # Quote Algorithm
//!
//! 1. Deduct the fee from the input.
//! 2. Find the next initialized tick in the trade direction and compute how
//!    much input the current band can absorb before price reaches it.
//! 3. If the remaining input fits, price the rest with the single-band
//!    closed form and stop.
//! 4. Otherwise consume the band, cross the tick (apply its liquidity
//!    delta), and repeat.
//! 5. If no initialized tick remains, stop with a **partial fill**.
//!
//! The inverse quote walks the same bands with the closed-form inverse, so
//! forward and inverse agree band by band.
//!
//! # Tick Boundaries
//!
//! A price sitting exactly on an initialized tick counts as *at* that tick:
//! selling token0 crosses it immediately with zero input consumed, selling
//! token1 does not cross it at all.

use tracing::{debug, trace};

use crate::config::{ClmmConfig, ClmmState};
use crate::domain::{
    Direction, FeeTier, Liquidity, PoolId, Price, SwapQuote, Tick, TickMap, TokenPair,
};
use crate::error::AmmError;
use crate::math::sqrt_price_at_tick;
use crate::traits::{FromConfig, SwapPool, check_trade_amount};

/// Gas for a quote that stays inside one band.
pub const CLMM_BASE_GAS: u64 = 70_000;

/// Additional gas per initialized tick crossed.
pub const CLMM_GAS_PER_TICK: u64 = 20_000;

/// Walk position: a private copy of `(tick, √P, L)`.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    tick: i32,
    sqrt_price: f64,
    liquidity: Liquidity,
    crossed: u32,
}

impl Cursor {
    fn from_state(state: &ClmmState) -> Self {
        Self {
            tick: state.tick().get(),
            sqrt_price: state.sqrt_price(),
            liquidity: state.liquidity(),
            crossed: 0,
        }
    }

    /// Next initialized tick the price reaches moving in `direction`.
    fn next_tick(&self, ticks: &TickMap, direction: Direction) -> Option<(i32, i128)> {
        match direction {
            Direction::ZeroForOne => ticks.at_or_below(self.tick),
            Direction::OneForZero => ticks.above(self.tick),
        }
    }

    /// `(max_input, max_output)` the band can trade before price reaches
    /// `target`.  Zero when the band is empty or already at the target.
    fn capacity(&self, direction: Direction, target: f64) -> (f64, f64) {
        let (l, sp) = (self.liquidity.to_f64(), self.sqrt_price);
        match direction {
            Direction::ZeroForOne if sp > target && l > 0.0 => {
                (l * (sp - target) / (sp * target), l * (sp - target))
            }
            Direction::OneForZero if target > sp && l > 0.0 => {
                (l * (target - sp), l * (target - sp) / (sp * target))
            }
            _ => (0.0, 0.0),
        }
    }

    /// Output for `net_in` that stays inside the band.
    fn output_within(&self, direction: Direction, net_in: f64) -> f64 {
        let (l, sp) = (self.liquidity.to_f64(), self.sqrt_price);
        match direction {
            Direction::ZeroForOne => l * sp * net_in / (net_in + l / sp),
            Direction::OneForZero => net_in / (sp * (sp + net_in / l)),
        }
    }

    /// Net input for `amount_out` that stays inside the band.
    fn input_within(&self, direction: Direction, amount_out: f64) -> f64 {
        let (l, sp) = (self.liquidity.to_f64(), self.sqrt_price);
        match direction {
            Direction::ZeroForOne => amount_out * l / (sp * (l * sp - amount_out)),
            Direction::OneForZero => amount_out * sp * sp * l / (l - amount_out * sp),
        }
    }

    /// Moves price onto `tick` and applies its delta.
    fn cross(
        &mut self,
        direction: Direction,
        tick: i32,
        delta: i128,
        target: f64,
    ) -> Result<(), AmmError> {
        self.sqrt_price = target;
        match direction {
            Direction::ZeroForOne => {
                let removed = delta
                    .checked_neg()
                    .ok_or(AmmError::Overflow("tick delta cannot be negated"))?;
                self.liquidity = self.liquidity.apply_delta(removed)?;
                self.tick = tick - 1;
            }
            Direction::OneForZero => {
                self.liquidity = self.liquidity.apply_delta(delta)?;
                self.tick = tick;
            }
        }
        self.crossed += 1;
        trace!(
            tick,
            direction = %direction,
            liquidity = %self.liquidity,
            "crossed initialized tick"
        );
        Ok(())
    }

    fn gas(&self) -> u64 {
        CLMM_BASE_GAS + CLMM_GAS_PER_TICK * u64::from(self.crossed)
    }
}

/// A concentrated-liquidity pool.
///
/// Created from a [`ClmmConfig`] via [`FromConfig`].  Quotes walk a copy
/// of the live `(tick, √P, L)` across initialized ticks, so quoting never
/// mutates the pool.
///
/// # Example
///
/// ```rust
/// use amm_pricing::config::{ClmmConfig, ClmmState};
/// use amm_pricing::domain::{
///     Decimals, Direction, FeeTier, Liquidity, PoolId, Position, Tick, TickMap, Token,
///     TokenAddress, TokenPair,
/// };
/// use amm_pricing::pools::ClmmPool;
/// use amm_pricing::traits::{FromConfig, SwapPool};
///
/// let d18 = Decimals::EIGHTEEN;
/// let a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", d18);
/// let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d18);
/// let liquidity = Liquidity::new(1_000_000_000_000_000_000);
/// let position = Position::new(
///     Tick::new(-540).expect("valid"),
///     Tick::new(540).expect("valid"),
///     liquidity,
/// )
/// .expect("valid range");
/// let cfg = ClmmConfig::new(
///     PoolId::new("a-b-v3").expect("non-empty"),
///     TokenPair::new(a, b).expect("distinct"),
///     FeeTier::TIER_0_30_PERCENT,
///     TickMap::from_positions(&[position]).expect("balanced"),
///     ClmmState::at_tick(Tick::ZERO, liquidity).expect("valid state"),
/// )
/// .expect("valid config");
///
/// let pool = ClmmPool::from_config(&cfg).expect("pool created");
/// let quote = pool.quote_output(1e15, Direction::ZeroForOne).expect("quote ok");
/// assert!(!quote.is_partial_fill());
/// assert_eq!(quote.gas(), 70_000);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClmmPool {
    pool_id: PoolId,
    token_pair: TokenPair,
    fee_tier: FeeTier,
    ticks: TickMap,
    state: ClmmState,
}

impl ClmmPool {
    /// Returns the initialized ticks.
    #[must_use]
    pub const fn ticks(&self) -> &TickMap {
        &self.ticks
    }

    /// Returns the active tick.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.state.tick()
    }

    /// Returns the active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.state.liquidity()
    }

    /// Returns the sqrt-price as `f64`.
    #[must_use]
    pub fn sqrt_price(&self) -> f64 {
        self.state.sqrt_price()
    }
}

impl FromConfig<ClmmConfig> for ClmmPool {
    /// Creates a new pool from the given configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ClmmConfig::validate`].
    fn from_config(config: &ClmmConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pool_id: config.pool_id().clone(),
            token_pair: config.token_pair().clone(),
            fee_tier: config.fee_tier(),
            ticks: config.ticks().clone(),
            state: config.state().clone(),
        })
    }
}

impl SwapPool for ClmmPool {
    type State = ClmmState;

    /// Walks bands until the input is spent or ticks run out.
    ///
    /// Running out of ticks is not an error: the quote reports the input
    /// actually consumed and [`SwapQuote::is_partial_fill`] is `true`.
    fn quote_output(&self, amount_in: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        check_trade_amount(amount_in)?;
        let mut cursor = Cursor::from_state(&self.state);
        if amount_in == 0.0 {
            return SwapQuote::filled(0.0, 0.0, cursor.gas());
        }

        let net = self.fee_tier.net_of_fee(amount_in);
        let mut remaining = net;
        let mut amount_out = 0.0;
        while remaining > 0.0 {
            let Some((tick, delta)) = cursor.next_tick(&self.ticks, direction) else {
                let consumed = self.fee_tier.gross_of_fee(net - remaining).min(amount_in);
                debug!(
                    pool = %self.pool_id,
                    direction = %direction,
                    requested = amount_in,
                    consumed,
                    "ran out of initialized ticks, partial fill"
                );
                return SwapQuote::partial(consumed, amount_in, amount_out, cursor.gas());
            };
            let target = sqrt_price_at_tick(tick);
            let (max_in, max_out) = cursor.capacity(direction, target);
            if remaining <= max_in {
                amount_out += cursor.output_within(direction, remaining);
                break;
            }
            amount_out += max_out;
            remaining -= max_in;
            cursor.cross(direction, tick, delta, target)?;
        }
        SwapQuote::filled(amount_in, amount_out, cursor.gas())
    }

    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if ticks run out before
    /// `amount_out` is reached.
    fn quote_input(&self, amount_out: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        check_trade_amount(amount_out)?;
        let mut cursor = Cursor::from_state(&self.state);
        if amount_out == 0.0 {
            return SwapQuote::filled(0.0, 0.0, cursor.gas());
        }

        let mut remaining = amount_out;
        let mut net_in = 0.0;
        loop {
            let (tick, delta) = cursor
                .next_tick(&self.ticks, direction)
                .ok_or(AmmError::InsufficientLiquidity)?;
            let target = sqrt_price_at_tick(tick);
            let (max_in, max_out) = cursor.capacity(direction, target);
            if max_out > 0.0 && remaining <= max_out {
                net_in += cursor.input_within(direction, remaining);
                break;
            }
            net_in += max_in;
            remaining -= max_out;
            cursor.cross(direction, tick, delta, target)?;
        }
        SwapQuote::filled(self.fee_tier.gross_of_fee(net_in), amount_out, cursor.gas())
    }

    /// `√P²` selling token0, `1 / √P²` selling token1.
    fn spot_price(&self, direction: Direction) -> Result<Price, AmmError> {
        let price = self.state.sqrt_price().powi(2);
        match direction {
            Direction::ZeroForOne => Price::new(price),
            Direction::OneForZero => Price::new(1.0 / price),
        }
    }

    /// Replaces reserves, tick, liquidity and sqrt-price together, and the
    /// tick map too when `state` carries one.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidTick`] if the tick is out of range.
    /// - [`AmmError::InvalidPrice`] if the sqrt-price is outside the tick's
    ///   band.
    /// - [`AmmError::InconsistentLiquidity`] if liquidity disagrees with
    ///   the (new or current) tick map, or a new map is unbalanced.
    fn refresh_state(&mut self, state: ClmmState) -> Result<(), AmmError> {
        let (state, ticks) = state.split_ticks();
        Tick::new(state.tick().get())?;
        if let Some(ticks) = &ticks {
            ticks.validate()?;
        }
        state.validate_against(ticks.as_ref().unwrap_or(&self.ticks))?;

        let replaced_ticks = ticks.is_some();
        if let Some(ticks) = ticks {
            self.ticks = ticks;
        }
        self.state = state;
        debug!(
            pool = %self.pool_id,
            tick = self.state.tick().get(),
            liquidity = %self.state.liquidity(),
            replaced_ticks,
            "refreshed concentrated-liquidity state"
        );
        Ok(())
    }

    /// The live state with the tick map attached, so that
    /// `refresh_state(pool.state())` is a no-op.
    fn state(&self) -> ClmmState {
        self.state.clone().with_ticks(self.ticks.clone())
    }

    fn pool_id(&self) -> &PoolId {
        &self.pool_id
    }

    fn token_pair(&self) -> &TokenPair {
        &self.token_pair
    }

    fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
