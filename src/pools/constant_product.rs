//! Constant-product pool (Uniswap V2 style).
//!
//! The invariant is `x × y = k` where `x` and `y` are the reserves of the
//! two tokens.  Fees are deducted from the input amount **before** the
//! pricing formula is applied.
//!
//! # Quote Algorithm (token0 → token1)
//!
//! 1. `net_input = amount_in × (1 − fee)`
//! 2. `amount_out = reserve1 × net_input / (reserve0 + net_input)`
//!
//! The inverse runs the same steps backwards:
//!
//! 1. `net_input = reserve0 × amount_out / (reserve1 − amount_out)`
//! 2. `amount_in = net_input / (1 − fee)`
//!
//! Both directions are exact rearrangements of
//! `(reserve0 + net_input)(reserve1 − amount_out) = reserve0 × reserve1`,
//! so a forward quote fed back through the inverse recovers its input up
//! to floating-point rounding.

use tracing::debug;

use crate::config::{ConstantProductConfig, ReserveState};
use crate::domain::{Direction, FeeTier, PoolId, Price, SwapQuote, TokenPair};
use crate::error::AmmError;
use crate::traits::{FromConfig, SwapPool, check_trade_amount};

/// Gas estimate for any constant-product quote.
pub const CONSTANT_PRODUCT_GAS: u64 = 60_000;

/// A constant-product pool (`x · y = k`).
///
/// Created from a [`ConstantProductConfig`] via [`FromConfig`].  The pool
/// validates the configuration on construction and is immediately ready
/// for quotes.
///
/// # State
///
/// - `reserves`: current token balances in raw base units, replaced as a
///   whole by [`SwapPool::refresh_state`].
///
/// # Example
///
/// ```rust
/// use amm_pricing::config::ConstantProductConfig;
/// use amm_pricing::domain::{
///     Amount, Decimals, Direction, FeeTier, PoolId, Token, TokenAddress, TokenPair,
/// };
/// use amm_pricing::pools::ConstantProductPool;
/// use amm_pricing::traits::{FromConfig, SwapPool};
///
/// let d18 = Decimals::EIGHTEEN;
/// let a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", d18);
/// let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d18);
/// let pair = TokenPair::new(a, b).expect("distinct");
/// let cfg = ConstantProductConfig::new(
///     PoolId::new("a-b").expect("non-empty"),
///     pair,
///     FeeTier::TIER_0_30_PERCENT,
///     Amount::from_u128(1_000_000),
///     Amount::from_u128(1_000_000),
/// )
/// .expect("valid config");
///
/// let pool = ConstantProductPool::from_config(&cfg).expect("pool created");
/// let quote = pool.quote_output(1_000.0, Direction::ZeroForOne).expect("quote ok");
/// assert!(quote.amount_out() > 0.0 && quote.amount_out() < 1_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantProductPool {
    pool_id: PoolId,
    token_pair: TokenPair,
    fee_tier: FeeTier,
    reserves: ReserveState,
}

impl ConstantProductPool {
    /// Returns the current reserves.
    #[must_use]
    pub const fn reserves(&self) -> ReserveState {
        self.reserves
    }

    /// `(reserve_in, reserve_out)` as `f64` for a trade in `direction`.
    fn oriented_reserves(&self, direction: Direction) -> (f64, f64) {
        let (r0, r1) = self.reserves.to_f64_pair();
        direction.orient(r0, r1)
    }
}

impl FromConfig<ConstantProductConfig> for ConstantProductPool {
    /// Creates a new pool from the given configuration.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`ConstantProductConfig::validate`].
    fn from_config(config: &ConstantProductConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            pool_id: config.pool_id().clone(),
            token_pair: config.token_pair().clone(),
            fee_tier: config.fee_tier(),
            reserves: config.reserves(),
        })
    }
}

impl SwapPool for ConstantProductPool {
    type State = ReserveState;

    /// `amount_out = reserve_out × net / (reserve_in + net)`.
    fn quote_output(&self, amount_in: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        check_trade_amount(amount_in)?;
        if amount_in == 0.0 {
            return SwapQuote::filled(0.0, 0.0, CONSTANT_PRODUCT_GAS);
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(direction);
        let net = self.fee_tier.net_of_fee(amount_in);
        // divide first: `reserve_out * net` overflows f64 for very large inputs
        let amount_out = reserve_out * (net / (reserve_in + net));
        SwapQuote::filled(amount_in, amount_out, CONSTANT_PRODUCT_GAS)
    }

    /// `amount_in = reserve_in × out / (reserve_out − out) / (1 − fee)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if `amount_out` is not
    /// below the output reserve.
    fn quote_input(&self, amount_out: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        check_trade_amount(amount_out)?;
        if amount_out == 0.0 {
            return SwapQuote::filled(0.0, 0.0, CONSTANT_PRODUCT_GAS);
        }
        let (reserve_in, reserve_out) = self.oriented_reserves(direction);
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }
        let net = reserve_in * amount_out / (reserve_out - amount_out);
        SwapQuote::filled(self.fee_tier.gross_of_fee(net), amount_out, CONSTANT_PRODUCT_GAS)
    }

    /// `reserve_out / reserve_in`.
    fn spot_price(&self, direction: Direction) -> Result<Price, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(direction);
        Price::new(reserve_out / reserve_in)
    }

    /// # Errors
    ///
    /// Returns [`AmmError::ZeroReserve`] if either new reserve is zero.
    fn refresh_state(&mut self, state: ReserveState) -> Result<(), AmmError> {
        state.validate()?;
        self.reserves = state;
        debug!(
            pool = %self.pool_id,
            reserve0 = %state.reserve0(),
            reserve1 = %state.reserve1(),
            "refreshed constant-product reserves"
        );
        Ok(())
    }

    fn state(&self) -> ReserveState {
        self.reserves
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
