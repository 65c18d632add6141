//! Core pool trait for quoting trades and refreshing pool state.
//!
//! [`SwapPool`] is the capability interface every pricing model implements:
//!
//! 1. **Forward quote**: [`SwapPool::quote_output`] computes the output
//!    for an exact input.
//! 2. **Inverse quote**: [`SwapPool::quote_input`] computes the input
//!    needed for an exact output.
//! 3. **Price**: [`SwapPool::spot_price`] returns the fee-free marginal
//!    rate at the current state.
//! 4. **Refresh**: [`SwapPool::refresh_state`] swaps in a new on-chain
//!    snapshot without rebuilding the pool.
//!
//! Quoting never mutates the pool.
//!
//! # Fee Deduction Invariant
//!
//! Every model takes the fee on the input side before applying its curve:
//!
//! ```text
//! net_input  = amount_in × (1 − fee)
//! amount_out = curve(net_input)
//! amount_in  = curve⁻¹(amount_out) / (1 − fee)
//! ```
//!
//! # Representation
//!
//! Pool state holds on-chain integers (`U256` reserves, `u128` liquidity,
//! Q64.96 sqrt-price).  Trade amounts and prices are `f64` in raw base
//! units, see [`SwapQuote`].
//!
//! # Dispatch Model
//!
//! Pools are dispatched via enums (not `dyn` trait objects).  See the
//! `pools` module for the `PoolBox` enum that wraps all pool variants.

use crate::domain::{Direction, FeeTier, PoolId, Price, SwapQuote, Token, TokenPair};
use crate::error::AmmError;

/// Core trait for all AMM pricing pools.
///
/// # Implementors
///
/// - `ConstantProductPool`: `x · y = k`
/// - `StablePool`: two-coin StableSwap
/// - `ClmmPool`: tick-indexed liquidity bands
/// - `PoolBox`: enum dispatch over the above
///
/// # Errors
///
/// Methods that can fail return [`Result<T, AmmError>`].  Common error
/// variants include:
///
/// - [`AmmError::InvalidQuantity`]: negative or non-finite trade amount
/// - [`AmmError::InsufficientLiquidity`]: the requested output exceeds
///   what the pool can deliver
/// - [`AmmError::NewtonRaphsonNonConvergence`]: an iterative solve hit its
///   iteration cap
/// - [`AmmError::ZeroReserve`]: a refreshed state carries an empty reserve
pub trait SwapPool {
    /// Snapshot of the mutable on-chain state this pool prices from.
    type State: Clone;

    /// Quotes the output for selling exactly `amount_in` in `direction`.
    ///
    /// A zero input quotes a zero output at the base gas cost.  A
    /// concentrated-liquidity pool that runs out of ticks returns a
    /// partially filled quote instead of an error.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `amount_in` is negative or not
    ///   finite.
    /// - A domain error if the model cannot price the trade.
    fn quote_output(&self, amount_in: f64, direction: Direction) -> Result<SwapQuote, AmmError>;

    /// Quotes the input needed to receive exactly `amount_out` in
    /// `direction`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] if `amount_out` is negative or not
    ///   finite.
    /// - [`AmmError::InsufficientLiquidity`] if the pool cannot deliver
    ///   `amount_out`.
    fn quote_input(&self, amount_out: f64, direction: Direction) -> Result<SwapQuote, AmmError>;

    /// Fee-free marginal price of the input token in units of the output
    /// token.
    ///
    /// `spot_price(ZeroForOne) × spot_price(OneForZero) ≈ 1`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the price cannot be represented.
    fn spot_price(&self, direction: Direction) -> Result<Price, AmmError>;

    /// Replaces the live state with `state`.
    ///
    /// The snapshot is validated in full before any field is written: on
    /// error the pool is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of `state`.
    fn refresh_state(&mut self, state: Self::State) -> Result<(), AmmError>;

    /// Returns a copy of the live state.
    #[must_use]
    fn state(&self) -> Self::State;

    /// Returns the pool identifier.
    #[must_use]
    fn pool_id(&self) -> &PoolId;

    /// Returns the `(token0, token1)` pair in pool order.
    #[must_use]
    fn token_pair(&self) -> &TokenPair;

    /// Returns the fee charged on the input side.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;

    /// Quotes the output for selling `amount_in` of `token_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token_in` is not part of the pair.
    /// - Anything [`quote_output`](Self::quote_output) returns.
    fn quote_token_output(&self, token_in: &Token, amount_in: f64) -> Result<SwapQuote, AmmError> {
        let direction = self.token_pair().direction_of(token_in)?;
        self.quote_output(amount_in, direction)
    }
}

/// Rejects negative, NaN, and infinite trade amounts.
pub(crate) fn check_trade_amount(amount: f64) -> Result<(), AmmError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(AmmError::InvalidQuantity(
            "trade amount must be finite and non-negative",
        ))
    }
}
