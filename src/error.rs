//! Unified error types for the AMM pricing library.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Errors fall into two families:
//!
//! - **Domain errors**: the request is well-formed but the pool cannot
//!   satisfy it (no liquidity left, a solver did not converge, a reserve is
//!   empty).  See [`AmmError::is_domain_error`].
//! - **Invalid input**: the request or the supplied state is malformed
//!   (negative amounts, tokens outside the pair, unbalanced tick deltas).
//!   See [`AmmError::is_invalid_input`].
//!
//! A partially filled concentrated-liquidity quote is *not* an error; it is
//! reported through [`SwapQuote::is_partial_fill`](crate::domain::SwapQuote::is_partial_fill).

use thiserror::Error;

/// Convenience alias used by every fallible function in the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// The single error type of the crate.
///
/// Variants carry a `&'static str` describing the failing check so that the
/// enum stays `Copy`-cheap and allocation free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AmmError {
    // -- invalid input ------------------------------------------------------
    /// A trade amount is negative, NaN, or infinite.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A token is not part of the pool pair, or the pair is degenerate.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// A token address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(&'static str),

    /// A fee fraction outside `[0, 1)`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A price that is negative, zero where positivity is required, or not finite.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A tick index outside the supported range.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A tick range whose lower bound is not strictly below its upper bound.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// Token decimals outside the supported range.
    #[error("invalid precision: {0}")]
    InvalidPrecision(&'static str),

    /// A configuration parameter is out of its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Tick deltas and active liquidity disagree with each other.
    #[error("inconsistent liquidity: {0}")]
    InconsistentLiquidity(&'static str),

    /// A state snapshot of one pool model was given to another model.
    #[error("state mismatch: {0}")]
    StateMismatch(&'static str),

    // -- domain -------------------------------------------------------------
    /// One of the pool reserves is zero.
    #[error("pool reserve is zero")]
    ZeroReserve,

    /// The pool cannot provide the requested amount.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// An iterative solver hit its iteration ceiling before converging.
    #[error("iterative solver did not converge within {0} iterations")]
    NewtonRaphsonNonConvergence(u32),

    /// An intermediate value left the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in an intermediate computation.
    #[error("division by zero")]
    DivisionByZero,
}

impl AmmError {
    /// Returns `true` for failures caused by the pool state rather than the
    /// caller's input: the trade is structurally infeasible.
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        matches!(
            self,
            Self::ZeroReserve
                | Self::InsufficientLiquidity
                | Self::NewtonRaphsonNonConvergence(_)
                | Self::Overflow(_)
                | Self::DivisionByZero
        )
    }

    /// Returns `true` when the caller supplied malformed arguments or state.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        !self.is_domain_error()
    }
}
