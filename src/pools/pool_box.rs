//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool implementation behind a single
//! enum, enabling heterogeneous collections and static dispatch.  Each
//! variant is feature-gated to match its pool type.  [`PoolState`] is the
//! matching state snapshot, so a `PoolBox` is itself a [`SwapPool`].

use core::fmt;

#[cfg(feature = "clmm")]
use super::clmm::ClmmPool;
#[cfg(feature = "constant-product")]
use super::constant_product::ConstantProductPool;
#[cfg(feature = "stable")]
use super::stable::StablePool;

#[cfg(feature = "clmm")]
use crate::config::ClmmState;
#[cfg(any(feature = "constant-product", feature = "stable"))]
use crate::config::ReserveState;
use crate::domain::{Direction, FeeTier, PoolId, Price, SwapQuote, TokenPair};
use crate::error::AmmError;
use crate::traits::SwapPool;

/// Dispatch enum wrapping all concrete pool implementations.
///
/// The enum implements [`SwapPool`] by delegating every method call to the
/// inner pool via `match`.
///
/// # Advantages
///
/// - **No vtable**: dispatch is a `match`, not a trait object.
/// - **Exhaustive matching**: the compiler ensures all variants are
///   handled in every `match` expression.
/// - **Closed type set**: pool types are fixed at compile time.
///
/// # Example
///
/// ```rust
/// use amm_pricing::config::ConstantProductConfig;
/// use amm_pricing::domain::{
///     Amount, Decimals, Direction, FeeTier, PoolId, Token, TokenAddress, TokenPair,
/// };
/// use amm_pricing::pools::{ConstantProductPool, PoolBox};
/// use amm_pricing::traits::{FromConfig, SwapPool};
///
/// let a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "A", Decimals::EIGHTEEN);
/// let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "B", Decimals::EIGHTEEN);
/// let cfg = ConstantProductConfig::new(
///     PoolId::new("a-b").expect("non-empty"),
///     TokenPair::new(a, b).expect("distinct"),
///     FeeTier::TIER_0_30_PERCENT,
///     Amount::from_u128(1_000_000),
///     Amount::from_u128(1_000_000),
/// )
/// .expect("valid config");
/// let pool = PoolBox::from(ConstantProductPool::from_config(&cfg).expect("valid pool"));
/// let quote = pool.quote_output(1_000.0, Direction::ZeroForOne).expect("quote ok");
/// assert!(quote.amount_out() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PoolBox {
    /// Constant Product AMM (Uniswap V2 style).
    #[cfg(feature = "constant-product")]
    ConstantProduct(Box<ConstantProductPool>),

    /// StableSwap (Curve style).
    #[cfg(feature = "stable")]
    Stable(Box<StablePool>),

    /// Concentrated Liquidity Market Maker (Uniswap V3 style).
    #[cfg(feature = "clmm")]
    Clmm(Box<ClmmPool>),
}

/// State snapshot of whichever pool a [`PoolBox`] holds.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolState {
    /// Reserves of a constant-product pool.
    #[cfg(feature = "constant-product")]
    ConstantProduct(ReserveState),

    /// Reserves of a stable pool.
    #[cfg(feature = "stable")]
    Stable(ReserveState),

    /// Full state of a concentrated-liquidity pool.
    #[cfg(feature = "clmm")]
    Clmm(ClmmState),
}

impl PoolState {
    /// Short name of the pool family this state belongs to.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => "constant-product",
            #[cfg(feature = "stable")]
            Self::Stable(_) => "stable",
            #[cfg(feature = "clmm")]
            Self::Clmm(_) => "clmm",
        }
    }
}

/// Helper macro to delegate a method call to every PoolBox variant.
///
/// Generates a match arm for each feature-gated variant, calling the
/// same method on the inner pool.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            #[cfg(feature = "constant-product")]
            PoolBox::ConstantProduct(p) => p.$method($($arg),*),
            #[cfg(feature = "stable")]
            PoolBox::Stable(p) => p.$method($($arg),*),
            #[cfg(feature = "clmm")]
            PoolBox::Clmm(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// Short name of the wrapped pool family.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(_) => "constant-product",
            #[cfg(feature = "stable")]
            Self::Stable(_) => "stable",
            #[cfg(feature = "clmm")]
            Self::Clmm(_) => "clmm",
        }
    }
}

impl SwapPool for PoolBox {
    type State = PoolState;

    fn quote_output(&self, amount_in: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        delegate!(self, quote_output(amount_in, direction))
    }

    fn quote_input(&self, amount_out: f64, direction: Direction) -> Result<SwapQuote, AmmError> {
        delegate!(self, quote_input(amount_out, direction))
    }

    fn spot_price(&self, direction: Direction) -> Result<Price, AmmError> {
        delegate!(self, spot_price(direction))
    }

    /// # Errors
    ///
    /// Returns [`AmmError::StateMismatch`] if `state` belongs to a
    /// different pool family, otherwise whatever the inner pool returns.
    fn refresh_state(&mut self, state: PoolState) -> Result<(), AmmError> {
        match (self, state) {
            #[cfg(feature = "constant-product")]
            (Self::ConstantProduct(p), PoolState::ConstantProduct(s)) => p.refresh_state(s),
            #[cfg(feature = "stable")]
            (Self::Stable(p), PoolState::Stable(s)) => p.refresh_state(s),
            #[cfg(feature = "clmm")]
            (Self::Clmm(p), PoolState::Clmm(s)) => p.refresh_state(s),
            #[allow(unreachable_patterns)]
            _ => Err(AmmError::StateMismatch(
                "state does not belong to this pool type",
            )),
        }
    }

    fn state(&self) -> PoolState {
        match self {
            #[cfg(feature = "constant-product")]
            Self::ConstantProduct(p) => PoolState::ConstantProduct(p.state()),
            #[cfg(feature = "stable")]
            Self::Stable(p) => PoolState::Stable(p.state()),
            #[cfg(feature = "clmm")]
            Self::Clmm(p) => PoolState::Clmm(p.state()),
        }
    }

    fn pool_id(&self) -> &PoolId {
        delegate!(self, pool_id())
    }

    fn token_pair(&self) -> &TokenPair {
        delegate!(self, token_pair())
    }

    fn fee_tier(&self) -> FeeTier {
        delegate!(self, fee_tier())
    }
}

impl fmt::Display for PoolBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.pool_id())
    }
}

#[cfg(feature = "constant-product")]
impl From<ConstantProductPool> for PoolBox {
    fn from(pool: ConstantProductPool) -> Self {
        Self::ConstantProduct(Box::new(pool))
    }
}

#[cfg(feature = "stable")]
impl From<StablePool> for PoolBox {
    fn from(pool: StablePool) -> Self {
        Self::Stable(Box::new(pool))
    }
}

#[cfg(feature = "clmm")]
impl From<ClmmPool> for PoolBox {
    fn from(pool: ClmmPool) -> Self {
        Self::Clmm(Box::new(pool))
    }
}
