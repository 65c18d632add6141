//! The two tokens of a pool, in pool order.

use super::{Direction, Token};
use crate::error::AmmError;

/// The `(token0, token1)` pair a pool trades.
///
/// Order is taken as given: pool state (reserves, price) is always
/// reported relative to this order, so the pair must mirror the on-chain
/// pool rather than be re-sorted.  Use
/// [`new_sorted`](Self::new_sorted) to apply the Uniswap factory
/// convention (`token0` has the lower address).
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::{Decimals, Direction, Token, TokenAddress, TokenPair};
///
/// let d = Decimals::new(18).expect("valid");
/// let a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", d);
/// let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d);
///
/// let pair = TokenPair::new(a.clone(), b.clone()).expect("distinct tokens");
/// assert_eq!(pair.direction_of(&b).expect("member"), Direction::OneForZero);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    /// Creates a pair in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both tokens have the same address.
    pub fn new(token0: Token, token1: Token) -> Result<Self, AmmError> {
        if token0.same_asset(&token1) {
            return Err(AmmError::InvalidToken(
                "token pair requires two distinct addresses",
            ));
        }
        Ok(Self { token0, token1 })
    }

    /// Creates a pair ordered by ascending address.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if both tokens have the same address.
    pub fn new_sorted(a: Token, b: Token) -> Result<Self, AmmError> {
        if a.address() < b.address() {
            Self::new(a, b)
        } else {
            Self::new(b, a)
        }
    }

    /// Returns token0.
    #[must_use]
    pub const fn token0(&self) -> &Token {
        &self.token0
    }

    /// Returns token1.
    #[must_use]
    pub const fn token1(&self) -> &Token {
        &self.token1
    }

    /// Returns `true` if `token` is one of the two sides.
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.token0.same_asset(token) || self.token1.same_asset(token)
    }

    /// Direction of a trade that sells `token_in`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `token_in` is not in the pair.
    pub fn direction_of(&self, token_in: &Token) -> Result<Direction, AmmError> {
        if self.token0.same_asset(token_in) {
            Ok(Direction::ZeroForOne)
        } else if self.token1.same_asset(token_in) {
            Ok(Direction::OneForZero)
        } else {
            Err(AmmError::InvalidToken("token is not part of this pair"))
        }
    }

    /// Returns `(token_in, token_out)` for a trade in `direction`.
    #[must_use]
    pub fn tokens_for(&self, direction: Direction) -> (&Token, &Token) {
        direction.orient(&self.token0, &self.token1)
    }
}
