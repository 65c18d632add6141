//! Token identity record.

use super::{Decimals, TokenAddress};

/// The identity of a token traded by a pool.
///
/// A token is only a label attached to one side of a pool; it carries no
/// balance.  Two tokens are the same asset when their addresses match, see
/// [`same_asset`](Self::same_asset).
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::{Decimals, Token, TokenAddress};
///
/// let usdc = Token::new(
///     TokenAddress::from_bytes([1u8; 20]),
///     "USDC",
///     "USD Coin",
///     Decimals::new(6).expect("valid"),
/// );
/// assert_eq!(usdc.symbol(), "USDC");
/// assert_eq!(usdc.decimals().get(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    address: TokenAddress,
    symbol: String,
    name: String,
    decimals: Decimals,
}

impl Token {
    /// Creates a new `Token`.
    ///
    /// Infallible: the address and decimals are validated by their own
    /// constructors.
    #[must_use]
    pub fn new(
        address: TokenAddress,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: Decimals,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
        }
    }

    /// Returns the token address.
    #[must_use]
    pub const fn address(&self) -> TokenAddress {
        self.address
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the full token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the token decimals.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns `true` if both records point at the same contract.
    #[must_use]
    pub fn same_asset(&self, other: &Self) -> bool {
        self.address == other.address
    }
}
