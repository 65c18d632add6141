//! EVM token contract address.

use core::fmt;
use core::str::FromStr;

use crate::error::AmmError;

/// Byte length of an EVM address.
const ADDRESS_LEN: usize = 20;

/// A 20-byte token contract address.
///
/// Parsed from and displayed as lowercase `0x`-prefixed hex.  Ordering is
/// byte-lexicographic, which matches how Uniswap-style factories sort
/// `token0`/`token1`.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::TokenAddress;
///
/// let addr: TokenAddress = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().expect("hex");
/// assert_eq!(addr.to_string(), "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenAddress([u8; ADDRESS_LEN]);

impl TokenAddress {
    /// Creates a `TokenAddress` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl FromStr for TokenAddress {
    type Err = AmmError;

    /// Parses 40 hex digits with an optional `0x` prefix; case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| AmmError::InvalidAddress("expected 40 hex digits"))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
