//! Pool identifier.

use core::fmt;

use crate::error::AmmError;

/// Opaque identifier of a pool, usually its contract address.
///
/// # Examples
///
/// ```
/// use amm_pricing::domain::PoolId;
///
/// let id = PoolId::new("0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640").expect("non-empty");
/// assert_eq!(id.as_str(), "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640");
/// assert!(PoolId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolId(String);

impl PoolId {
    /// Creates a pool identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, AmmError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("pool id must not be empty"));
        }
        Ok(Self(id))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
