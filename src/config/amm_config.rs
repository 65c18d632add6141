//! Top-level pool configuration enum.
//!
//! [`AmmConfig`] is the declarative blueprint for creating any pool type.
//! Each variant wraps a pool-specific configuration struct.
//!
//! # Factory Integration
//!
//! ```text
//! match config {
//!     AmmConfig::ConstantProduct(cfg) => ConstantProductPool::from_config(&cfg),
//!     AmmConfig::Stable(cfg)          => StablePool::from_config(&cfg),
//!     AmmConfig::Clmm(cfg)            => ClmmPool::from_config(&cfg),
//! }
//! ```

use super::{ClmmConfig, ConstantProductConfig, StableConfig};
use crate::domain::{FeeTier, PoolId, TokenPair};
use crate::error::AmmError;

/// Top-level configuration enum for all pool models.
///
/// # Variants
///
/// - [`ConstantProduct`](AmmConfig::ConstantProduct): `x · y = k`
/// - [`Stable`](AmmConfig::Stable): Curve-style StableSwap
/// - [`Clmm`](AmmConfig::Clmm): Uniswap V3 style concentrated liquidity
///
/// # Validation
///
/// Call [`validate()`](AmmConfig::validate) to check all configuration
/// invariants before constructing a pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmmConfig {
    /// Constant-product configuration.
    ConstantProduct(ConstantProductConfig),
    /// StableSwap configuration.
    Stable(StableConfig),
    /// Concentrated-liquidity configuration.
    Clmm(ClmmConfig),
}

impl AmmConfig {
    /// Validates the inner configuration by delegating to the
    /// variant-specific `validate()` method.
    ///
    /// # Errors
    ///
    /// Returns the same [`AmmError`] that the inner config's
    /// `validate()` would return.
    pub fn validate(&self) -> Result<(), AmmError> {
        match self {
            Self::ConstantProduct(cfg) => cfg.validate(),
            Self::Stable(cfg) => cfg.validate(),
            Self::Clmm(cfg) => cfg.validate(),
        }
    }

    /// Returns the pool identifier of the inner configuration.
    #[must_use]
    pub const fn pool_id(&self) -> &PoolId {
        match self {
            Self::ConstantProduct(cfg) => cfg.pool_id(),
            Self::Stable(cfg) => cfg.pool_id(),
            Self::Clmm(cfg) => cfg.pool_id(),
        }
    }

    /// Returns the token pair of the inner configuration.
    #[must_use]
    pub const fn token_pair(&self) -> &TokenPair {
        match self {
            Self::ConstantProduct(cfg) => cfg.token_pair(),
            Self::Stable(cfg) => cfg.token_pair(),
            Self::Clmm(cfg) => cfg.token_pair(),
        }
    }

    /// Returns the fee tier of the inner configuration.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        match self {
            Self::ConstantProduct(cfg) => cfg.fee_tier(),
            Self::Stable(cfg) => cfg.fee_tier(),
            Self::Clmm(cfg) => cfg.fee_tier(),
        }
    }

    /// Returns `true` if this is a [`ConstantProduct`](Self::ConstantProduct) variant.
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct(_))
    }

    /// Returns `true` if this is a [`Stable`](Self::Stable) variant.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Stable(_))
    }

    /// Returns `true` if this is a [`Clmm`](Self::Clmm) variant.
    #[must_use]
    pub const fn is_clmm(&self) -> bool {
        matches!(self, Self::Clmm(_))
    }
}

impl core::fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ConstantProduct(_) => write!(f, "ConstantProduct"),
            Self::Stable(_) => write!(f, "Stable"),
            Self::Clmm(_) => write!(f, "Clmm"),
        }
    }
}

impl From<ConstantProductConfig> for AmmConfig {
    fn from(cfg: ConstantProductConfig) -> Self {
        Self::ConstantProduct(cfg)
    }
}

impl From<StableConfig> for AmmConfig {
    fn from(cfg: StableConfig) -> Self {
        Self::Stable(cfg)
    }
}

impl From<ClmmConfig> for AmmConfig {
    fn from(cfg: ClmmConfig) -> Self {
        Self::Clmm(cfg)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ClmmState;
    use crate::domain::{Amount, Decimals, Liquidity, Tick, TickMap, Token, TokenAddress};

    fn make_pair() -> TokenPair {
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let tok_a = Token::new(TokenAddress::from_bytes([1u8; 20]), "A", "Token A", d6);
        let tok_b = Token::new(TokenAddress::from_bytes([2u8; 20]), "B", "Token B", d6);
        let Ok(pair) = TokenPair::new(tok_a, tok_b) else {
            panic!("expected valid pair");
        };
        pair
    }

    fn id(name: &str) -> PoolId {
        let Ok(id) = PoolId::new(name) else {
            panic!("valid id");
        };
        id
    }

    fn fee() -> FeeTier {
        FeeTier::TIER_0_30_PERCENT
    }

    #[test]
    fn constant_product_variant() {
        let Ok(cfg) = ConstantProductConfig::new(
            id("cp"),
            make_pair(),
            fee(),
            Amount::from_u128(1_000),
            Amount::from_u128(2_000),
        ) else {
            panic!("expected Ok");
        };
        let amm = AmmConfig::from(cfg);
        assert!(amm.is_constant_product());
        assert!(!amm.is_clmm());
        assert!(amm.validate().is_ok());
        assert_eq!(amm.pool_id().as_str(), "cp");
    }

    #[test]
    fn stable_variant() {
        let Ok(cfg) = StableConfig::new(
            id("stable"),
            make_pair(),
            fee(),
            100,
            Amount::from_u128(1_000),
            Amount::from_u128(1_000),
        ) else {
            panic!("expected Ok");
        };
        let amm = AmmConfig::Stable(cfg);
        assert!(amm.is_stable());
        assert!(amm.validate().is_ok());
        assert_eq!(amm.fee_tier(), fee());
    }

    #[test]
    fn clmm_variant() {
        let Ok(state) = ClmmState::at_tick(Tick::ZERO, Liquidity::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(cfg) = ClmmConfig::new(id("v3"), make_pair(), fee(), TickMap::new(), state) else {
            panic!("expected Ok");
        };
        let amm = AmmConfig::Clmm(cfg);
        assert!(amm.is_clmm());
        assert!(amm.validate().is_ok());
        assert_eq!(amm.token_pair(), &make_pair());
    }

    #[test]
    fn display_variants() {
        let Ok(cp) = ConstantProductConfig::new(
            id("cp"),
            make_pair(),
            fee(),
            Amount::from_u128(1),
            Amount::from_u128(1),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(format!("{}", AmmConfig::ConstantProduct(cp)), "ConstantProduct");
    }
}
