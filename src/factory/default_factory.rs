//! Default pool factory implementation.

use tracing::debug;

use crate::config::AmmConfig;
use crate::error::AmmError;
use crate::pools::PoolBox;

#[cfg(any(feature = "constant-product", feature = "stable", feature = "clmm"))]
use crate::traits::FromConfig;

/// Stateless factory for creating pool instances from configuration.
///
/// `DefaultPoolFactory` is the single entry point for constructing any
/// pool.  It matches on the [`AmmConfig`] variant, validates the
/// configuration, delegates to the pool's [`FromConfig`] implementation,
/// and wraps the result in a [`PoolBox`].
///
/// # Thread Safety
///
/// [`create`](Self::create) is a pure function with no shared mutable
/// state, so it is `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use amm_pricing::config::{AmmConfig, StableConfig};
/// use amm_pricing::domain::{
///     Amount, Decimals, Direction, FeeTier, PoolId, Token, TokenAddress, TokenPair,
/// };
/// use amm_pricing::factory::DefaultPoolFactory;
/// use amm_pricing::traits::SwapPool;
///
/// let d6 = Decimals::new(6).expect("valid");
/// let usdc = Token::new(TokenAddress::from_bytes([1u8; 20]), "USDC", "USD Coin", d6);
/// let usdt = Token::new(TokenAddress::from_bytes([2u8; 20]), "USDT", "Tether", d6);
/// let pair = TokenPair::new(usdc, usdt).expect("distinct");
///
/// let config = AmmConfig::Stable(
///     StableConfig::new(
///         PoolId::new("usdc-usdt").expect("non-empty"),
///         pair.clone(),
///         FeeTier::TIER_0_01_PERCENT,
///         200,
///         Amount::from_u128(50_000_000_000_000),
///         Amount::from_u128(50_000_000_000_000),
///     )
///     .expect("valid config"),
/// );
///
/// let pool = DefaultPoolFactory::create(&config).expect("pool created");
/// assert_eq!(*pool.token_pair(), pair);
/// let quote = pool.quote_output(1_000_000.0, Direction::ZeroForOne).expect("quote ok");
/// assert!(quote.amount_out() > 999_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`AmmConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the pool's [`FromConfig`] implementation.
    /// 4. Wrap the constructed pool in the corresponding [`PoolBox`]
    ///    variant.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidConfiguration`] if the configuration is
    ///   invalid or if the requested pool type's feature is not enabled.
    /// - Any error propagated from the pool's `from_config` method.
    pub fn create(config: &AmmConfig) -> Result<PoolBox, AmmError> {
        config.validate()?;

        let pool = match config {
            #[cfg(feature = "constant-product")]
            AmmConfig::ConstantProduct(cfg) => {
                PoolBox::from(crate::pools::ConstantProductPool::from_config(cfg)?)
            }

            #[cfg(feature = "stable")]
            AmmConfig::Stable(cfg) => PoolBox::from(crate::pools::StablePool::from_config(cfg)?),

            #[cfg(feature = "clmm")]
            AmmConfig::Clmm(cfg) => PoolBox::from(crate::pools::ClmmPool::from_config(cfg)?),

            // Catch-all for config variants whose pool feature is disabled.
            #[allow(unreachable_patterns)]
            _ => {
                return Err(AmmError::InvalidConfiguration(
                    "requested pool type is not enabled (missing feature flag)",
                ));
            }
        };
        debug!(pool = %pool, fee = %config.fee_tier(), "created pool");
        Ok(pool)
    }

    /// Creates one pool per configuration, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first error [`create`](Self::create) reports.
    pub fn create_all<'a, I>(configs: I) -> Result<Vec<PoolBox>, AmmError>
    where
        I: IntoIterator<Item = &'a AmmConfig>,
    {
        configs.into_iter().map(Self::create).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic, unused_imports, dead_code)]
mod tests {
    use super::*;
    use crate::config::{ClmmConfig, ClmmState, ConstantProductConfig, StableConfig};
    use crate::domain::{
        Amount, Decimals, Direction, FeeTier, Liquidity, PoolId, Position, Tick, TickMap, Token,
        TokenAddress, TokenPair,
    };
    use crate::traits::SwapPool;

    // -- helpers --------------------------------------------------------------

    fn make_pair() -> TokenPair {
        let Ok(d6) = Decimals::new(6) else {
            panic!("valid decimals");
        };
        let a = Token::new(
            TokenAddress::from_bytes([1u8; 20]),
            "WETH",
            "Wrapped Ether",
            Decimals::EIGHTEEN,
        );
        let b = Token::new(TokenAddress::from_bytes([2u8; 20]), "USDC", "USD Coin", d6);
        let Ok(pair) = TokenPair::new(a, b) else {
            panic!("expected valid pair");
        };
        pair
    }

    fn pool_id(name: &str) -> PoolId {
        let Ok(id) = PoolId::new(name) else {
            panic!("valid id");
        };
        id
    }

    fn tick(v: i32) -> Tick {
        let Ok(t) = Tick::new(v) else {
            panic!("valid tick");
        };
        t
    }

    // -- ConstantProduct ------------------------------------------------------

    #[cfg(feature = "constant-product")]
    mod constant_product {
        use super::*;

        fn cp_config() -> AmmConfig {
            let Ok(cfg) = ConstantProductConfig::new(
                pool_id("weth-usdc-v2"),
                make_pair(),
                FeeTier::TIER_0_30_PERCENT,
                Amount::from_u128(1_000_000_000_000_000_000_000),
                Amount::from_u128(3_000_000_000_000),
            ) else {
                panic!("expected valid config");
            };
            AmmConfig::ConstantProduct(cfg)
        }

        #[test]
        fn create_constant_product() {
            let Ok(pool) = DefaultPoolFactory::create(&cp_config()) else {
                panic!("expected Ok");
            };
            assert_eq!(pool.kind(), "constant-product");
            assert_eq!(*pool.token_pair(), make_pair());
            assert_eq!(pool.fee_tier(), FeeTier::TIER_0_30_PERCENT);
        }

        #[test]
        fn created_pool_quotes() {
            let Ok(pool) = DefaultPoolFactory::create(&cp_config()) else {
                panic!("expected Ok");
            };
            let Ok(q) = pool.quote_output(1e18, Direction::ZeroForOne) else {
                panic!("expected Ok");
            };
            // ~3000 USDC per WETH, minus fee and slippage
            assert!(q.amount_out() > 2_980_000_000.0 && q.amount_out() < 3_000_000_000.0);
        }
    }

    // -- Stable ---------------------------------------------------------------

    #[cfg(feature = "stable")]
    mod stable {
        use super::*;

        #[test]
        fn create_stable() {
            let Ok(cfg) = StableConfig::new(
                pool_id("stable"),
                make_pair(),
                FeeTier::TIER_0_05_PERCENT,
                100,
                Amount::from_u128(1_000_000_000_000),
                Amount::from_u128(1_000_000_000_000),
            ) else {
                panic!("expected valid config");
            };
            let Ok(pool) = DefaultPoolFactory::create(&AmmConfig::Stable(cfg)) else {
                panic!("expected Ok");
            };
            assert_eq!(pool.kind(), "stable");
        }
    }

    // -- Clmm -----------------------------------------------------------------

    #[cfg(feature = "clmm")]
    mod clmm {
        use super::*;

        fn clmm_config() -> AmmConfig {
            let Ok(position) =
                Position::new(tick(-600), tick(600), Liquidity::new(1_000_000_000_000))
            else {
                panic!("valid position");
            };
            let Ok(ticks) = TickMap::from_positions(&[position]) else {
                panic!("balanced");
            };
            let Ok(state) = ClmmState::at_tick(tick(0), Liquidity::new(1_000_000_000_000)) else {
                panic!("valid state");
            };
            let Ok(cfg) = ClmmConfig::new(
                pool_id("weth-usdc-v3"),
                make_pair(),
                FeeTier::TIER_0_05_PERCENT,
                ticks,
                state,
            ) else {
                panic!("expected valid config");
            };
            AmmConfig::Clmm(cfg)
        }

        #[test]
        fn create_clmm() {
            let Ok(pool) = DefaultPoolFactory::create(&clmm_config()) else {
                panic!("expected Ok");
            };
            assert_eq!(pool.kind(), "clmm");
            assert_eq!(pool.pool_id().as_str(), "weth-usdc-v3");
        }

        #[test]
        fn created_pool_partially_fills_past_last_tick() {
            let Ok(pool) = DefaultPoolFactory::create(&clmm_config()) else {
                panic!("expected Ok");
            };
            let Ok(q) = pool.quote_output(1e15, Direction::OneForZero) else {
                panic!("expected Ok");
            };
            assert!(q.is_partial_fill());
            assert!(q.gas() > 70_000);
        }

        #[cfg(feature = "constant-product")]
        #[test]
        fn create_all_builds_every_pool() {
            let Ok(cp) = ConstantProductConfig::new(
                pool_id("ok"),
                make_pair(),
                FeeTier::ZERO,
                Amount::from_u128(10),
                Amount::from_u128(10),
            ) else {
                panic!("expected valid config");
            };
            let configs = [
                AmmConfig::ConstantProduct(cp),
                clmm_config(),
            ];
            let Ok(pools) = DefaultPoolFactory::create_all(&configs) else {
                panic!("expected Ok");
            };
            let kinds: Vec<&str> = pools.iter().map(PoolBox::kind).collect();
            assert_eq!(kinds, vec!["constant-product", "clmm"]);
        }
    }
}
