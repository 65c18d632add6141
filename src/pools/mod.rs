//! Feature-gated pool implementations and the [`PoolBox`] dispatch enum.
//!
//! Each pool type is behind its own Cargo feature flag.  The [`PoolBox`]
//! enum provides static dispatch across all enabled pool types, allowing
//! heterogeneous collections without `dyn` trait objects.
//!
//! # Pool Types
//!
//! | Feature | Pool | Style | State |
//! |---------|------|-------|-------|
//! | `constant-product` | [`ConstantProductPool`] | Uniswap V2 | [`ReserveState`](crate::config::ReserveState) |
//! | `stable` | [`StablePool`] | Curve StableSwap | [`ReserveState`](crate::config::ReserveState) |
//! | `clmm` | [`ClmmPool`] | Uniswap V3 | [`ClmmState`](crate::config::ClmmState) |

#[cfg(feature = "clmm")]
pub mod clmm;
#[cfg(feature = "constant-product")]
pub mod constant_product;
#[cfg(feature = "stable")]
pub mod stable;

mod pool_box;

#[cfg(all(
    test,
    feature = "constant-product",
    feature = "stable",
    feature = "clmm"
))]
mod proptest_properties;

#[cfg(feature = "clmm")]
pub use clmm::{CLMM_BASE_GAS, CLMM_GAS_PER_TICK, ClmmPool};
#[cfg(feature = "constant-product")]
pub use constant_product::{CONSTANT_PRODUCT_GAS, ConstantProductPool};
pub use pool_box::{PoolBox, PoolState};
#[cfg(feature = "stable")]
pub use stable::{STABLE_GAS, StablePool};
