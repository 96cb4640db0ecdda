//! Pool implementations and the [`PoolBox`] dispatch enum.
//!
//! | Feature | Pool | Assets |
//! |---------|------|--------|
//! | (always) | [`StableSwapPool`] | `n >= 2` |
//! | `meta-pool` | [`StableSwapMetaPool`] | meta asset + base LP token |

#[cfg(feature = "meta-pool")]
pub mod meta;
pub mod stable_swap;

mod pool_box;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

#[cfg(feature = "meta-pool")]
pub use meta::StableSwapMetaPool;
pub use pool_box::PoolBox;
pub use stable_swap::StableSwapPool;
