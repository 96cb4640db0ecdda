//! Pool and sweep configuration.
//!
//! This module contains the [`PoolConfig`] enum, the top-level
//! declarative blueprint for creating any pool, along with the per-pool
//! configuration structs and the [`SweepConfig`] used by the sheet
//! generators.  Every type is `serde`-(de)serializable.

mod meta_pool;
mod pool_config;
mod stable_swap;
mod sweep;

pub use meta_pool::MetaPoolConfig;
pub use pool_config::PoolConfig;
pub use stable_swap::StableSwapConfig;
pub use sweep::SweepConfig;
