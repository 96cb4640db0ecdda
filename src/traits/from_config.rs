//! Generic construction trait for building pools from configuration.
//!
//! [`FromConfig`] gives the factory one uniform entry point per pool type.
//! Each pool implements `FromConfig<C>` for its own config struct, so the
//! factory dispatches construction without `dyn` trait objects:
//!
//! ```text
//! PoolConfig::StableSwap(cfg) => StableSwapPool::from_config(&cfg)
//! PoolConfig::Meta(cfg)       => StableSwapMetaPool::from_config(&cfg)
//! ```
//!
//! # Validation contract
//!
//! Implementations validate the whole configuration during construction.
//! A successfully constructed pool is in a valid initial state: correct
//! asset count, fee fractions within `[0, 1]`, non-negative balances and
//! rates, and an LP supply that is finite and non-negative.

use crate::error::Result;

/// Builds a pool from a configuration of type `C`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
/// (or a solver error while deriving the initial supply) if the
/// configuration is invalid.
pub trait FromConfig<C> {
    /// Creates a new pool instance from `config`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
