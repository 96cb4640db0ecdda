//! Top-level pool configuration enum.
//!
//! [`PoolConfig`] is the declarative blueprint handed to
//! [`DefaultPoolFactory`](crate::factory::DefaultPoolFactory).  It
//! deserializes from an externally tagged form:
//!
//! ```text
//! { "stable_swap": { "n": 2, "amplification": 100.0 } }
//! { "meta": { "amplification": 500.0, "base": { ... } } }
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{MetaPoolConfig, StableSwapConfig};
use crate::error::Result;

/// Configuration of any pool the simulator can build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolConfig {
    /// Plain `n`-asset StableSwap pool.
    StableSwap(StableSwapConfig),
    /// Two-asset meta pool over a base pool's LP token.
    Meta(MetaPoolConfig),
}

impl PoolConfig {
    /// Validates the inner configuration.
    ///
    /// # Errors
    ///
    /// Returns the same error as the inner config's `validate()`.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::StableSwap(cfg) => cfg.validate(),
            Self::Meta(cfg) => cfg.validate(),
        }
    }

    /// Returns `true` for a [`StableSwap`](Self::StableSwap) config.
    #[must_use]
    pub const fn is_stable_swap(&self) -> bool {
        matches!(self, Self::StableSwap(_))
    }

    /// Returns `true` for a [`Meta`](Self::Meta) config.
    #[must_use]
    pub const fn is_meta(&self) -> bool {
        matches!(self, Self::Meta(_))
    }
}

impl From<StableSwapConfig> for PoolConfig {
    fn from(cfg: StableSwapConfig) -> Self {
        Self::StableSwap(cfg)
    }
}

impl From<MetaPoolConfig> for PoolConfig {
    fn from(cfg: MetaPoolConfig) -> Self {
        Self::Meta(cfg)
    }
}

impl fmt::Display for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StableSwap(_) => write!(f, "StableSwap"),
            Self::Meta(_) => write!(f, "Meta"),
        }
    }
}
