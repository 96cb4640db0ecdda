//! Default pool factory implementation.

use crate::config::PoolConfig;
use crate::error::{Result, SimError};
use crate::pools::{PoolBox, StableSwapPool};
use crate::traits::FromConfig;

/// Stateless factory for creating pool instances from configuration.
///
/// `DefaultPoolFactory` is the single entry point for constructing any
/// simulated pool.  It validates the [`PoolConfig`], delegates to the
/// pool's [`FromConfig`] implementation, and wraps the result in a
/// [`PoolBox`].
///
/// # Example
///
/// ```rust
/// use sand_buckets::config::{PoolConfig, StableSwapConfig};
/// use sand_buckets::factory::DefaultPoolFactory;
/// use sand_buckets::traits::{PoolState, SwapPool};
///
/// let config = StableSwapConfig::new(2, 100.0)
///     .expect("valid config")
///     .with_balances(vec![1_000.0, 1_000.0]);
///
/// let pool = DefaultPoolFactory::create(&PoolConfig::StableSwap(config))
///     .expect("pool created");
/// assert_eq!(pool.balances(), &[1_000.0, 1_000.0]);
/// assert!((pool.virtual_price().expect("priced") - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultPoolFactory;

impl DefaultPoolFactory {
    /// Creates a new pool instance from the given configuration.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`PoolConfig::validate`].
    /// 2. Match on the config variant.
    /// 3. Delegate to the pool's [`FromConfig`] implementation.
    /// 4. Wrap the constructed pool in the matching [`PoolBox`] variant.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if the configuration is invalid or
    ///   the requested pool type's feature is not enabled.
    /// - Any error propagated from the pool's `from_config` method.
    pub fn create(config: &PoolConfig) -> Result<PoolBox> {
        config.validate()?;

        match config {
            PoolConfig::StableSwap(cfg) => {
                let pool = StableSwapPool::from_config(cfg)?;
                Ok(PoolBox::StableSwap(Box::new(pool)))
            }

            #[cfg(feature = "meta-pool")]
            PoolConfig::Meta(cfg) => {
                let pool = crate::pools::meta::StableSwapMetaPool::from_config(cfg)?;
                Ok(PoolBox::Meta(Box::new(pool)))
            }

            // Catch-all for config variants whose pool feature is disabled.
            #[allow(unreachable_patterns)]
            _ => Err(SimError::InvalidArgument(
                "requested pool type is not enabled (missing feature flag)",
            )),
        }
    }
}
