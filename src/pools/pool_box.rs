//! Enum dispatch wrapper for all pool types.
//!
//! [`PoolBox`] wraps every concrete pool behind a single enum, enabling
//! heterogeneous collections with static dispatch.  The meta pool variant
//! is gated behind the `meta-pool` feature.

#[cfg(feature = "meta-pool")]
use super::meta::StableSwapMetaPool;
use super::stable_swap::StableSwapPool;

use std::borrow::Cow;

use crate::domain::PoolParams;
use crate::error::Result;
use crate::traits::{LiquidityPool, PoolState, SwapPool};

/// Static-dispatch enum wrapping all concrete pool implementations.
///
/// The enum implements [`PoolState`] by delegating to the inner pool, and
/// picks up [`SwapPool`] and [`LiquidityPool`] through their default
/// methods, so a `PoolBox` behaves exactly like the pool it wraps.
///
/// # Example
///
/// ```text
/// let pool_box = PoolBox::StableSwap(Box::new(pool));
/// let vp = pool_box.virtual_price()?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PoolBox {
    /// Plain `n`-asset StableSwap pool.
    StableSwap(Box<StableSwapPool>),

    /// Two-asset meta pool over a base pool's LP token.
    #[cfg(feature = "meta-pool")]
    Meta(Box<StableSwapMetaPool>),
}

/// Helper macro to delegate a method call to every `PoolBox` variant.
macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            PoolBox::StableSwap(p) => p.$method($($arg),*),
            #[cfg(feature = "meta-pool")]
            PoolBox::Meta(p) => p.$method($($arg),*),
        }
    };
}

impl PoolBox {
    /// Returns the inner meta pool, if this is one.
    #[cfg(feature = "meta-pool")]
    #[must_use]
    pub fn as_meta(&self) -> Option<&StableSwapMetaPool> {
        match self {
            Self::Meta(p) => Some(&**p),
            Self::StableSwap(_) => None,
        }
    }

    /// Returns `true` for the [`StableSwap`](Self::StableSwap) variant.
    #[must_use]
    pub const fn is_stable_swap(&self) -> bool {
        matches!(self, Self::StableSwap(_))
    }
}

impl PoolState for PoolBox {
    fn params(&self) -> &PoolParams {
        delegate!(self, params())
    }

    fn balances(&self) -> &[f64] {
        delegate!(self, balances())
    }

    fn rates(&self) -> Result<Cow<'_, [f64]>> {
        delegate!(self, rates())
    }

    fn total_supply(&self) -> f64 {
        delegate!(self, total_supply())
    }

    fn commit(&mut self, balances: Vec<f64>, total_supply: f64) {
        delegate!(self, commit(balances, total_supply));
    }
}

impl SwapPool for PoolBox {}

impl LiquidityPool for PoolBox {}
