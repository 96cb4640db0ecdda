//! Two-asset meta pool trading an asset against a base pool's LP token.
//!
//! Asset 0 is the meta asset, priced at the fixed `rate0`.  Asset 1 is the
//! LP token of an inner [`StableSwapPool`], priced live at that pool's
//! virtual price.  "Underlying" indices flatten both pools:
//!
//! | Underlying index | Asset |
//! |------------------|-------|
//! | `0` | meta asset |
//! | `1 ..= n_base` | base pool asset `index − 1` |

use std::borrow::Cow;

use super::StableSwapPool;
use crate::config::MetaPoolConfig;
use crate::domain::PoolParams;
use crate::error::{Result, SimError};
use crate::math::{all_non_negative, compute_d, ensure_len, set, zeros, zip_mul};
use crate::traits::{FromConfig, LiquidityPool, PoolState, SwapPool};

/// A StableSwap pool whose second asset is the LP token of a base pool.
#[derive(Debug, Clone, PartialEq)]
pub struct StableSwapMetaPool {
    params: PoolParams,
    balances: Vec<f64>,
    total_supply: f64,
    rate0: f64,
    base_pool: StableSwapPool,
}

impl StableSwapMetaPool {
    /// Creates a meta pool over `base_pool`.
    ///
    /// `params` must describe a two-asset pool.  When `total_supply` is
    /// `None` it is set to the invariant of the rate-adjusted balances.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `params` is not two-asset, a
    ///   balance is negative, `rate0` is negative, or the supply is
    ///   invalid.
    /// - Any error pricing the base LP token or solving for `D`.
    pub fn new(
        params: PoolParams,
        balances: Vec<f64>,
        rate0: f64,
        total_supply: Option<f64>,
        base_pool: StableSwapPool,
    ) -> Result<Self> {
        if params.n() != 2 {
            return Err(SimError::InvalidArgument("meta pool must hold two assets"));
        }
        ensure_len(&balances, 2, "meta pool balances must have two entries")?;
        all_non_negative(&balances, "balances must be non-negative")?;
        if !(rate0.is_finite() && rate0 >= 0.0) {
            return Err(SimError::InvalidArgument("rate0 must be finite and non-negative"));
        }

        let rates = [rate0, base_pool.virtual_price()?];
        let total_supply = match total_supply {
            Some(supply) => supply,
            None => compute_d(params.constants(), &zip_mul(&balances, &rates)?)?,
        };
        if !(total_supply.is_finite() && total_supply >= 0.0) {
            return Err(SimError::InvalidArgument(
                "total supply must be finite and non-negative",
            ));
        }

        Ok(Self {
            params,
            balances,
            total_supply,
            rate0,
            base_pool,
        })
    }

    /// The base pool whose LP token is asset 1.
    #[must_use]
    pub const fn base_pool(&self) -> &StableSwapPool {
        &self.base_pool
    }

    /// Mutable access to the base pool.
    ///
    /// Trades and liquidity changes made here move the base virtual price,
    /// and with it the rate of asset 1.
    pub fn base_pool_mut(&mut self) -> &mut StableSwapPool {
        &mut self.base_pool
    }

    /// Rate of the meta asset.
    #[must_use]
    pub const fn rate0(&self) -> f64 {
        self.rate0
    }

    /// Quotes swapping `dx` of underlying asset `i` for underlying asset
    /// `j`, returning the amount received.
    ///
    /// - base → base swaps go through the base pool alone.
    /// - meta → base swaps buy base LP tokens, then withdraw asset `j − 1`
    ///   from the base pool.
    /// - base → meta swaps deposit into the base pool and sell the LP
    ///   tokens.  The base deposit fee is approximated as half the base
    ///   pool's swap fee.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `i == j`, an index is out of
    ///   range, or `dx` is negative.
    /// - Any solver error from either pool.
    pub fn dy_underlying(&self, i: usize, j: usize, dx: f64) -> Result<f64> {
        let n_underlying = 1 + self.base_pool.params().n();
        if i == j {
            return Err(SimError::InvalidArgument("cannot swap an asset for itself"));
        }
        if i >= n_underlying || j >= n_underlying {
            return Err(SimError::InvalidArgument("asset index out of range"));
        }

        if i >= 1 && j >= 1 {
            return Ok(self.base_pool.dy(i - 1, j - 1, dx)?.dy());
        }

        if i == 0 {
            let lp = self.dy(0, 1, dx)?.dy();
            Ok(self.base_pool.calc_withdraw_one_coin(lp, j - 1)?.dy())
        } else {
            let amounts = set(&zeros(n_underlying - 1), i - 1, dx)?;
            let lp = self.base_pool.calc_token_amount(&amounts, true)?;
            let base_fee = self.base_pool.params().fee().get();
            Ok(self.dy(1, 0, lp * (1.0 - base_fee / 2.0))?.dy())
        }
    }
}

impl FromConfig<MetaPoolConfig> for StableSwapMetaPool {
    /// Builds the base pool, then the meta pool on top of it.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`MetaPoolConfig::validate`].
    /// - Any error building the base pool or deriving the supply.
    fn from_config(config: &MetaPoolConfig) -> Result<Self> {
        config.validate()?;
        let base_pool = StableSwapPool::from_config(config.base())?;

        Self::new(
            config.params()?,
            config.balances().map_or_else(|| zeros(2), <[f64]>::to_vec),
            config.rate0(),
            config.total_supply(),
            base_pool,
        )
    }
}

impl PoolState for StableSwapMetaPool {
    fn params(&self) -> &PoolParams {
        &self.params
    }

    fn balances(&self) -> &[f64] {
        &self.balances
    }

    fn rates(&self) -> Result<Cow<'_, [f64]>> {
        Ok(Cow::Owned(vec![self.rate0, self.base_pool.virtual_price()?]))
    }

    fn total_supply(&self) -> f64 {
        self.total_supply
    }

    fn commit(&mut self, balances: Vec<f64>, total_supply: f64) {
        self.balances = balances;
        self.total_supply = total_supply;
    }
}

impl SwapPool for StableSwapMetaPool {}

impl LiquidityPool for StableSwapMetaPool {}
