//! Plain `n`-asset StableSwap pool (Curve style).
//!
//! Specialised for low-slippage swaps between similarly priced assets.
//! All invariant math and LP accounting comes from the default methods of
//! [`SwapPool`] and [`LiquidityPool`]; this type only owns the state.
//!
//! # Invariant
//!
//! ```text
//! Ann · Σx + D = Ann · D + D^(n+1) / (n^n · Πx)
//! ```
//!
//! over rate-adjusted balances `x_i = balances[i] · rates[i]`.
//!
//! # Amplification behaviour
//!
//! | A | Curve |
//! |---|-------|
//! | small | close to constant product |
//! | 50 – 5 000 | hybrid, low slippage near the peg |
//! | → ∞ | constant sum (1:1 swaps) |

use std::borrow::Cow;

use crate::config::StableSwapConfig;
use crate::domain::PoolParams;
use crate::error::{Result, SimError};
use crate::math::{all_non_negative, compute_d, ensure_len, ones, zeros, zip_mul};
use crate::traits::{FromConfig, LiquidityPool, PoolState, SwapPool};

/// A StableSwap pool holding `n` assets.
///
/// Cloning gives an independent copy, which is how hypothetical trades
/// are probed without touching the live pool.
#[derive(Debug, Clone, PartialEq)]
pub struct StableSwapPool {
    params: PoolParams,
    balances: Vec<f64>,
    rates: Vec<f64>,
    total_supply: f64,
}

impl StableSwapPool {
    /// Creates a pool from validated parameters and initial state.
    ///
    /// When `total_supply` is `None` it is set to the invariant
    /// `D(balances · rates)`, so the initial virtual price is 1.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `balances` or `rates` do not have
    ///   `n` entries, contain a negative value, or the supply is negative
    ///   or not finite.
    /// - Any solver error while deriving the supply.
    pub fn new(
        params: PoolParams,
        balances: Vec<f64>,
        rates: Vec<f64>,
        total_supply: Option<f64>,
    ) -> Result<Self> {
        let n = params.n();
        ensure_len(&balances, n, "balances must have one entry per asset")?;
        all_non_negative(&balances, "balances must be non-negative")?;
        ensure_len(&rates, n, "rates must have one entry per asset")?;
        all_non_negative(&rates, "rates must be non-negative")?;

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
            rates,
            total_supply,
        })
    }

    /// Creates an empty pool with unit rates and no LP supply.
    #[must_use]
    pub fn empty(params: PoolParams) -> Self {
        let n = params.n();
        Self {
            params,
            balances: zeros(n),
            rates: ones(n),
            total_supply: 0.0,
        }
    }
}

impl FromConfig<StableSwapConfig> for StableSwapPool {
    /// Builds the pool described by `config`.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`StableSwapConfig::validate`].
    /// - Any solver error while deriving the supply.
    fn from_config(config: &StableSwapConfig) -> Result<Self> {
        config.validate()?;
        let params = config.params()?;
        let n = params.n();

        Self::new(
            params,
            config.balances().map_or_else(|| zeros(n), <[f64]>::to_vec),
            config.rates().map_or_else(|| ones(n), <[f64]>::to_vec),
            config.total_supply(),
        )
    }
}

impl PoolState for StableSwapPool {
    fn params(&self) -> &PoolParams {
        &self.params
    }

    fn balances(&self) -> &[f64] {
        &self.balances
    }

    fn rates(&self) -> Result<Cow<'_, [f64]>> {
        Ok(Cow::Borrowed(&self.rates))
    }

    fn total_supply(&self) -> f64 {
        self.total_supply
    }

    fn commit(&mut self, balances: Vec<f64>, total_supply: f64) {
        self.balances = balances;
        self.total_supply = total_supply;
    }
}

impl SwapPool for StableSwapPool {}

impl LiquidityPool for StableSwapPool {}
