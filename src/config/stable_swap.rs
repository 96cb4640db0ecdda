//! Configuration for plain StableSwap pools.

use serde::{Deserialize, Serialize};

use crate::domain::{FeeRate, PoolParams};
use crate::error::{Result, SimError};
use crate::math::{all_non_negative, ensure_len};

/// Declarative blueprint of an `n`-asset StableSwap pool.
///
/// Only `n` and `A` are mandatory; everything else has a default:
///
/// | Field | Default |
/// |-------|---------|
/// | `fee` | `0` |
/// | `admin_fee` | `0` |
/// | `balances` | all zero |
/// | `rates` | all one |
/// | `total_supply` | `D(balances · rates)` |
///
/// # Validation
///
/// - `n >= 2`, `A` finite and non-zero.
/// - `fee` and `admin_fee` within `[0, 1]` (enforced by [`FeeRate`]).
/// - `balances` and `rates`, when given, have length `n` and no negative
///   entries.
/// - `total_supply`, when given, is finite and non-negative.
///
/// # Examples
///
/// ```
/// use sand_buckets::config::StableSwapConfig;
/// use sand_buckets::domain::FeeRate;
///
/// let cfg = StableSwapConfig::new(2, 100.0)
///     .expect("valid")
///     .with_fee(FeeRate::LUSD_3CRV_SWAP)
///     .with_balances(vec![1_000.0, 1_000.0]);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StableSwapConfig {
    n: usize,
    amplification: f64,
    #[serde(default)]
    fee: FeeRate,
    #[serde(default)]
    admin_fee: FeeRate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    balances: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rates: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_supply: Option<f64>,
}

impl StableSwapConfig {
    /// Creates an empty, fee-less pool configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `n < 2` or `A` is zero or
    /// not finite.
    pub fn new(n: usize, amplification: f64) -> Result<Self> {
        let config = Self {
            n,
            amplification,
            fee: FeeRate::ZERO,
            admin_fee: FeeRate::ZERO,
            balances: None,
            rates: None,
            total_supply: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the swap fee.
    #[must_use]
    pub const fn with_fee(mut self, fee: FeeRate) -> Self {
        self.fee = fee;
        self
    }

    /// Sets the admin fee share.
    #[must_use]
    pub const fn with_admin_fee(mut self, admin_fee: FeeRate) -> Self {
        self.admin_fee = admin_fee;
        self
    }

    /// Sets the initial raw balances.
    #[must_use]
    pub fn with_balances(mut self, balances: Vec<f64>) -> Self {
        self.balances = Some(balances);
        self
    }

    /// Sets the per-asset rates.
    #[must_use]
    pub fn with_rates(mut self, rates: Vec<f64>) -> Self {
        self.rates = Some(rates);
        self
    }

    /// Sets the LP supply instead of deriving it from the invariant.
    #[must_use]
    pub const fn with_total_supply(mut self, total_supply: f64) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] describing the first violated
    /// rule.
    pub fn validate(&self) -> Result<()> {
        self.params()?;

        if let Some(balances) = &self.balances {
            ensure_len(balances, self.n, "balances must have one entry per asset")?;
            all_non_negative(balances, "balances must be non-negative")?;
        }
        if let Some(rates) = &self.rates {
            ensure_len(rates, self.n, "rates must have one entry per asset")?;
            all_non_negative(rates, "rates must be non-negative")?;
        }
        if let Some(supply) = self.total_supply {
            if !supply.is_finite() || supply < 0.0 {
                return Err(SimError::InvalidArgument(
                    "total supply must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }

    /// Derives the immutable pool parameters.
    ///
    /// # Errors
    ///
    /// Same as [`PoolParams::new`].
    pub fn params(&self) -> Result<PoolParams> {
        PoolParams::new(self.n, self.amplification, self.fee, self.admin_fee)
    }

    /// Number of assets.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> f64 {
        self.amplification
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Admin fee share.
    #[must_use]
    pub const fn admin_fee(&self) -> FeeRate {
        self.admin_fee
    }

    /// Initial raw balances, if set.
    #[must_use]
    pub fn balances(&self) -> Option<&[f64]> {
        self.balances.as_deref()
    }

    /// Per-asset rates, if set.
    #[must_use]
    pub fn rates(&self) -> Option<&[f64]> {
        self.rates.as_deref()
    }

    /// Explicit LP supply, if set.
    #[must_use]
    pub const fn total_supply(&self) -> Option<f64> {
        self.total_supply
    }
}
