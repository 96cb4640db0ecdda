//! Configuration for two-asset meta pools paired against a base pool's
//! LP token.

use serde::{Deserialize, Serialize};

use super::StableSwapConfig;
use crate::domain::{FeeRate, PoolParams};
use crate::error::{Result, SimError};
use crate::math::{all_non_negative, ensure_len};

const fn default_rate0() -> f64 {
    1.0
}

/// Declarative blueprint of a meta pool.
///
/// Asset 0 is the meta asset (priced by `rate0`); asset 1 is the LP token
/// of the pool described by `base`, priced live at the base pool's virtual
/// price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaPoolConfig {
    amplification: f64,
    #[serde(default)]
    fee: FeeRate,
    #[serde(default)]
    admin_fee: FeeRate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    balances: Option<Vec<f64>>,
    #[serde(default = "default_rate0")]
    rate0: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_supply: Option<f64>,
    base: StableSwapConfig,
}

impl MetaPoolConfig {
    /// Creates an empty, fee-less meta pool over `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `A` is invalid or `base`
    /// fails its own validation.
    pub fn new(amplification: f64, base: StableSwapConfig) -> Result<Self> {
        let config = Self {
            amplification,
            fee: FeeRate::ZERO,
            admin_fee: FeeRate::ZERO,
            balances: None,
            rate0: default_rate0(),
            total_supply: None,
            base,
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

    /// Sets the initial raw balances `[meta, base_lp]`.
    #[must_use]
    pub fn with_balances(mut self, balances: Vec<f64>) -> Self {
        self.balances = Some(balances);
        self
    }

    /// Sets the rate of the meta asset.
    #[must_use]
    pub const fn with_rate0(mut self, rate0: f64) -> Self {
        self.rate0 = rate0;
        self
    }

    /// Sets the LP supply instead of deriving it from the invariant.
    #[must_use]
    pub const fn with_total_supply(mut self, total_supply: f64) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    /// Validates the meta pool and its base.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] describing the first violated
    /// rule.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.params()?;

        if let Some(balances) = &self.balances {
            ensure_len(balances, 2, "meta pool balances must have two entries")?;
            all_non_negative(balances, "balances must be non-negative")?;
        }
        if !self.rate0.is_finite() || self.rate0 < 0.0 {
            return Err(SimError::InvalidArgument("rate0 must be finite and non-negative"));
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

    /// Derives the two-asset pool parameters of the meta pool.
    ///
    /// # Errors
    ///
    /// Same as [`PoolParams::new`].
    pub fn params(&self) -> Result<PoolParams> {
        PoolParams::new(2, self.amplification, self.fee, self.admin_fee)
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

    /// Rate of the meta asset.
    #[must_use]
    pub const fn rate0(&self) -> f64 {
        self.rate0
    }

    /// Explicit LP supply, if set.
    #[must_use]
    pub const fn total_supply(&self) -> Option<f64> {
        self.total_supply
    }

    /// Configuration of the base pool.
    #[must_use]
    pub const fn base(&self) -> &StableSwapConfig {
        &self.base
    }
}
