//! Parameters of the price-grid sweeps in [`crate::sheets`].

use serde::{Deserialize, Serialize};

use crate::domain::{FeeRate, PoolParams};
use crate::error::{Result, SimError};

/// Grid and pool parameters shared by every sweep.
///
/// Each sweep walks `rows − 1` price points and, for every amplification
/// in `amplifications`, builds a fresh two-asset pool with invariant
/// `invariant` sitting at that price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Number of grid rows; rows `1..rows` are emitted.
    pub rows: u32,
    /// One output column per amplification coefficient.
    pub amplifications: Vec<f64>,
    /// Pool invariant `D` at every grid point.
    pub invariant: f64,
    /// Swap fee of the simulated pools.
    pub fee: FeeRate,
    /// Admin fee share of the simulated pools.
    pub admin_fee: FeeRate,
    /// Deposit size used by the marginal-deposit sweep.
    pub dx: f64,
    /// Price at which the walled-withdrawal sweep stops withdrawing.
    pub wall: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            amplifications: vec![
                10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
            ],
            invariant: 1e3,
            fee: FeeRate::LUSD_3CRV_SWAP,
            admin_fee: FeeRate::HALF,
            dx: 1.0,
            wall: 1.0004,
        }
    }
}

impl SweepConfig {
    /// Replaces the pool invariant.
    #[must_use]
    pub const fn with_invariant(mut self, invariant: f64) -> Self {
        self.invariant = invariant;
        self
    }

    /// Replaces the amplification columns.
    #[must_use]
    pub fn with_amplifications(mut self, amplifications: Vec<f64>) -> Self {
        self.amplifications = amplifications;
        self
    }

    /// Replaces the row count.
    #[must_use]
    pub const fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Checks that the grid is non-empty and every column yields a valid
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] on the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(SimError::InvalidArgument("sweep needs at least two rows"));
        }
        if !(self.invariant.is_finite() && self.invariant > 0.0) {
            return Err(SimError::InvalidArgument("sweep invariant must be positive"));
        }
        if !(self.dx.is_finite() && self.dx > 0.0) {
            return Err(SimError::InvalidArgument("sweep dx must be positive"));
        }
        if !(self.wall.is_finite() && self.wall >= 1.0) {
            return Err(SimError::InvalidArgument("wall price must be at least 1"));
        }
        for &a in &self.amplifications {
            self.params(a)?;
        }
        Ok(())
    }

    /// Two-asset pool parameters for one amplification column.
    ///
    /// # Errors
    ///
    /// Same as [`PoolParams::new`].
    pub fn params(&self, amplification: f64) -> Result<PoolParams> {
        PoolParams::new(2, amplification, self.fee, self.admin_fee)
    }
}
