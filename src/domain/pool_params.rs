//! Immutable pool parameters shared by plain and meta pools.

use core::fmt;

use crate::domain::FeeRate;
use crate::error::Result;
use crate::math::InvariantConstants;

/// The immutable economic parameters of a StableSwap pool.
///
/// # Derived values
///
/// - `nn = n^n`, `ann = A · n` (see [`InvariantConstants`]).
/// - `base_fee = fee · n / (4 · (n − 1))`, the per-asset imbalance fee
///   charged on multi-asset deposits and withdrawals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolParams {
    amplification: f64,
    fee: FeeRate,
    admin_fee: FeeRate,
    constants: InvariantConstants,
}

impl PoolParams {
    /// Validates and derives the parameters of an `n`-asset pool.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
    /// if `n < 2` or `A` is zero or not finite.
    pub fn new(n: usize, amplification: f64, fee: FeeRate, admin_fee: FeeRate) -> Result<Self> {
        Ok(Self {
            amplification,
            fee,
            admin_fee,
            constants: InvariantConstants::new(n, amplification)?,
        })
    }

    /// Number of assets.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.constants.n()
    }

    /// Amplification coefficient `A`.
    #[must_use]
    pub const fn amplification(&self) -> f64 {
        self.amplification
    }

    /// Swap fee rate.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Admin share of fees, skimmed from the pool balances.
    #[must_use]
    pub const fn admin_fee(&self) -> FeeRate {
        self.admin_fee
    }

    /// Invariant constants `n`, `n^n`, `A · n`.
    #[must_use]
    pub const fn constants(&self) -> &InvariantConstants {
        &self.constants
    }

    /// Imbalance fee `fee · n / (4 · (n − 1))`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn base_fee(&self) -> f64 {
        let n = self.n() as f64;
        self.fee.get() * n / (4.0 * (n - 1.0))
    }

    /// Share of the output fee that leaks back into the pool's balance
    /// after a swap: `fee · (1 − admin_fee)`.
    #[must_use]
    pub fn fee_leakage(&self) -> f64 {
        self.fee.get() * self.admin_fee.complement()
    }
}

impl fmt::Display for PoolParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PoolParams(n={}, A={}, fee={}, admin_fee={})",
            self.n(),
            self.amplification,
            self.fee,
            self.admin_fee
        )
    }
}
