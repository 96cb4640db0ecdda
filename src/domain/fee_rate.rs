//! Fee rates expressed as a fraction in `[0, 1]`.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// A fee fraction in the closed interval `[0, 1]`.
///
/// Used both for the swap fee (fraction of the output withheld from the
/// trader) and the admin fee (fraction of the withheld fee taken out of
/// the pool's balances rather than left to liquidity providers).
///
/// # Examples
///
/// ```
/// use sand_buckets::domain::FeeRate;
///
/// let fee = FeeRate::new(0.0004).expect("in range");
/// assert_eq!(fee.get(), 0.0004);
/// assert!(FeeRate::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FeeRate(f64);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0.0);

    /// 0.04%, the swap fee of the LUSD-3CRV pool.
    pub const LUSD_3CRV_SWAP: Self = Self(0.0004);

    /// 50%, the admin share used by most Curve pools.
    pub const HALF: Self = Self(0.5);

    /// Creates a validated fee rate.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `rate` is outside `[0, 1]`
    /// or not a number.
    pub fn new(rate: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(SimError::InvalidArgument("fee must be within [0, 1]"))
        }
    }

    /// Returns the raw fraction.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// `1 - rate`.
    #[must_use]
    pub fn complement(&self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for FeeRate {
    type Error = SimError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FeeRate> for f64 {
    fn from(rate: FeeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
