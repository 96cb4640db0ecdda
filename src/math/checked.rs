//! Guards for floating-point quantities.
//!
//! The simulator works in plain `f64`, so overflow shows up as `±∞` and
//! invalid operations as `NaN` rather than as a trapped error.  These
//! helpers turn such values into [`SimError`]s at the boundaries where a
//! finite, non-negative quantity is required, and provide the tolerant
//! sign checks used by the liquidity operations.

use crate::error::{Result, SimError};

/// Slack allowed below zero before a quantity counts as negative.
pub const NEGATIVE_SLACK: f64 = 1e-9;

/// `true` if `x >= 0`.
#[inline]
#[must_use]
pub fn non_negative(x: f64) -> bool {
    x >= 0.0
}

/// `true` if `x > 0`.
#[inline]
#[must_use]
pub fn positive(x: f64) -> bool {
    x > 0.0
}

/// `true` if `x` is positive up to rounding noise (`x > -1e-9`).
#[inline]
#[must_use]
pub fn approx_positive(x: f64) -> bool {
    x > -NEGATIVE_SLACK
}

/// Clamps rounding noise below zero back to zero.
#[inline]
#[must_use]
pub fn clamped(x: f64) -> f64 {
    x.max(0.0)
}

/// Passes `x` through if it is finite.
///
/// # Errors
///
/// Returns [`SimError::InvalidResult`] if `x` is `NaN` or infinite.
#[inline]
pub fn finite(x: f64, what: &'static str) -> Result<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(SimError::InvalidResult(what))
    }
}

/// Passes `x` through if it is finite and non-negative.
///
/// # Errors
///
/// Returns [`SimError::InvalidResult`] otherwise.
#[inline]
pub fn finite_non_negative(x: f64, what: &'static str) -> Result<f64> {
    if x.is_finite() && x >= 0.0 {
        Ok(x)
    } else {
        Err(SimError::InvalidResult(what))
    }
}

/// Validates that every element of an input vector is finite and
/// non-negative.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] with `what` as the message.
pub fn all_non_negative(xs: &[f64], what: &'static str) -> Result<()> {
    if xs.iter().all(|x| x.is_finite() && non_negative(*x)) {
        Ok(())
    } else {
        Err(SimError::InvalidArgument(what))
    }
}
