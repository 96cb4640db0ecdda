//! Element-wise helpers over balance vectors.
//!
//! Pool state is a short `Vec<f64>` (one entry per asset), and most of
//! the liquidity math is written as element-wise combinations of such
//! vectors.  The `zip_*` family rejects operands of different lengths
//! instead of silently truncating like [`Iterator::zip`] would.

use crate::error::{Result, SimError};

/// Sum of all elements (`0` for an empty slice).
#[must_use]
pub fn sum(xs: &[f64]) -> f64 {
    xs.iter().sum()
}

/// Product of all elements (`1` for an empty slice).
#[must_use]
pub fn prod(xs: &[f64]) -> f64 {
    xs.iter().product()
}

/// A vector of `n` zeros.
#[must_use]
pub fn zeros(n: usize) -> Vec<f64> {
    vec![0.0; n]
}

/// A vector of `n` ones.
#[must_use]
pub fn ones(n: usize) -> Vec<f64> {
    vec![1.0; n]
}

/// Copy of `xs` with element `i` replaced by `value`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] if `i` is out of range.
pub fn set(xs: &[f64], i: usize, value: f64) -> Result<Vec<f64>> {
    if i >= xs.len() {
        return Err(SimError::InvalidArgument("index out of range"));
    }
    let mut out = xs.to_vec();
    out[i] = value;
    Ok(out)
}

/// Adds the scalar `b` to every element.
#[must_use]
pub fn map_add(xs: &[f64], b: f64) -> Vec<f64> {
    xs.iter().map(|a| a + b).collect()
}

/// Subtracts the scalar `b` from every element.
#[must_use]
pub fn map_sub(xs: &[f64], b: f64) -> Vec<f64> {
    xs.iter().map(|a| a - b).collect()
}

/// Multiplies every element by the scalar `b`.
#[must_use]
pub fn map_mul(xs: &[f64], b: f64) -> Vec<f64> {
    xs.iter().map(|a| a * b).collect()
}

/// Divides every element by the scalar `b`.
#[must_use]
pub fn map_div(xs: &[f64], b: f64) -> Vec<f64> {
    xs.iter().map(|a| a / b).collect()
}

fn zip_with(xs: &[f64], ys: &[f64], f: impl Fn(f64, f64) -> f64) -> Result<Vec<f64>> {
    if xs.len() != ys.len() {
        return Err(SimError::InvalidArgument("vector lengths differ"));
    }
    Ok(xs.iter().zip(ys).map(|(&x, &y)| f(x, y)).collect())
}

/// Element-wise `xs + ys`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] on length mismatch.
pub fn zip_add(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    zip_with(xs, ys, |x, y| x + y)
}

/// Element-wise `xs - ys`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] on length mismatch.
pub fn zip_sub(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    zip_with(xs, ys, |x, y| x - y)
}

/// Element-wise `xs * ys`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] on length mismatch.
pub fn zip_mul(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    zip_with(xs, ys, |x, y| x * y)
}

/// Element-wise `xs / ys`.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] on length mismatch.
pub fn zip_div(xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
    zip_with(xs, ys, |x, y| x / y)
}

/// Fails unless `xs` has exactly `n` elements.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`] with `what` as the message.
pub fn ensure_len(xs: &[f64], n: usize, what: &'static str) -> Result<()> {
    if xs.len() == n {
        Ok(())
    } else {
        Err(SimError::InvalidArgument(what))
    }
}
