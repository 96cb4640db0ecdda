//! Generic numerical solvers: fixed-point iteration and bisection.
//!
//! Both solvers are bounded by [`MAX_ITERATIONS`].  Running out of
//! iterations is reported as a distinct error kind so callers can tell
//! "no solution found" apart from "bad input".
//!
//! # Fixed-point iteration
//!
//! [`converge`] repeatedly applies a step function until two consecutive
//! iterates agree to a relative tolerance of [`CONVERGENCE_EPSILON`].
//! Newton updates for the StableSwap invariant converge quadratically, so
//! the cap is only reached for degenerate inputs (e.g. a zero balance
//! driving an iterate to `NaN`).
//!
//! # Bisection
//!
//! [`bin_search_desc`] inverts a monotonically *decreasing* function over
//! a closed interval.  The target is bracket-checked against the function
//! values at both ends before searching, so an unreachable target fails
//! immediately with [`SimError::BisectionFailure`] instead of burning
//! through the iteration budget.

use tracing::{trace, warn};

use crate::error::{Result, SimError};

/// Iteration cap shared by every solver.
pub const MAX_ITERATIONS: u32 = 256;

/// Relative change between consecutive iterates below which a fixed-point
/// iteration counts as converged.
pub const CONVERGENCE_EPSILON: f64 = 1e-13;

/// Default relative tolerance on the function value for bisection.
pub const BISECTION_EPSILON: f64 = 1e-9;

#[inline]
fn settled(curr: f64, prev: f64) -> bool {
    (curr - prev).abs() <= CONVERGENCE_EPSILON * curr.abs().max(prev.abs())
}

#[inline]
fn rel_diff(a: f64, b: f64) -> f64 {
    a / b - 1.0
}

/// Iterates a fallible step function from `seed` until it settles.
///
/// # Errors
///
/// - Any error returned by `step` is propagated unchanged.
/// - [`SimError::ConvergenceFailure`] if an iterate is non-finite or the
///   iteration cap is exhausted.
pub fn try_converge<F>(seed: f64, mut step: F) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut prev = seed;

    for i in 1..=MAX_ITERATIONS {
        let curr = step(prev)?;

        if !curr.is_finite() {
            warn!(iteration = i, seed, "fixed-point iterate is not finite");
            return Err(SimError::ConvergenceFailure { iterations: i });
        }
        if settled(curr, prev) {
            trace!(iterations = i, value = curr, "converged");
            return Ok(curr);
        }

        prev = curr;
    }

    warn!(seed, last = prev, "fixed-point iteration exhausted");
    Err(SimError::ConvergenceFailure {
        iterations: MAX_ITERATIONS,
    })
}

/// Iterates an infallible step function from `seed` until it settles.
///
/// # Errors
///
/// Returns [`SimError::ConvergenceFailure`] if an iterate is non-finite or
/// the iteration cap is exhausted.
pub fn converge<F>(seed: f64, mut step: F) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    try_converge(seed, |x| Ok(step(x)))
}

/// Evaluates `f` at an interval end, treating failures and non-finite
/// values as an open (unbounded) end.
fn bound<T, F>(f: &mut F, x: f64) -> Option<f64>
where
    F: FnMut(f64) -> Result<(f64, T)>,
{
    match f(x) {
        Ok((y, _)) if y.is_finite() => Some(y),
        _ => None,
    }
}

/// Finds `x ∈ [min, max]` such that `f(x) ≈ y_to_find` for a function
/// that is monotonically decreasing on the interval.
///
/// `f` returns its value together with auxiliary outputs of type `T`;
/// the auxiliary outputs at the solution are returned alongside `x`.
/// Convergence is declared once `|y_to_find / f(x) - 1| < epsilon`.
///
/// If `f` cannot be evaluated at an interval end (e.g. a pole at zero),
/// that end is treated as unbounded for the bracket check.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if `min > max` or the target is not
///   finite.
/// - [`SimError::BisectionFailure`] if the target lies outside
///   `[f(max), f(min)]` or the iteration cap is exhausted.
/// - Any error returned by `f` at an interior point.
pub fn bin_search_desc<T, F>(
    min: f64,
    max: f64,
    epsilon: f64,
    mut f: F,
    y_to_find: f64,
) -> Result<(f64, T)>
where
    F: FnMut(f64) -> Result<(f64, T)>,
{
    if min.is_nan() || max.is_nan() || min > max {
        return Err(SimError::InvalidArgument("search range must have min <= max"));
    }
    if !y_to_find.is_finite() {
        return Err(SimError::InvalidArgument("search target must be finite"));
    }

    if let Some(upper) = bound(&mut f, min) {
        if y_to_find > upper && rel_diff(y_to_find, upper).abs() >= epsilon {
            warn!(y_to_find, upper, "bisection target above range");
            return Err(SimError::BisectionFailure("target above f(min)"));
        }
    }
    if let Some(lower) = bound(&mut f, max) {
        if y_to_find < lower && rel_diff(y_to_find, lower).abs() >= epsilon {
            warn!(y_to_find, lower, "bisection target below range");
            return Err(SimError::BisectionFailure("target below f(max)"));
        }
    }

    let mut left = min;
    let mut right = max;

    for i in 1..=MAX_ITERATIONS {
        let x = (left + right) / 2.0;
        let (y, rest) = f(x)?;
        let diff = rel_diff(y_to_find, y);

        if diff.abs() < epsilon {
            trace!(iterations = i, x, "bisection found target");
            return Ok((x, rest));
        }

        if diff < 0.0 {
            left = x;
        } else {
            right = x;
        }
    }

    warn!(y_to_find, left, right, "bisection exhausted");
    Err(SimError::BisectionFailure("not found within iteration cap"))
}
