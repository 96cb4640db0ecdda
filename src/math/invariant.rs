//! StableSwap invariant math (Curve style) over rate-adjusted balances.
//!
//! # Invariant
//!
//! For `n` assets with rate-adjusted balances `X = (x_1, …, x_n)`:
//!
//! ```text
//! Ann · S + D = Ann · D + D^(n+1) / (n^n · P)
//! ```
//!
//! where `S = Σ x_i`, `P = Π x_i` and `Ann = A · n`.  `Ann` follows the
//! convention of production Curve pools (`A · n`, not `A · n^n`).
//!
//! # Newton iterations
//!
//! `D` is found by iterating, from `D = S`:
//!
//! ```text
//! D_P    = D^(n+1) / (n^n · P)
//! D_next = (Ann · S + n · D_P) · D / ((Ann − 1) · D + (n + 1) · D_P)
//! ```
//!
//! The balance `y` of asset `i` given `D` and the other balances is found
//! by iterating, from `y = D`:
//!
//! ```text
//! b      = S' + D / Ann
//! c      = D^(n+1) / (n^n · P' · Ann)
//! y_next = (y² + c) / (2y + b − D)
//! ```
//!
//! where `S'` and `P'` exclude asset `i`.

use serde::{Deserialize, Serialize};

use super::checked::{all_non_negative, finite_non_negative};
use super::solver::{bin_search_desc, converge, BISECTION_EPSILON};
use super::vector::{ensure_len, prod, sum};
use crate::error::{Result, SimError};

/// Derived constants of an `n`-asset StableSwap invariant.
///
/// - `nn = n^n`
/// - `ann = A · n`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvariantConstants {
    n: usize,
    nn: f64,
    ann: f64,
}

impl InvariantConstants {
    /// Derives the constants for `n` assets and amplification `A`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `n < 2`, `n` does not fit the
    ///   exponent range, or `A` is zero or not finite.
    pub fn new(n: usize, amplification: f64) -> Result<Self> {
        if n < 2 {
            return Err(SimError::InvalidArgument("pool needs at least two assets"));
        }
        let exponent =
            i32::try_from(n).map_err(|_| SimError::InvalidArgument("too many assets"))?;
        if amplification == 0.0 || !amplification.is_finite() {
            return Err(SimError::InvalidArgument(
                "amplification must be finite and non-zero",
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let n_f = n as f64;

        Ok(Self {
            n,
            nn: n_f.powi(exponent),
            ann: amplification * n_f,
        })
    }

    /// Constants for a two-asset pool.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `A` is zero or not finite.
    pub fn two_asset(amplification: f64) -> Result<Self> {
        Self::new(2, amplification)
    }

    /// Number of assets.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// `n^n`.
    #[must_use]
    pub const fn nn(&self) -> f64 {
        self.nn
    }

    /// `A · n`.
    #[must_use]
    pub const fn ann(&self) -> f64 {
        self.ann
    }

    #[allow(clippy::cast_precision_loss)]
    fn n_f64(&self) -> f64 {
        self.n as f64
    }

    /// `D^(n+1)`.  `n` was range-checked at construction.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn pow_n1(&self, d: f64) -> f64 {
        d.powi(self.n as i32 + 1)
    }
}

/// Computes the invariant `D` of rate-adjusted balances `x`.
///
/// Returns exactly `0` for an all-zero pool without iterating.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if `x` has the wrong length or any
///   element is negative or not finite.
/// - [`SimError::ConvergenceFailure`] if Newton iteration does not settle
///   (e.g. some but not all balances are zero).
/// - [`SimError::InvalidResult`] if the solution is negative.
pub fn compute_d(c: &InvariantConstants, x: &[f64]) -> Result<f64> {
    ensure_len(x, c.n, "balance count must match asset count")?;
    all_non_negative(x, "balances must be non-negative")?;

    let s = sum(x);
    if s == 0.0 {
        return Ok(0.0);
    }
    let p = prod(x);
    let n = c.n_f64();
    let ann = c.ann;

    let d = converge(s, |d| {
        let d_p = c.pow_n1(d) / (c.nn * p);
        ((ann * s + d_p * n) * d) / ((ann - 1.0) * d + (n + 1.0) * d_p)
    })?;

    finite_non_negative(d, "invariant D must be non-negative")
}

/// Computes the balance of asset `i` that satisfies the invariant `d`
/// given the other rate-adjusted balances in `x` (`x[i]` is ignored).
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if `i` is out of range, `x` has the
///   wrong length, or any element is negative or not finite.
/// - [`SimError::ConvergenceFailure`] if Newton iteration does not settle.
/// - [`SimError::InvalidResult`] if the solution is negative.
pub fn compute_y_d(c: &InvariantConstants, i: usize, d: f64, x: &[f64]) -> Result<f64> {
    ensure_len(x, c.n, "balance count must match asset count")?;
    if i >= c.n {
        return Err(SimError::InvalidArgument("asset index out of range"));
    }
    all_non_negative(x, "balances must be non-negative")?;

    let (s_, p_) = x
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .fold((0.0, 1.0), |(s, p), (_, &xj)| (s + xj, p * xj));

    let b = s_ + d / c.ann;
    let cc = c.pow_n1(d) / (c.nn * p_ * c.ann);

    let y = converge(d, |y| (y * y + cc) / (2.0 * y + b - d))?;

    finite_non_negative(y, "implied balance must be non-negative")
}

/// `D^(n+1) / (Ann · n^n)`, the constant term of the spot-price formula.
fn d_ann(c: &InvariantConstants, d: f64) -> f64 {
    c.pow_n1(d) / (c.ann * c.nn)
}

/// Balance on the other side of a two-asset pool with invariant `d`
/// when one side holds `x`.
///
/// # Errors
///
/// Propagates errors from [`compute_y_d`].
pub fn other_side(c: &InvariantConstants, d: f64, x: f64) -> Result<f64> {
    compute_y_d(c, 1, d, &[x, 0.0])
}

/// For a two-asset pool with invariant `d` holding `x` of asset 0,
/// returns the spot price `dy/dx` together with the balance `y` of
/// asset 1.
///
/// ```text
/// dy/dx = (x·y + D_Ann / x) / (x·y + D_Ann / y)
/// ```
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the constants are not for a
///   two-asset pool or `x` is negative.
/// - Errors from [`compute_y_d`].
pub fn dydx_y_from_x(c: &InvariantConstants, d: f64, x: f64) -> Result<(f64, f64)> {
    if c.n != 2 {
        return Err(SimError::InvalidArgument("spot price requires a two-asset pool"));
    }
    let y = other_side(c, d, x)?;
    let k = d_ann(c, d);
    let xy = x * y;

    Ok(((xy + k / x) / (xy + k / y), y))
}

/// Inverse of [`dydx_y_from_x`]: finds the balances `(x, y)` of a
/// two-asset pool with amplification `amplification` and invariant `d`
/// whose spot price `dy/dx` equals `dydx`.
///
/// Searches `x` over `(0, D/2]`, the branch on which the spot price
/// decreases from `+∞` to `1`, so only targets `dydx ≥ 1` are reachable.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] for invalid amplification.
/// - [`SimError::BisectionFailure`] if `dydx` is below `1` or the search
///   does not settle.
pub fn xy_from_dydx(amplification: f64, d: f64, dydx: f64) -> Result<(f64, f64)> {
    let c = InvariantConstants::two_asset(amplification)?;

    bin_search_desc(
        0.0,
        d / 2.0,
        BISECTION_EPSILON,
        |x| dydx_y_from_x(&c, d, x),
        dydx,
    )
}
