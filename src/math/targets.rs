//! Solvers that find the trade or liquidity change driving a two-asset
//! pool `[x, y]` to a target balance ratio `y / x`.
//!
//! | Solver | Unknown | Method |
//! |--------|---------|--------|
//! | [`dx_that_sets_y_over_x`] | swap input `dx` of asset 0 | Newton on the post-swap ratio |
//! | [`one_coin_deposit_that_sets_y_over_x`] | deposit `dx` of asset 0 | bisection on `add_liquidity` accounting |
//! | [`one_coin_withdrawal_that_sets_y_over_x`] | burn fraction of LP supply | bisection on one-coin withdrawal accounting |
//!
//! The swap solver models fees as the flat leakage
//! `r = fee · (1 − admin_fee)` on the output side.  The single-sided
//! solvers evaluate the actual imbalance-fee accounting as a black box,
//! so their results reflect real deposit and withdrawal fees.

use super::checked::{approx_positive, clamped};
use super::invariant::{compute_d, dydx_y_from_x, other_side, InvariantConstants};
use super::solver::{bin_search_desc, try_converge, BISECTION_EPSILON};
use crate::domain::PoolParams;
use crate::error::{Result, SimError};

fn two_asset(params: &PoolParams) -> Result<&InvariantConstants> {
    let c = params.constants();
    if c.n() == 2 {
        Ok(c)
    } else {
        Err(SimError::InvalidArgument("ratio targeting requires a two-asset pool"))
    }
}

/// Finds the input `dx` such that `exchange(0, 1, dx)` on a two-asset
/// pool `[x, y]` leaves balances with `y' / x' = target_y_over_x`.
///
/// The pool must currently satisfy `target · x <= y`: swapping asset 0 in
/// can only lower the ratio.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the pool is not two-asset or the
///   target exceeds the current ratio.
/// - [`SimError::ConvergenceFailure`] if Newton iteration does not settle.
/// - [`SimError::InfeasibleOperation`] if the solved `dx` is negative.
pub fn dx_that_sets_y_over_x(
    params: &PoolParams,
    target_y_over_x: f64,
    x: f64,
    y: f64,
) -> Result<f64> {
    let c = two_asset(params)?;
    if target_y_over_x.is_nan() || target_y_over_x * x > y {
        return Err(SimError::InvalidArgument(
            "target ratio must not exceed current y / x",
        ));
    }

    let r = params.fee_leakage();
    let r1 = 1.0 - r;
    let ry = r * y;
    let d0 = compute_d(c, &[x, y])?;

    // y after the swap is r1·y_(x_) + r·y; solve r1·y_ + ry = target·x_.
    let x_ = try_converge(d0, |x_| {
        let (dydx, y_) = dydx_y_from_x(c, d0, x_)?;
        Ok(x_ - (r1 * y_ + ry - target_y_over_x * x_) / (r1 * -dydx - target_y_over_x))
    })?;

    let dx = x_ - x;
    if !approx_positive(dx) {
        return Err(SimError::InfeasibleOperation("target ratio is unreachable"));
    }

    Ok(clamped(dx))
}

/// Swap input that brings a two-asset pool to `x ≈ y`.
///
/// # Errors
///
/// See [`dx_that_sets_y_over_x`].
pub fn balancing_dx(params: &PoolParams, x: f64, y: f64) -> Result<f64> {
    dx_that_sets_y_over_x(params, 1.0, x, y)
}

/// Swap input that makes asset 0 hold the fraction
/// `target_x_over_x_plus_y` of the pool.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the fraction is not in `(0, 1]`.
/// - See [`dx_that_sets_y_over_x`].
pub fn dx_that_splits_pool(
    params: &PoolParams,
    target_x_over_x_plus_y: f64,
    x: f64,
    y: f64,
) -> Result<f64> {
    if target_x_over_x_plus_y == 0.0 || !(0.0..=1.0).contains(&target_x_over_x_plus_y) {
        return Err(SimError::InvalidArgument("pool split must be within (0, 1]"));
    }
    let target = (1.0 - target_x_over_x_plus_y) / target_x_over_x_plus_y;
    dx_that_sets_y_over_x(params, target, x, y)
}

/// Balances `[x', y']` left in the pool after a single-sided deposit of
/// `dx` into asset 0, net of the admin share of the imbalance fee.
fn xy_after_deposit(
    params: &PoolParams,
    x: f64,
    y: f64,
) -> Result<impl Fn(f64) -> Result<(f64, f64)> + '_> {
    let c = two_asset(params)?;
    let d0 = compute_d(c, &[x, y])?;
    let retained = params.base_fee() * params.admin_fee().get();

    Ok(move |dx: f64| {
        let (x1, y1) = (x + dx, y);
        let d1 = compute_d(c, &[x1, y1])?;
        let ratio = d1 / d0;
        let fee_x = (x1 - x * ratio).abs() * retained;
        let fee_y = (y1 - y * ratio).abs() * retained;
        Ok((x1 - fee_x, y1 - fee_y))
    })
}

/// Finds the single-sided deposit `dx` of asset 0 into a two-asset pool
/// `[x, y]` after which `y' / x' = target_y_over_x`.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the target exceeds the current
///   ratio or the pool is not two-asset.
/// - [`SimError::BisectionFailure`] if the search does not settle.
pub fn one_coin_deposit_that_sets_y_over_x(
    params: &PoolParams,
    target_y_over_x: f64,
    x: f64,
    y: f64,
) -> Result<f64> {
    let after = xy_after_deposit(params, x, y)?;
    let max = 2.0 * (y / target_y_over_x - x);

    let (dx, ()) = bin_search_desc(
        0.0,
        max,
        BISECTION_EPSILON,
        |dx| {
            let (x1, y1) = after(dx)?;
            Ok((y1 / x1, ()))
        },
        target_y_over_x,
    )?;

    Ok(dx)
}

/// Single-sided deposit into asset 0 that brings the pool to `x ≈ y`.
///
/// # Errors
///
/// See [`one_coin_deposit_that_sets_y_over_x`].
pub fn balancing_one_coin_deposit(params: &PoolParams, x: f64, y: f64) -> Result<f64> {
    one_coin_deposit_that_sets_y_over_x(params, 1.0, x, y)
}

/// Balance of asset 0 left in the pool `[x, y]` after burning
/// `burn_fraction` of the LP supply for asset 0 alone.
fn x_after_one_coin_withdrawal(
    params: &PoolParams,
    x: f64,
    y: f64,
) -> Result<impl Fn(f64) -> Result<f64> + '_> {
    let c = two_asset(params)?;
    let d0 = compute_d(c, &[x, y])?;
    let base_fee = params.base_fee();
    let admin_fee = params.admin_fee().get();

    Ok(move |burn_fraction: f64| {
        let d1 = d0 * (1.0 - burn_fraction);
        let ratio = d1 / d0;
        let x1 = other_side(c, d1, y)?;

        let xr = x - base_fee * (x * ratio - x1);
        let yr = y + base_fee * (y * ratio - y);

        let dx = xr - other_side(c, d1, yr)?;
        Ok(x1 * admin_fee + (x - dx) * (1.0 - admin_fee))
    })
}

/// Finds the fraction of the LP supply to burn for asset 0 of a
/// two-asset pool `[x, y]` so that afterwards `y' / x' = target_y_over_x`.
///
/// The result is a fraction in `[0, 1]`; multiply by the total supply to
/// get the LP amount.
///
/// # Errors
///
/// - [`SimError::InvalidArgument`] if the pool is not two-asset.
/// - [`SimError::BisectionFailure`] if the target ratio cannot be reached
///   by withdrawing asset 0.
pub fn one_coin_withdrawal_that_sets_y_over_x(
    params: &PoolParams,
    target_y_over_x: f64,
    x: f64,
    y: f64,
) -> Result<f64> {
    let after = x_after_one_coin_withdrawal(params, x, y)?;

    let (burn_fraction, ()) = bin_search_desc(
        0.0,
        1.0,
        BISECTION_EPSILON,
        |burn_fraction| Ok((after(burn_fraction)? / y, ())),
        1.0 / target_y_over_x,
    )?;

    Ok(burn_fraction)
}

/// Burn fraction for a one-coin withdrawal of asset 0 that brings the
/// pool to `x ≈ y`.
///
/// # Errors
///
/// See [`one_coin_withdrawal_that_sets_y_over_x`].
pub fn balancing_one_coin_withdrawal(params: &PoolParams, x: f64, y: f64) -> Result<f64> {
    one_coin_withdrawal_that_sets_y_over_x(params, 1.0, x, y)
}
