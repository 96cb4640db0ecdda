//! Invariant queries and swaps.
//!
//! [`SwapPool`] layers the StableSwap invariant over [`PoolState`]:
//!
//! 1. **Scale**: [`SwapPool::x`] converts raw balances to invariant units.
//! 2. **Solve**: [`SwapPool::d`] and [`SwapPool::y_d`] evaluate the
//!    invariant and its implied balances.
//! 3. **Quote**: [`SwapPool::dy`] prices a swap without touching state.
//! 4. **Execute**: [`SwapPool::exchange`] applies a quoted swap.
//!
//! # Fee accounting
//!
//! The fee is charged on the output side:
//!
//! ```text
//! dy_no_fee = balances[j] − y(i, j, balances[i] + dx)
//! fee       = dy_no_fee · fee_rate
//! dy        = dy_no_fee − fee
//! balances[i] += dx
//! balances[j] −= dy + fee · admin_fee
//! ```
//!
//! so the share `fee · (1 − admin_fee)` stays in the pool and accrues to
//! liquidity providers.

use tracing::trace;

use super::PoolState;
use crate::domain::SwapQuote;
use crate::error::{Result, SimError};
use crate::math::{compute_d, compute_y_d, ensure_len, finite, set, zip_mul};

/// Checks that `i` addresses one of `n` assets.
pub(crate) fn asset_index(n: usize, i: usize) -> Result<usize> {
    if i < n {
        Ok(i)
    } else {
        Err(SimError::InvalidArgument("asset index out of range"))
    }
}

/// Checks that `i` and `j` are distinct assets of an `n`-asset pool.
pub(crate) fn asset_pair(n: usize, i: usize, j: usize) -> Result<(usize, usize)> {
    if i == j {
        return Err(SimError::InvalidArgument("cannot swap an asset for itself"));
    }
    Ok((asset_index(n, i)?, asset_index(n, j)?))
}

/// StableSwap invariant math and swaps over a [`PoolState`].
///
/// Every method has a default implementation; implementors only provide
/// [`PoolState`].
pub trait SwapPool: PoolState {
    /// Rate-adjusted balances `X = balances · rates`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `balances` has the wrong length.
    /// - Any error from [`PoolState::rates`].
    fn x(&self, balances: &[f64]) -> Result<Vec<f64>> {
        ensure_len(balances, self.params().n(), "balances must have one entry per asset")?;
        zip_mul(balances, &self.rates()?)
    }

    /// Invariant `D` of the current balances.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::d_of`].
    fn d(&self) -> Result<f64> {
        self.d_of(self.balances())
    }

    /// Invariant `D` of arbitrary raw `balances` under this pool's rates.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] for a wrong length or a negative
    ///   balance.
    /// - [`SimError::ConvergenceFailure`] if Newton iteration fails.
    fn d_of(&self, balances: &[f64]) -> Result<f64> {
        compute_d(self.params().constants(), &self.x(balances)?)
    }

    /// Raw balance of asset `i` that satisfies the invariant at `d` given
    /// the other entries of `balances`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `i` is out of range.
    /// - [`SimError::ConvergenceFailure`] if Newton iteration fails.
    fn y_d(&self, i: usize, d: f64, balances: &[f64]) -> Result<f64> {
        let i = asset_index(self.params().n(), i)?;
        let x = self.x(balances)?;
        let y = compute_y_d(self.params().constants(), i, d, &x)?;
        let rates = self.rates()?;
        finite(y / rates[i], "implied balance")
    }

    /// Raw balance of asset `j` after asset `i` is set to `x_i`, holding
    /// the current `D` fixed.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::y_d`].
    fn y(&self, i: usize, j: usize, x_i: f64) -> Result<f64> {
        let (i, j) = asset_pair(self.params().n(), i, j)?;
        let moved = set(self.balances(), i, x_i)?;
        self.y_d(j, self.d()?, &moved)
    }

    /// Quotes a swap of `dx` units of asset `i` for asset `j`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `dx` is negative or not finite,
    ///   or the indices are invalid.
    /// - Any solver error from [`SwapPool::y`].
    fn dy(&self, i: usize, j: usize, dx: f64) -> Result<SwapQuote> {
        if !(dx.is_finite() && dx >= 0.0) {
            return Err(SimError::InvalidArgument("swap amount must be non-negative"));
        }
        let (i, j) = asset_pair(self.params().n(), i, j)?;
        let balances = self.balances();

        let dy_no_fee = balances[j] - self.y(i, j, balances[i] + dx)?;
        let fee = dy_no_fee * self.params().fee().get();

        Ok(SwapQuote::new(dy_no_fee - fee, fee))
    }

    /// Swaps `dx` units of asset `i` for asset `j`, returning the amount
    /// received.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::dy`]; the pool is unchanged on error.
    fn exchange(&mut self, i: usize, j: usize, dx: f64) -> Result<f64> {
        let quote = self.dy(i, j, dx)?;

        let mut balances = self.balances().to_vec();
        balances[i] += dx;
        balances[j] -= quote.balance_debit(self.params().admin_fee().get());

        trace!(i, j, dx, dy = quote.dy(), fee = quote.fee(), "exchange");
        let supply = self.total_supply();
        self.commit(balances, supply);

        Ok(quote.dy())
    }

    /// LP share price `D / total_supply`.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidResult`] if the supply is zero.
    /// - Any solver error from [`SwapPool::d`].
    fn virtual_price(&self) -> Result<f64> {
        finite(self.d()? / self.total_supply(), "virtual price")
    }
}
