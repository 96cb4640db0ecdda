//! Deposits and withdrawals.
//!
//! [`LiquidityPool`] covers every way LP tokens are minted or burned:
//!
//! | Operation | Fee |
//! |-----------|-----|
//! | [`add_liquidity`](LiquidityPool::add_liquidity) | imbalance fee (none for the first deposit) |
//! | [`remove_liquidity`](LiquidityPool::remove_liquidity) | none, proportional |
//! | [`remove_liquidity_imbalance`](LiquidityPool::remove_liquidity_imbalance) | imbalance fee |
//! | [`remove_liquidity_one_coin`](LiquidityPool::remove_liquidity_one_coin) | imbalance fee |
//!
//! # Imbalance fee
//!
//! Moving the pool from `balances` to `new_balances` changes the invariant
//! from `D0` to `D1`.  Each asset pays
//!
//! ```text
//! fee_i = base_fee · |new_balances[i] − balances[i] · D1 / D0|
//! ```
//!
//! on its distance from the proportional ("ideal") balance.  The LP
//! amount minted or burned is priced at the invariant `D2` of the balances
//! net of fees, and the admin share of every fee is removed from the
//! stored balances.

use tracing::trace;

use super::swap_pool::asset_index;
use super::SwapPool;
use crate::domain::{LiquidityQuote, SwapQuote};
use crate::error::{Result, SimError};
use crate::math::{
    all_non_negative, approx_positive, clamped, ensure_len, finite, map_mul, positive, zip_add,
    zip_sub,
};

const IMPOSSIBLE_DEPOSIT: SimError = SimError::InfeasibleOperation("impossible deposit");
const IMPOSSIBLE_WITHDRAWAL: SimError = SimError::InfeasibleOperation("impossible withdrawal");
const IMPOSSIBLE_CHANGE: SimError = SimError::InfeasibleOperation("impossible liquidity change");

/// Checks that `burn` is a valid LP amount against `supply`.
fn burnable(burn: f64, supply: f64) -> Result<f64> {
    if !(burn.is_finite() && burn >= 0.0) {
        return Err(SimError::InvalidArgument("burn must be non-negative"));
    }
    if burn > supply {
        return Err(SimError::InvalidArgument("burn exceeds total supply"));
    }
    if supply <= 0.0 {
        return Err(SimError::InvalidArgument("pool has no LP supply"));
    }
    Ok(burn)
}

/// LP token accounting over a [`SwapPool`].
///
/// Every method has a default implementation.
pub trait LiquidityPool: SwapPool {
    /// Fee-less estimate of the LP tokens minted by depositing `amounts`
    /// (`is_deposit`) or burned by withdrawing them.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if an amount is negative, the length
    ///   is wrong, or a withdrawal would drive a balance negative.
    /// - Any solver error.
    fn calc_token_amount(&self, amounts: &[f64], is_deposit: bool) -> Result<f64> {
        ensure_len(amounts, self.params().n(), "amounts must have one entry per asset")?;
        all_non_negative(amounts, "amounts must be non-negative")?;

        let new_balances = if is_deposit {
            zip_add(self.balances(), amounts)?
        } else {
            zip_sub(self.balances(), amounts)?
        };

        let d0 = self.d()?;
        let d1 = self.d_of(&new_balances)?;
        let mint_burn = finite(self.total_supply() * (d1 / d0 - 1.0), "token amount")?;

        Ok(if is_deposit { mint_burn } else { -mint_burn })
    }

    /// Quotes moving the pool to `new_balances`, charging imbalance fees.
    ///
    /// # Errors
    ///
    /// - [`SimError::InfeasibleOperation`] (`"impossible liquidity change"`)
    ///   if any balance would not stay positive after fees.
    /// - [`SimError::InvalidArgument`] for a wrong length.
    /// - Any solver error.
    fn calc_token_amount_with_fees(&self, new_balances: &[f64]) -> Result<LiquidityQuote> {
        ensure_len(new_balances, self.params().n(), "balances must have one entry per asset")?;
        if !new_balances.iter().copied().all(positive) {
            return Err(IMPOSSIBLE_CHANGE);
        }

        let base_fee = self.params().base_fee();
        let d0 = self.d()?;
        let d1 = self.d_of(new_balances)?;
        let ratio = d1 / d0;

        let fees: Vec<f64> = new_balances
            .iter()
            .zip(self.balances())
            .map(|(&new, &old)| (new - old * ratio).abs() * base_fee)
            .collect();

        let after_fees = zip_sub(new_balances, &fees)?;
        if !after_fees.iter().copied().all(positive) {
            return Err(IMPOSSIBLE_CHANGE);
        }

        let d2 = self.d_of(&after_fees)?;
        let mint_burn = finite(self.total_supply() * (d2 / d0 - 1.0), "liquidity change")?;

        Ok(LiquidityQuote::new(mint_burn, fees))
    }

    /// Deposits `amounts`, returning the LP tokens minted.
    ///
    /// The first deposit into an empty pool must include every asset and
    /// mints `D(amounts · rates)` without fees.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] for negative amounts, a wrong
    ///   length, or a first deposit missing an asset.
    /// - [`SimError::InfeasibleOperation`] (`"impossible deposit"` or
    ///   `"impossible liquidity change"`) if the deposit would lower `D`
    ///   or drive a balance non-positive after fees.
    fn add_liquidity(&mut self, amounts: &[f64]) -> Result<f64> {
        ensure_len(amounts, self.params().n(), "amounts must have one entry per asset")?;
        all_non_negative(amounts, "amounts must be non-negative")?;
        let new_balances = zip_add(self.balances(), amounts)?;

        if self.total_supply() == 0.0 {
            if !amounts.iter().copied().all(positive) {
                return Err(SimError::InvalidArgument(
                    "first deposit must include every asset",
                ));
            }
            let mint = self.d_of(&new_balances)?;
            trace!(mint, "initial deposit");
            self.commit(new_balances, mint);
            return Ok(mint);
        }

        let (mint, fees) = self.calc_token_amount_with_fees(&new_balances)?.into_parts();
        if !approx_positive(mint) {
            return Err(IMPOSSIBLE_DEPOSIT);
        }
        let mint = clamped(mint);

        let admin_fee = self.params().admin_fee().get();
        let stored = zip_sub(&new_balances, &map_mul(&fees, admin_fee))?;

        trace!(mint, ?fees, "add_liquidity");
        let supply = self.total_supply() + mint;
        self.commit(stored, supply);

        Ok(mint)
    }

    /// Withdraws exactly `amounts`, returning the LP tokens burned.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] for negative amounts or a wrong
    ///   length.
    /// - [`SimError::InfeasibleOperation`] (`"impossible withdrawal"` or
    ///   `"impossible liquidity change"`) if the withdrawal would raise
    ///   `D`, burn more than the supply, or empty an asset.
    fn remove_liquidity_imbalance(&mut self, amounts: &[f64]) -> Result<f64> {
        ensure_len(amounts, self.params().n(), "amounts must have one entry per asset")?;
        all_non_negative(amounts, "amounts must be non-negative")?;
        let new_balances = zip_sub(self.balances(), amounts)?;

        let (mint_burn, fees) = self.calc_token_amount_with_fees(&new_balances)?.into_parts();
        if !approx_positive(-mint_burn) {
            return Err(IMPOSSIBLE_WITHDRAWAL);
        }
        let burn = clamped(-mint_burn);
        if burn > self.total_supply() {
            return Err(IMPOSSIBLE_WITHDRAWAL);
        }

        let admin_fee = self.params().admin_fee().get();
        let stored = zip_sub(&new_balances, &map_mul(&fees, admin_fee))?;

        trace!(burn, ?fees, "remove_liquidity_imbalance");
        let supply = self.total_supply() - burn;
        self.commit(stored, supply);

        Ok(burn)
    }

    /// Burns `burn` LP tokens for a proportional share of every asset.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if `burn` is negative, exceeds
    /// the supply, or the pool has no supply.
    fn remove_liquidity(&mut self, burn: f64) -> Result<Vec<f64>> {
        let supply = self.total_supply();
        let burn = burnable(burn, supply)?;

        let amounts = map_mul(self.balances(), burn / supply);
        let remaining = zip_sub(self.balances(), &amounts)?;

        trace!(burn, ?amounts, "remove_liquidity");
        self.commit(remaining, supply - burn);

        Ok(amounts)
    }

    /// Quotes burning `burn` LP tokens for asset `i` alone.
    ///
    /// The returned [`SwapQuote::fee`] is the difference between the
    /// fee-free withdrawal and what the caller receives.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] for an invalid index or burn.
    /// - Any solver error.
    fn calc_withdraw_one_coin(&self, burn: f64, i: usize) -> Result<SwapQuote> {
        let i = asset_index(self.params().n(), i)?;
        let burn = burnable(burn, self.total_supply())?;

        let base_fee = self.params().base_fee();
        let balances = self.balances();
        let d0 = self.d()?;
        let d1 = d0 * (1.0 - burn / self.total_supply());
        let ratio = d1 / d0;
        let new_y = self.y_d(i, d1, balances)?;

        let reduced: Vec<f64> = balances
            .iter()
            .enumerate()
            .map(|(j, &old)| {
                let ideal_change = if j == i { old * ratio - new_y } else { old * (1.0 - ratio) };
                old - base_fee * ideal_change
            })
            .collect();

        let dy = reduced[i] - self.y_d(i, d1, &reduced)?;
        let dy_no_fee = balances[i] - new_y;

        Ok(SwapQuote::new(dy, dy_no_fee - dy))
    }

    /// Burns `burn` LP tokens for asset `i` alone, returning the amount
    /// received.
    ///
    /// # Errors
    ///
    /// - Same as [`LiquidityPool::calc_withdraw_one_coin`].
    /// - [`SimError::InfeasibleOperation`] (`"impossible withdrawal"`) if
    ///   the asset balance would go negative.
    fn remove_liquidity_one_coin(&mut self, burn: f64, i: usize) -> Result<f64> {
        let quote = self.calc_withdraw_one_coin(burn, i)?;

        let mut balances = self.balances().to_vec();
        let remaining = balances[i] - quote.balance_debit(self.params().admin_fee().get());
        if !approx_positive(remaining) {
            return Err(IMPOSSIBLE_WITHDRAWAL);
        }
        balances[i] = clamped(remaining);

        trace!(burn, i, dy = quote.dy(), fee = quote.fee(), "remove_liquidity_one_coin");
        let supply = self.total_supply() - burn;
        self.commit(balances, supply);

        Ok(quote.dy())
    }
}
