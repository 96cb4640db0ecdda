use super::{grid_price, sweep_with, Sheet};
use crate::config::SweepConfig;
use crate::error::Result;
use crate::math::{one_coin_withdrawal_that_sets_y_over_x, xy_from_dydx};
use crate::pools::StableSwapPool;
use crate::traits::{LiquidityPool, PoolState, SwapPool};

/// Return on a one-coin withdrawal that stops once the pool reaches the
/// wall price `cfg.wall` on the other side of the peg.
///
/// Like [`perfect_withdrawal`](super::perfect_withdrawal), but the burn is
/// sized so the pool ends at the balance ratio it has at `dy/dx = wall`,
/// and the grid starts at the wall instead of at the peg.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
/// if `cfg` does not validate.
pub fn walled_withdrawal(cfg: &SweepConfig) -> Result<Sheet> {
    let fee = cfg.fee.get();
    sweep_with(
        cfg,
        "Initial dx/dy",
        |i| grid_price(cfg.rows, i, cfg.wall, fee / 4.0),
        |params| {
            let (wall_x, wall_y) = xy_from_dydx(params.amplification(), cfg.invariant, cfg.wall)?;
            Ok(wall_y / wall_x)
        },
        |params, wall_ratio: &f64, dxdy| {
            let (y, x) = xy_from_dydx(params.amplification(), cfg.invariant, dxdy)?;
            let mut pool = StableSwapPool::new(*params, vec![x, y], vec![1.0, 1.0], None)?;
            let burn_fraction = one_coin_withdrawal_that_sets_y_over_x(params, *wall_ratio, x, y)?;
            let lp = burn_fraction * pool.total_supply();
            let value = lp * pool.virtual_price()?;
            let dx = pool.remove_liquidity_one_coin(lp, 0)?;
            Ok((dx - value) / value)
        },
    )
}
