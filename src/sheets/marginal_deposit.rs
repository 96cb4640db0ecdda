use super::{grid_price, sweep, Sheet};
use crate::config::SweepConfig;
use crate::error::Result;
use crate::math::xy_from_dydx;
use crate::pools::StableSwapPool;
use crate::traits::{LiquidityPool, SwapPool};

/// Relative profit of depositing `cfg.dx` of asset 0 alone into a pool
/// whose spot price `dy/dx` is the grid price.
///
/// Each cell is `(lp · virtual_price − dx) / dx`, measured right after the
/// deposit.  Use a large `cfg.invariant` so the deposit is marginal.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
/// if `cfg` does not validate.
pub fn marginal_deposit(cfg: &SweepConfig) -> Result<Sheet> {
    let fee = cfg.fee.get();
    sweep(
        cfg,
        "dy/dx",
        |i| grid_price(cfg.rows, i, 1.0, fee / 40.0),
        |params, dydx| {
            let (x, y) = xy_from_dydx(params.amplification(), cfg.invariant, dydx)?;
            let mut pool = StableSwapPool::new(*params, vec![x, y], vec![1.0, 1.0], None)?;
            let lp = pool.add_liquidity(&[cfg.dx, 0.0])?;
            let value = lp * pool.virtual_price()?;
            Ok((value - cfg.dx) / cfg.dx)
        },
    )
}
