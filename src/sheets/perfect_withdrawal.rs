use super::{grid_price, sweep, Sheet};
use crate::config::SweepConfig;
use crate::error::Result;
use crate::math::{balancing_one_coin_withdrawal, xy_from_dydx};
use crate::pools::StableSwapPool;
use crate::traits::{LiquidityPool, PoolState, SwapPool};

/// Return on the one-coin withdrawal that brings an unbalanced pool back
/// to `x = y`.
///
/// The pool holds more of asset 0, priced at the grid value `dx/dy`.
/// Each cell is `(dx − lp · virtual_price) / (lp · virtual_price)`, where
/// `lp` is the burn that balances the pool and `dx` is what it pays out.
///
/// # Errors
///
/// Returns [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
/// if `cfg` does not validate.
pub fn perfect_withdrawal(cfg: &SweepConfig) -> Result<Sheet> {
    let fee = cfg.fee.get();
    sweep(
        cfg,
        "Initial dx/dy",
        |i| grid_price(cfg.rows, i, 1.0, fee / 4.0),
        |params, dxdy| {
            let (y, x) = xy_from_dydx(params.amplification(), cfg.invariant, dxdy)?;
            let mut pool = StableSwapPool::new(*params, vec![x, y], vec![1.0, 1.0], None)?;
            let lp = balancing_one_coin_withdrawal(params, x, y)? * pool.total_supply();
            let value = lp * pool.virtual_price()?;
            let dx = pool.remove_liquidity_one_coin(lp, 0)?;
            Ok((dx - value) / value)
        },
    )
}
