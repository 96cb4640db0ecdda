//! State accessors shared by every pool.
//!
//! [`PoolState`] is the only trait a pool must implement by hand.  The
//! operations in [`SwapPool`](super::SwapPool) and
//! [`LiquidityPool`](super::LiquidityPool) are provided on top of it, so a
//! new pool flavour only decides where its balances live and how its
//! rates are priced.
//!
//! # Validate-then-commit
//!
//! Mutating operations compute the complete next state first and hand it
//! to [`PoolState::commit`] only after every check has passed.  A failed
//! call therefore never leaves a partially updated pool behind.

use std::borrow::Cow;

use crate::domain::PoolParams;
use crate::error::Result;

/// Raw state of a StableSwap pool.
pub trait PoolState {
    /// Immutable economic parameters.
    #[must_use]
    fn params(&self) -> &PoolParams;

    /// Raw (unscaled) balances, one per asset.
    #[must_use]
    fn balances(&self) -> &[f64];

    /// Per-asset rates converting raw balances to invariant units.
    ///
    /// Plain pools return their stored rates; meta pools price the base
    /// LP token live, which is why this can fail.
    ///
    /// # Errors
    ///
    /// Any error raised while pricing a derived rate.
    fn rates(&self) -> Result<Cow<'_, [f64]>>;

    /// Outstanding LP token supply.
    #[must_use]
    fn total_supply(&self) -> f64;

    /// Replaces the balances and LP supply in one step.
    ///
    /// Callers have already validated the new state.
    fn commit(&mut self, balances: Vec<f64>, total_supply: f64);
}
