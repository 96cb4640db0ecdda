//! Core trait abstractions for pool and ledger operations.
//!
//! A pool implements [`PoolState`] (where its balances live) and gets the
//! invariant math of [`SwapPool`] and the LP accounting of
//! [`LiquidityPool`] through default methods.  [`FromConfig`] covers
//! configuration-driven construction.  [`ChickenBonds`] is the ledger
//! interface shared by the bond model and its implementations.

#[cfg(feature = "bonds")]
mod chicken_bonds;
mod from_config;
mod liquidity_pool;
mod pool_state;
mod swap_pool;

#[cfg(feature = "bonds")]
pub use chicken_bonds::ChickenBonds;
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use pool_state::PoolState;
pub use swap_pool::SwapPool;
