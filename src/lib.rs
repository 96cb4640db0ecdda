//! # Sand Buckets
//!
//! Off-chain StableSwap invariant engine and chicken-bond ledger model.
//!
//! This crate simulates Curve-style StableSwap pools in `f64` and models
//! the fund flows of a chicken-bond protocol:
//!
//! - **StableSwap pools** with swaps, balanced and imbalanced deposits,
//!   proportional, imbalanced and single-sided withdrawals, admin fees and
//!   virtual price
//! - **Meta pools** pairing an asset with a base pool's LP token, routing
//!   swaps between the underlying assets (`meta-pool` feature)
//! - **Target solvers** finding the swap, deposit or withdrawal that moves
//!   a two-asset pool to a given balance ratio or spot price
//! - **Chicken-bond ledger**: a pure reference model, a vault-based
//!   implementation and a harness that runs them in lockstep (`bonds`
//!   feature)
//! - **Sweeps** tabulating single-sided liquidity economics over price and
//!   amplification grids (`sheets` feature)
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `meta-pool` | yes | [`StableSwapMetaPool`](pools::StableSwapMetaPool) and meta pool configs |
//! | `bonds` | yes | chicken-bond ledger, vault implementation, versus harness |
//! | `sheets` | yes | price-grid sweeps with CSV output |
//! | `arbitrary` | no | `proptest` strategies for ledger commands |
//!
//! # Quick Start
//!
//! ## Create a pool and execute a swap
//!
//! ```rust
//! use sand_buckets::config::{PoolConfig, StableSwapConfig};
//! use sand_buckets::domain::FeeRate;
//! use sand_buckets::factory::DefaultPoolFactory;
//! use sand_buckets::traits::{LiquidityPool, PoolState, SwapPool};
//!
//! // 1. Describe a two-asset pool at A = 100 with a 4 bp fee
//! let config = PoolConfig::StableSwap(
//!     StableSwapConfig::new(2, 100.0)
//!         .expect("valid parameters")
//!         .with_fee(FeeRate::LUSD_3CRV_SWAP)
//!         .with_admin_fee(FeeRate::HALF)
//!         .with_balances(vec![1_000.0, 1_000.0]),
//! );
//!
//! // 2. Create the pool via the factory
//! let mut pool = DefaultPoolFactory::create(&config).expect("pool created");
//! assert!((pool.virtual_price().expect("price") - 1.0).abs() < 1e-12);
//!
//! // 3. Swap 10 of asset 0 for asset 1
//! let dy = pool.exchange(0, 1, 10.0).expect("swap succeeded");
//! assert!(dy > 9.9 && dy < 10.0);
//! assert_eq!(pool.balances()[0], 1_010.0);
//!
//! // 4. Withdraw a tenth of the LP supply as asset 1
//! let burn = pool.total_supply() / 10.0;
//! let out = pool.remove_liquidity_one_coin(burn, 1).expect("withdrawal");
//! assert!(out > 0.0);
//! ```
//!
//! ## Cross-check a ledger implementation
//!
//! ```rust
//! # #[cfg(feature = "bonds")]
//! # {
//! use sand_buckets::bonds::{BondCommand, VaultBasedImplementation, Versus};
//!
//! let mut versus = Versus::new(VaultBasedImplementation::new());
//! versus
//!     .run(&[
//!         BondCommand::CreateBond(100.0),
//!         BondCommand::ChickenIn { amount: 40.0, accrued_fraction: 0.5 },
//!         BondCommand::HarvestA(10.0),
//!     ])
//!     .expect("model and implementation agree");
//! assert!((versus.model().acquired_a - 30.0).abs() < 1e-9);
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Consumer   │  uses PoolConfig + DefaultPoolFactory
//! └──────┬──────┘
//!        │ create(&config)
//!        ▼
//! ┌─────────────┐
//! │   Factory   │  validates config, dispatches to FromConfig
//! └──────┬──────┘
//!        │ PoolBox (enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │    Pools    │  StableSwapPool, StableSwapMetaPool
//! └──────┬──────┘
//!        │ PoolState + SwapPool + LiquidityPool traits
//!        ▼
//! ┌─────────────┐
//! │    Math     │  D, y_D, spot price, target solvers, converge, bisection
//! └─────────────┘
//! ```
//!
//! The ledger side is independent of the pools:
//!
//! ```text
//! BondCommand ──run──▶ BondsState (model)
//!      │                     ▲
//!      └─apply_to──▶ ChickenBonds impl ──state()──┘  compared by Versus
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Validated value types: [`FeeRate`](domain::FeeRate), [`PoolParams`](domain::PoolParams), quotes |
//! | [`traits`] | Core abstractions: [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | Declarative blueprints: [`PoolConfig`](config::PoolConfig), [`SweepConfig`](config::SweepConfig) |
//! | [`pools`]  | Pool implementations and [`PoolBox`](pools::PoolBox) dispatch enum |
//! | [`factory`] | [`DefaultPoolFactory`](factory::DefaultPoolFactory) for config-driven pool construction |
//! | [`math`]   | Vector helpers, solvers, invariant math, target solvers |
//! | `bonds`    | Chicken-bond ledger model, vault implementation, versus harness |
//! | `sheets`   | Price-grid sweeps |
//! | [`error`]  | [`SimError`](error::SimError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;

#[cfg(feature = "bonds")]
pub mod bonds;
#[cfg(feature = "sheets")]
pub mod sheets;
