//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use sand_buckets::prelude::*;
//! ```
//!
//! This re-exports the domain types, core traits, configuration types,
//! error types, the factory, and (with their features) the ledger and
//! sweep entry points, so that consumers don't need to import from
//! individual submodules.

// Re-export domain types
pub use crate::domain::{FeeRate, LiquidityQuote, PoolParams, SwapQuote};

// Re-export core traits
pub use crate::traits::{FromConfig, LiquidityPool, PoolState, SwapPool};

// Re-export configuration
pub use crate::config::{MetaPoolConfig, PoolConfig, StableSwapConfig, SweepConfig};

// Re-export error types
pub use crate::error::{Result, SimError};

// Re-export factory
pub use crate::factory::DefaultPoolFactory;

// Re-export pools
#[cfg(feature = "meta-pool")]
pub use crate::pools::StableSwapMetaPool;
pub use crate::pools::{PoolBox, StableSwapPool};

// Re-export the chicken-bond ledger
#[cfg(feature = "bonds")]
pub use crate::bonds::{BondCommand, BondsState, SimpleModel, VaultBasedImplementation, Versus};
#[cfg(feature = "bonds")]
pub use crate::traits::ChickenBonds;

// Re-export sweeps
#[cfg(feature = "sheets")]
pub use crate::sheets::{marginal_deposit, perfect_withdrawal, walled_withdrawal, Sheet};
