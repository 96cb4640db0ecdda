//! Chicken-bond ledger: reference model, vault implementation and the
//! harness that checks one against the other.
//!
//! | Item | Role |
//! |------|------|
//! | [`BondsState`] | the five observable ledger quantities |
//! | [`BondCommand`] | one operation: argument validation, precondition, pure transition |
//! | [`SimpleModel`] | the ledger as plain bookkeeping over [`BondsState`] |
//! | [`VaultBasedImplementation`] | the ledger on top of two share-issuing [`Vault`]s |
//! | [`Versus`] | runs commands on the model and an implementation in lockstep |
//!
//! # Example
//!
//! ```rust
//! use sand_buckets::bonds::{BondCommand, VaultBasedImplementation, Versus};
//!
//! let cmds = [
//!     BondCommand::CreateBond(50.0),
//!     BondCommand::CreateBond(50.0),
//!     BondCommand::ChickenIn { amount: 50.0, accrued_fraction: 0.8 },
//!     BondCommand::ShiftA2B(50.0),
//! ];
//!
//! let mut versus = Versus::new(VaultBasedImplementation::new());
//! assert_eq!(versus.run(&cmds), Ok(4));
//! assert!((versus.model().acquired_b - 40.0).abs() < 1e-9);
//! assert!((versus.model().permanent_b - 10.0).abs() < 1e-9);
//! ```

mod command;
mod model;
mod state;
mod vault;
mod versus;

#[cfg(any(test, feature = "arbitrary"))]
pub mod strategy;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use command::BondCommand;
pub use model::SimpleModel;
pub use state::BondsState;
pub use vault::{Vault, VaultBasedImplementation};
pub use versus::{Versus, LEDGER_TOLERANCE};
