//! The chicken-bond ledger interface.
//!
//! [`ChickenBonds`] is implemented by the pure reference model
//! ([`SimpleModel`](crate::bonds::SimpleModel)) and by the share-based
//! [`VaultBasedImplementation`](crate::bonds::VaultBasedImplementation).
//! The [`Versus`](crate::bonds::Versus) harness drives any implementation
//! in lockstep with the model, so an adapter over an external system only
//! has to implement this trait to be cross-checked.

use crate::bonds::BondsState;
use crate::error::Result;

/// Seven ledger operations plus a state snapshot.
///
/// Amounts named `amount` in the shift, bond and chicken operations must
/// be positive and finite.  Harvest amounts may be negative (a loss) but
/// not larger in magnitude than the bucket's owned funds.
///
/// # Errors
///
/// Every operation returns
/// [`SimError::InvalidArgument`](crate::error::SimError::InvalidArgument)
/// for an out-of-domain argument and
/// [`SimError::InfeasibleOperation`](crate::error::SimError::InfeasibleOperation)
/// when the ledger cannot carry it out.  Implementations leave their
/// state untouched on error.
pub trait ChickenBonds {
    /// Bonds `amount` into bucket `A` as pending funds.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn create_bond(&mut self, amount: f64) -> Result<()>;

    /// Returns `amount` of pending funds to their bonders.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn chicken_out(&mut self, amount: f64) -> Result<()>;

    /// Converts `amount` of pending funds into protocol-owned funds, of
    /// which `accrued_fraction` becomes acquired and the rest permanent.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn chicken_in(&mut self, amount: f64, accrued_fraction: f64) -> Result<()>;

    /// Books a yield of `amount` (negative for a loss) on bucket `A`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn harvest_a(&mut self, amount: f64) -> Result<()>;

    /// Books a yield of `amount` (negative for a loss) on bucket `B`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn harvest_b(&mut self, amount: f64) -> Result<()>;

    /// Moves `amount` of owned funds from bucket `A` to bucket `B`,
    /// keeping the acquired to permanent ratio of what is moved.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn shift_a2b(&mut self, amount: f64) -> Result<()>;

    /// Moves `amount` of owned funds from bucket `B` to bucket `A`,
    /// keeping the acquired to permanent ratio of what is moved.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn shift_b2a(&mut self, amount: f64) -> Result<()>;

    /// Current ledger state.
    fn state(&self) -> BondsState;
}
