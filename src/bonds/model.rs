//! Reference model of the chicken-bond ledger.

use tracing::trace;

use super::{BondCommand, BondsState};
use crate::error::Result;
use crate::traits::ChickenBonds;

/// The ledger as plain bookkeeping over [`BondsState`].
///
/// Every operation is a [`BondCommand`]: it is validated and checked
/// against the current state, then [`run`](BondCommand::run) to produce
/// the next state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimpleModel {
    state: BondsState,
}

impl SimpleModel {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger starting from `state`.
    #[must_use]
    pub const fn from_state(state: BondsState) -> Self {
        Self { state }
    }

    /// Validates and runs `cmd`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`BondCommand::validate`] or
    /// [`BondCommand::precondition`]; the state is unchanged on error.
    pub fn execute(&mut self, cmd: BondCommand) -> Result<()> {
        cmd.validate()?;
        cmd.precondition(&self.state)?;
        self.state = cmd.run(&self.state);
        trace!(%cmd, state = %self.state, "model step");
        Ok(())
    }
}

impl ChickenBonds for SimpleModel {
    fn create_bond(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::CreateBond(amount))
    }

    fn chicken_out(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::ChickenOut(amount))
    }

    fn chicken_in(&mut self, amount: f64, accrued_fraction: f64) -> Result<()> {
        self.execute(BondCommand::ChickenIn {
            amount,
            accrued_fraction,
        })
    }

    fn harvest_a(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::HarvestA(amount))
    }

    fn harvest_b(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::HarvestB(amount))
    }

    fn shift_a2b(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::ShiftA2B(amount))
    }

    fn shift_b2a(&mut self, amount: f64) -> Result<()> {
        self.execute(BondCommand::ShiftB2A(amount))
    }

    fn state(&self) -> BondsState {
        self.state
    }
}
