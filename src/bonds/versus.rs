//! Model-based cross-validation of ledger implementations.
//!
//! [`Versus`] runs a sequence of [`BondCommand`]s against the reference
//! model and a [`ChickenBonds`] implementation in lockstep:
//!
//! 1. A command whose [`check`](BondCommand::check) fails in the model
//!    state is skipped.
//! 2. Otherwise the model state advances with
//!    [`run`](BondCommand::run) and the command is applied to the
//!    implementation.
//! 3. The implementation's [`state`](ChickenBonds::state) must then match
//!    the model field by field within the tolerance.
//!
//! The first disagreement, or an implementation rejecting a command the
//! model accepted, stops the run with [`SimError::Divergence`].

use tracing::{debug, warn};

use super::{BondCommand, BondsState};
use crate::error::{Result, SimError};
use crate::traits::ChickenBonds;

/// Default tolerance when comparing model and implementation states.
pub const LEDGER_TOLERANCE: f64 = 1e-9;

/// Lockstep runner of the reference model against an implementation.
#[derive(Debug, Clone)]
pub struct Versus<I> {
    model: BondsState,
    real: I,
    tolerance: f64,
    executed: usize,
    skipped: usize,
}

impl<I: ChickenBonds> Versus<I> {
    /// Pairs an empty model with `real`, which must start empty too.
    pub fn new(real: I) -> Self {
        Self {
            model: BondsState::default(),
            real,
            tolerance: LEDGER_TOLERANCE,
            executed: 0,
            skipped: 0,
        }
    }

    /// Replaces the comparison tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Current model state.
    pub const fn model(&self) -> &BondsState {
        &self.model
    }

    /// The implementation under test.
    pub const fn real(&self) -> &I {
        &self.real
    }

    /// Consumes the harness, returning the implementation.
    pub fn into_real(self) -> I {
        self.real
    }

    /// Commands run on both sides so far.
    pub const fn executed(&self) -> usize {
        self.executed
    }

    /// Commands skipped because their precondition failed.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Runs one command on both sides, returning `false` if it was
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Divergence`] if the implementation rejects the
    /// command or its state drifts from the model.
    pub fn step(&mut self, cmd: &BondCommand) -> Result<bool> {
        let step = self.executed + self.skipped;

        if !cmd.check(&self.model) {
            debug!(step, %cmd, "precondition fails, skipping");
            self.skipped += 1;
            return Ok(false);
        }

        self.model = cmd.run(&self.model);

        if let Err(err) = cmd.apply_to(&mut self.real) {
            warn!(step, %cmd, %err, "implementation rejected command");
            return Err(SimError::Divergence {
                step,
                command: cmd.to_string(),
                detail: format!("implementation rejected the command: {err}"),
            });
        }

        let observed = self.real.state();
        if let Some(detail) = self.model.mismatch(&observed, self.tolerance) {
            warn!(step, %cmd, model = %self.model, real = %observed, "state divergence");
            return Err(SimError::Divergence {
                step,
                command: cmd.to_string(),
                detail,
            });
        }

        debug!(step, %cmd, state = %observed, "states agree");
        self.executed += 1;
        Ok(true)
    }

    /// Runs every command in order, returning how many were executed.
    ///
    /// # Errors
    ///
    /// Stops at the first [`SimError::Divergence`].
    pub fn run<'a>(&mut self, cmds: impl IntoIterator<Item = &'a BondCommand>) -> Result<usize> {
        for cmd in cmds {
            self.step(cmd)?;
        }
        Ok(self.executed)
    }
}
