//! Pure ledger commands.
//!
//! A [`BondCommand`] is one of the seven ledger operations together with
//! its arguments.  It can:
//!
//! - [`check`](BondCommand::check) whether it may run in a given state,
//! - [`run`](BondCommand::run) against a [`BondsState`] to produce the
//!   next state of the reference model, and
//! - [`apply_to`](BondCommand::apply_to) any [`ChickenBonds`]
//!   implementation.
//!
//! Commands display the way they are written in scenarios:
//! `createBond(50)`, `chickenIn(50, 0.8)`, `shiftA2B(25)`.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::BondsState;
use crate::error::{Result, SimError};
use crate::traits::ChickenBonds;

pub(crate) const EXCEEDS_PENDING: SimError =
    SimError::InfeasibleOperation("amount exceeds pending bonds");
pub(crate) const EMPTY_BUCKET: SimError =
    SimError::InfeasibleOperation("cannot harvest an empty bucket");
pub(crate) const HARVEST_LOSS: SimError =
    SimError::InfeasibleOperation("harvest loss exceeds bucket");
pub(crate) const EXCEEDS_BUCKET: SimError =
    SimError::InfeasibleOperation("shift exceeds source bucket");

/// One ledger operation with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondCommand {
    /// `pending += amount`.
    CreateBond(f64),
    /// `pending -= amount`.
    ChickenOut(f64),
    /// Moves `amount` out of pending, splitting it between acquired and
    /// permanent funds of bucket `A`.
    ChickenIn {
        /// Pending funds converted.
        amount: f64,
        /// Share of `amount` that becomes acquired, in `[0, 1]`.
        accrued_fraction: f64,
    },
    /// `acquired_a += amount`; negative amounts are losses.
    HarvestA(f64),
    /// `acquired_b += amount`; negative amounts are losses.
    HarvestB(f64),
    /// Moves `amount` of owned funds from `A` to `B`.
    ShiftA2B(f64),
    /// Moves `amount` of owned funds from `B` to `A`.
    ShiftB2A(f64),
}

fn positive_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidArgument("amount must be positive and finite"))
    }
}

impl BondCommand {
    /// Checks the arguments, independent of any state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if an amount that must be
    /// positive is not, a harvest amount is not finite, or the accrued
    /// fraction lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::CreateBond(amount)
            | Self::ChickenOut(amount)
            | Self::ShiftA2B(amount)
            | Self::ShiftB2A(amount) => positive_amount(amount),
            Self::ChickenIn {
                amount,
                accrued_fraction,
            } => {
                positive_amount(amount)?;
                if (0.0..=1.0).contains(&accrued_fraction) {
                    Ok(())
                } else {
                    Err(SimError::InvalidArgument(
                        "accrued fraction must be within [0, 1]",
                    ))
                }
            }
            Self::HarvestA(amount) | Self::HarvestB(amount) => {
                if amount.is_finite() {
                    Ok(())
                } else {
                    Err(SimError::InvalidArgument("harvest amount must be finite"))
                }
            }
        }
    }

    /// Checks that the command may run in state `s`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InfeasibleOperation`] if the command would
    /// take out more than the ledger holds, or harvest an empty bucket.
    pub fn precondition(&self, s: &BondsState) -> Result<()> {
        match *self {
            Self::CreateBond(_) => Ok(()),
            Self::ChickenOut(amount) | Self::ChickenIn { amount, .. } => {
                if amount <= s.pending {
                    Ok(())
                } else {
                    Err(EXCEEDS_PENDING)
                }
            }
            Self::HarvestA(amount) => harvestable(amount, s.owned_a()),
            Self::HarvestB(amount) => harvestable(amount, s.owned_b()),
            Self::ShiftA2B(amount) => shiftable(amount, s.owned_a()),
            Self::ShiftB2A(amount) => shiftable(amount, s.owned_b()),
        }
    }

    /// `true` if the arguments are valid and the precondition holds in
    /// state `s`.
    #[must_use]
    pub fn check(&self, s: &BondsState) -> bool {
        self.validate().is_ok() && self.precondition(s).is_ok()
    }

    /// The state after running this command on `s`.
    ///
    /// Does not check anything; call [`check`](Self::check) first.
    #[must_use]
    pub fn run(&self, s: &BondsState) -> BondsState {
        match *self {
            Self::CreateBond(amount) => BondsState {
                pending: s.pending + amount,
                ..*s
            },
            Self::ChickenOut(amount) => BondsState {
                pending: s.pending - amount,
                ..*s
            },
            Self::ChickenIn {
                amount,
                accrued_fraction,
            } => BondsState {
                pending: s.pending - amount,
                acquired_a: s.acquired_a + amount * accrued_fraction,
                permanent_a: s.permanent_a + amount * (1.0 - accrued_fraction),
                ..*s
            },
            Self::HarvestA(amount) => BondsState {
                acquired_a: s.acquired_a + amount,
                ..*s
            },
            Self::HarvestB(amount) => BondsState {
                acquired_b: s.acquired_b + amount,
                ..*s
            },
            Self::ShiftA2B(amount) => {
                let f = amount / s.owned_a();
                BondsState {
                    acquired_a: s.acquired_a - s.acquired_a * f,
                    acquired_b: s.acquired_b + s.acquired_a * f,
                    permanent_a: s.permanent_a - s.permanent_a * f,
                    permanent_b: s.permanent_b + s.permanent_a * f,
                    ..*s
                }
            }
            Self::ShiftB2A(amount) => {
                let f = amount / s.owned_b();
                BondsState {
                    acquired_b: s.acquired_b - s.acquired_b * f,
                    acquired_a: s.acquired_a + s.acquired_b * f,
                    permanent_b: s.permanent_b - s.permanent_b * f,
                    permanent_a: s.permanent_a + s.permanent_b * f,
                    ..*s
                }
            }
        }
    }

    /// Runs this command against a ledger implementation.
    ///
    /// # Errors
    ///
    /// Propagates whatever the implementation returns.
    pub fn apply_to<C: ChickenBonds + ?Sized>(&self, target: &mut C) -> Result<()> {
        match *self {
            Self::CreateBond(amount) => target.create_bond(amount),
            Self::ChickenOut(amount) => target.chicken_out(amount),
            Self::ChickenIn {
                amount,
                accrued_fraction,
            } => target.chicken_in(amount, accrued_fraction),
            Self::HarvestA(amount) => target.harvest_a(amount),
            Self::HarvestB(amount) => target.harvest_b(amount),
            Self::ShiftA2B(amount) => target.shift_a2b(amount),
            Self::ShiftB2A(amount) => target.shift_b2a(amount),
        }
    }

    /// Operation name as used in scenario listings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateBond(_) => "createBond",
            Self::ChickenOut(_) => "chickenOut",
            Self::ChickenIn { .. } => "chickenIn",
            Self::HarvestA(_) => "harvestA",
            Self::HarvestB(_) => "harvestB",
            Self::ShiftA2B(_) => "shiftA2B",
            Self::ShiftB2A(_) => "shiftB2A",
        }
    }
}

fn harvestable(amount: f64, owned: f64) -> Result<()> {
    if owned <= 0.0 {
        Err(EMPTY_BUCKET)
    } else if amount < -owned {
        Err(HARVEST_LOSS)
    } else {
        Ok(())
    }
}

fn shiftable(amount: f64, owned: f64) -> Result<()> {
    if amount <= owned {
        Ok(())
    } else {
        Err(EXCEEDS_BUCKET)
    }
}

impl fmt::Display for BondCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ChickenIn {
                amount,
                accrued_fraction,
            } => write!(f, "{}({amount}, {accrued_fraction})", self.name()),
            Self::CreateBond(amount)
            | Self::ChickenOut(amount)
            | Self::HarvestA(amount)
            | Self::HarvestB(amount)
            | Self::ShiftA2B(amount)
            | Self::ShiftB2A(amount) => write!(f, "{}({amount})", self.name()),
        }
    }
}
