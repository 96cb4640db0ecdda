//! `proptest` strategies generating ledger commands.
//!
//! Available to downstream crates with the `arbitrary` feature, so an
//! adapter over another ledger can be fuzzed with the same command mix
//! through [`Versus`](super::Versus).

use proptest::prelude::*;

use super::BondCommand;

/// Amounts for bonds, chicken-outs, chicken-ins and shifts.
pub fn amount() -> impl Strategy<Value = f64> {
    0.01..100.0_f64
}

/// Harvest amounts; negative values are losses.
pub fn harvest_amount() -> impl Strategy<Value = f64> {
    -50.0..100.0_f64
}

/// Share of chickened-in funds that becomes acquired.
pub fn accrued_fraction() -> impl Strategy<Value = f64> {
    0.0..=1.0_f64
}

/// Any single command with valid arguments.
///
/// Bonds are drawn more often than the other commands so random sequences
/// build up enough pending funds for the rest to pass their checks.
pub fn bond_command() -> impl Strategy<Value = BondCommand> {
    prop_oneof![
        3 => amount().prop_map(BondCommand::CreateBond),
        1 => amount().prop_map(BondCommand::ChickenOut),
        2 => (amount(), accrued_fraction()).prop_map(|(amount, accrued_fraction)| {
            BondCommand::ChickenIn {
                amount,
                accrued_fraction,
            }
        }),
        1 => harvest_amount().prop_map(BondCommand::HarvestA),
        1 => harvest_amount().prop_map(BondCommand::HarvestB),
        1 => amount().prop_map(BondCommand::ShiftA2B),
        1 => amount().prop_map(BondCommand::ShiftB2A),
    ]
}

/// Command sequences of up to `max_len` commands.
pub fn bond_commands(max_len: usize) -> impl Strategy<Value = Vec<BondCommand>> {
    prop::collection::vec(bond_command(), 0..=max_len)
}
