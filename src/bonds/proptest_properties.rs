//! Property-based tests for the chicken-bond ledger.
//!
//! 1. **Equivalence**: the vault implementation tracks the reference
//!    model through any command sequence.
//! 2. **Conservation**: only bonds, chicken-outs and harvests change the
//!    total funds of the model.
//! 3. **Yield only raises prices**: without losses, vault prices never
//!    fall.

use proptest::prelude::*;

use super::strategy::bond_commands;
use super::{BondCommand, BondsState, SimpleModel, VaultBasedImplementation, Versus};
use crate::traits::ChickenBonds;

const TOLERANCE: f64 = 1e-9;

fn roughly_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * 1.0_f64.max(a.abs()).max(b.abs())
}

/// Change in total funds a command is allowed to cause.
fn external_flow(cmd: &BondCommand) -> f64 {
    match *cmd {
        BondCommand::CreateBond(amount) => amount,
        BondCommand::ChickenOut(amount) => -amount,
        BondCommand::HarvestA(amount) | BondCommand::HarvestB(amount) => amount,
        BondCommand::ChickenIn { .. } | BondCommand::ShiftA2B(_) | BondCommand::ShiftB2A(_) => 0.0,
    }
}

fn is_loss(cmd: &BondCommand) -> bool {
    matches!(*cmd, BondCommand::HarvestA(a) | BondCommand::HarvestB(a) if a < 0.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn vault_matches_model(cmds in bond_commands(64)) {
        let mut versus = Versus::new(VaultBasedImplementation::new());
        let outcome = versus.run(&cmds);
        prop_assert!(outcome.is_ok(), "{:?}", outcome);
        prop_assert_eq!(versus.executed() + versus.skipped(), cmds.len());
    }

    #[test]
    fn model_conserves_total(cmds in bond_commands(64)) {
        let mut model = SimpleModel::new();
        let mut expected = 0.0;
        for cmd in &cmds {
            if model.execute(*cmd).is_ok() {
                expected += external_flow(cmd);
            }
            let total = model.state().total();
            prop_assert!(roughly_eq(total, expected), "after {}: {} vs {}", cmd, total, expected);
        }
    }

    #[test]
    fn model_never_goes_negative(cmds in bond_commands(64)) {
        let mut model = SimpleModel::new();
        for cmd in &cmds {
            let _ = model.execute(*cmd);
            let s: BondsState = model.state();
            prop_assert!(s.pending > -TOLERANCE, "{}", s);
            prop_assert!(s.permanent_a > -TOLERANCE && s.permanent_b > -TOLERANCE, "{}", s);
            prop_assert!(s.owned_a() > -TOLERANCE && s.owned_b() > -TOLERANCE, "{}", s);
        }
    }

    #[test]
    fn vault_prices_rise_without_losses(cmds in bond_commands(64)) {
        let mut imp = VaultBasedImplementation::new();
        for cmd in cmds.iter().filter(|cmd| !is_loss(cmd)) {
            let (price_a, price_b) = (imp.vault_a().price(), imp.vault_b().price());
            if cmd.apply_to(&mut imp).is_ok() {
                prop_assert!(imp.vault_a().price() >= price_a);
                prop_assert!(imp.vault_b().price() >= price_b);
            }
        }
    }
}
