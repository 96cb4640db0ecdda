//! Share-based implementation of the chicken-bond ledger.
//!
//! Each bucket is a [`Vault`]: a yield-bearing pool of underlying funds
//! that issues shares at its current price.  The implementation only
//! tracks what a contract would store:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `shares_a` / `shares_b` | vault shares held by the ledger |
//! | `pending` | underlying owed to pending bonds |
//! | `permanent_a` / `permanent_b` | underlying locked as permanent funds |
//!
//! Acquired funds are never stored.  They are whatever the held shares
//! are worth beyond the pending and permanent funds:
//!
//! ```text
//! acquired_a = shares_a · price_a − permanent_a − pending
//! acquired_b = shares_b · price_b − permanent_b
//! ```
//!
//! Harvesting changes the vault price, so yield and losses reach the
//! acquired funds without any bookkeeping.  Shifts withdraw shares from
//! one vault, deposit the underlying into the other, and carry the moved
//! funds' share of permanent funds along.

use tracing::trace;

use super::command::{EMPTY_BUCKET, EXCEEDS_BUCKET, EXCEEDS_PENDING, HARVEST_LOSS};
use super::{BondCommand, BondsState};
use crate::error::Result;
use crate::traits::ChickenBonds;

/// Relative slack granted to ledger limits, absorbing the rounding of
/// share arithmetic.
const LIMIT_SLACK: f64 = 1e-9;

fn exceeds(amount: f64, available: f64) -> bool {
    amount > available + LIMIT_SLACK * available.abs().max(1.0)
}

/// A yield-bearing vault issuing shares against underlying funds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vault {
    deposited: f64,
    price: f64,
}

impl Default for Vault {
    fn default() -> Self {
        Self {
            deposited: 0.0,
            price: 1.0,
        }
    }
}

impl Vault {
    /// Underlying funds held by the vault.
    #[must_use]
    pub const fn deposited(&self) -> f64 {
        self.deposited
    }

    /// Underlying value of one share.
    #[must_use]
    pub const fn price(&self) -> f64 {
        self.price
    }

    /// Underlying value of `shares`.
    #[must_use]
    pub fn value_of(&self, shares: f64) -> f64 {
        shares * self.price
    }

    /// Deposits `underlying`, returning the shares issued.
    pub fn deposit(&mut self, underlying: f64) -> f64 {
        self.deposited += underlying;
        underlying / self.price
    }

    /// Redeems `shares`, returning the underlying paid out.
    pub fn withdraw(&mut self, shares: f64) -> f64 {
        let underlying = self.value_of(shares);
        self.deposited -= underlying;
        underlying
    }

    /// Books a yield of `underlying` (negative for a loss) by repricing
    /// every share.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InfeasibleOperation`] if the vault is empty or
    /// the loss would leave it with nothing.
    ///
    /// [`SimError::InfeasibleOperation`]: crate::error::SimError::InfeasibleOperation
    pub fn harvest(&mut self, underlying: f64) -> Result<()> {
        if self.deposited <= 0.0 {
            return Err(EMPTY_BUCKET);
        }
        let after = self.deposited + underlying;
        if after <= 0.0 {
            return Err(HARVEST_LOSS);
        }
        self.price *= after / self.deposited;
        self.deposited = after;
        Ok(())
    }
}

/// Ledger implemented on top of two [`Vault`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultBasedImplementation {
    pending: f64,
    permanent_a: f64,
    permanent_b: f64,
    shares_a: f64,
    shares_b: f64,
    vault_a: Vault,
    vault_b: Vault,
}

impl VaultBasedImplementation {
    /// An empty ledger over two fresh vaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vault backing bucket `A`.
    #[must_use]
    pub const fn vault_a(&self) -> &Vault {
        &self.vault_a
    }

    /// Vault backing bucket `B`.
    #[must_use]
    pub const fn vault_b(&self) -> &Vault {
        &self.vault_b
    }

    /// Shares of vault `A` held by the ledger.
    #[must_use]
    pub const fn shares_a(&self) -> f64 {
        self.shares_a
    }

    /// Shares of vault `B` held by the ledger.
    #[must_use]
    pub const fn shares_b(&self) -> f64 {
        self.shares_b
    }

    fn total_a(&self) -> f64 {
        self.vault_a.value_of(self.shares_a)
    }

    fn total_b(&self) -> f64 {
        self.vault_b.value_of(self.shares_b)
    }

    fn owned_a(&self) -> f64 {
        self.total_a() - self.pending
    }
}

/// Harvests into `vault`, whose shares are all held as `shares` with
/// `owned` of them owned by the protocol.
///
/// A loss that takes the whole vault leaves its shares worthless, so the
/// vault is replaced by a fresh one.
fn harvest_into(vault: &mut Vault, shares: &mut f64, owned: f64, amount: f64) -> Result<()> {
    BondCommand::HarvestA(amount).validate()?;
    if owned <= 0.0 {
        return Err(EMPTY_BUCKET);
    }
    if exceeds(-amount, owned) {
        return Err(HARVEST_LOSS);
    }

    if vault.deposited() + amount <= 0.0 {
        *vault = Vault::default();
        *shares = 0.0;
        return Ok(());
    }
    vault.harvest(amount)
}

impl ChickenBonds for VaultBasedImplementation {
    fn create_bond(&mut self, amount: f64) -> Result<()> {
        BondCommand::CreateBond(amount).validate()?;

        self.pending += amount;
        self.shares_a += self.vault_a.deposit(amount);

        trace!(amount, shares_a = self.shares_a, "create_bond");
        Ok(())
    }

    fn chicken_out(&mut self, amount: f64) -> Result<()> {
        BondCommand::ChickenOut(amount).validate()?;
        if exceeds(amount, self.pending) {
            return Err(EXCEEDS_PENDING);
        }

        let total_a = self.total_a();
        let amount = amount.min(self.pending).min(total_a);
        if amount <= 0.0 {
            return Ok(());
        }

        let shares = self.shares_a * (amount / total_a);
        self.pending -= self.vault_a.withdraw(shares);
        self.shares_a -= shares;

        trace!(amount, shares, "chicken_out");
        Ok(())
    }

    fn chicken_in(&mut self, amount: f64, accrued_fraction: f64) -> Result<()> {
        BondCommand::ChickenIn {
            amount,
            accrued_fraction,
        }
        .validate()?;
        if exceeds(amount, self.pending) {
            return Err(EXCEEDS_PENDING);
        }

        self.pending -= amount;
        self.permanent_a += amount * (1.0 - accrued_fraction);

        trace!(amount, accrued_fraction, "chicken_in");
        Ok(())
    }

    fn harvest_a(&mut self, amount: f64) -> Result<()> {
        let owned = self.owned_a();
        harvest_into(&mut self.vault_a, &mut self.shares_a, owned, amount)?;
        trace!(amount, price = self.vault_a.price(), "harvest_a");
        Ok(())
    }

    fn harvest_b(&mut self, amount: f64) -> Result<()> {
        let owned = self.total_b();
        harvest_into(&mut self.vault_b, &mut self.shares_b, owned, amount)?;
        trace!(amount, price = self.vault_b.price(), "harvest_b");
        Ok(())
    }

    fn shift_a2b(&mut self, amount: f64) -> Result<()> {
        BondCommand::ShiftA2B(amount).validate()?;
        let total_a = self.total_a();
        let owned_a = total_a - self.pending;
        if exceeds(amount, owned_a) {
            return Err(EXCEEDS_BUCKET);
        }
        let amount = amount.min(owned_a);
        if amount <= 0.0 {
            return Ok(());
        }

        let permanent_per_owned = self.permanent_a / owned_a;
        self.permanent_a -= amount * permanent_per_owned;

        let shares = self.shares_a * (amount / total_a);
        let moved = self.vault_a.withdraw(shares);
        self.shares_a -= shares;

        let total_b_before = self.total_b();
        self.shares_b += self.vault_b.deposit(moved);
        self.permanent_b += (self.total_b() - total_b_before) * permanent_per_owned;

        trace!(amount, moved, permanent_per_owned, "shift_a2b");
        Ok(())
    }

    fn shift_b2a(&mut self, amount: f64) -> Result<()> {
        BondCommand::ShiftB2A(amount).validate()?;
        let total_b = self.total_b();
        if exceeds(amount, total_b) {
            return Err(EXCEEDS_BUCKET);
        }
        let amount = amount.min(total_b);
        if amount <= 0.0 {
            return Ok(());
        }

        let shares = self.shares_b * (amount / total_b);
        let moved = self.vault_b.withdraw(shares);
        self.shares_b -= shares;

        let permanent_per_owned = self.permanent_b / total_b;
        self.permanent_b -= moved * permanent_per_owned;

        self.shares_a += self.vault_a.deposit(moved);
        self.permanent_a += moved * permanent_per_owned;

        trace!(amount, moved, permanent_per_owned, "shift_b2a");
        Ok(())
    }

    fn state(&self) -> BondsState {
        BondsState {
            pending: self.pending,
            acquired_a: self.total_a() - self.permanent_a - self.pending,
            acquired_b: self.total_b() - self.permanent_b,
            permanent_a: self.permanent_a,
            permanent_b: self.permanent_b,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::SimError;

    const TOLERANCE: f64 = 1e-9;

    fn ledger(cmds: &[BondCommand]) -> VaultBasedImplementation {
        let mut imp = VaultBasedImplementation::new();
        for cmd in cmds {
            let Ok(()) = cmd.apply_to(&mut imp) else {
                panic!("{cmd} should succeed");
            };
        }
        imp
    }

    fn assert_state(imp: &VaultBasedImplementation, expected: BondsState) {
        if let Some(detail) = expected.mismatch(&imp.state(), TOLERANCE) {
            panic!("unexpected state: {detail}");
        }
    }

    // -- Vault ----------------------------------------------------------------

    #[test]
    fn vault_issues_shares_at_price() {
        let mut v = Vault::default();
        assert_eq!(v.deposit(100.0), 100.0);
        let Ok(()) = v.harvest(100.0) else {
            panic!("expected harvest");
        };
        assert_eq!(v.price(), 2.0);
        assert_eq!(v.deposit(50.0), 25.0);
        assert_eq!(v.withdraw(25.0), 50.0);
        assert_eq!(v.deposited(), 200.0);
    }

    #[test]
    fn vault_rejects_harvest_when_empty() {
        let mut v = Vault::default();
        assert_eq!(v.harvest(1.0), Err(EMPTY_BUCKET));
    }

    #[test]
    fn vault_rejects_total_loss() {
        let mut v = Vault::default();
        let _ = v.deposit(10.0);
        assert_eq!(v.harvest(-10.0), Err(HARVEST_LOSS));
        assert_eq!(v.price(), 1.0);
    }

    // -- ledger operations ----------------------------------------------------

    #[test]
    fn bonds_sit_in_vault_a() {
        let imp = ledger(&[BondCommand::CreateBond(50.0), BondCommand::CreateBond(50.0)]);
        assert_eq!(imp.shares_a(), 100.0);
        assert_eq!(imp.vault_a().deposited(), 100.0);
        assert_state(
            &imp,
            BondsState {
                pending: 100.0,
                ..BondsState::default()
            },
        );
    }

    #[test]
    fn yield_accrues_to_acquired() {
        let imp = ledger(&[
            BondCommand::CreateBond(100.0),
            BondCommand::ChickenIn {
                amount: 40.0,
                accrued_fraction: 0.5,
            },
            BondCommand::HarvestA(10.0),
        ]);
        assert_state(
            &imp,
            BondsState {
                pending: 60.0,
                acquired_a: 30.0,
                permanent_a: 20.0,
                ..BondsState::default()
            },
        );
    }

    #[test]
    fn chicken_out_after_yield_keeps_acquired() {
        let imp = ledger(&[
            BondCommand::CreateBond(100.0),
            BondCommand::ChickenIn {
                amount: 50.0,
                accrued_fraction: 1.0,
            },
            BondCommand::HarvestA(50.0),
            BondCommand::ChickenOut(50.0),
        ]);
        assert_state(
            &imp,
            BondsState {
                acquired_a: 100.0,
                ..BondsState::default()
            },
        );
    }

    #[test]
    fn shift_carries_permanent_share() {
        let mut imp = ledger(&[
            BondCommand::CreateBond(100.0),
            BondCommand::ChickenIn {
                amount: 50.0,
                accrued_fraction: 0.8,
            },
        ]);
        let Ok(()) = imp.shift_a2b(25.0) else {
            panic!("expected shift");
        };
        assert_state(
            &imp,
            BondsState {
                pending: 50.0,
                acquired_a: 20.0,
                acquired_b: 20.0,
                permanent_a: 5.0,
                permanent_b: 5.0,
            },
        );

        let Ok(()) = imp.harvest_b(10.0) else {
            panic!("expected harvest");
        };
        let Ok(()) = imp.shift_b2a(35.0) else {
            panic!("expected shift");
        };
        assert_state(
            &imp,
            BondsState {
                pending: 50.0,
                acquired_a: 50.0,
                permanent_a: 10.0,
                ..BondsState::default()
            },
        );
    }

    #[test]
    fn total_loss_resets_vault() {
        let mut imp = ledger(&[
            BondCommand::CreateBond(10.0),
            BondCommand::ChickenIn {
                amount: 10.0,
                accrued_fraction: 0.5,
            },
        ]);
        let Ok(()) = imp.harvest_a(-10.0) else {
            panic!("expected harvest");
        };
        assert_eq!(imp.shares_a(), 0.0);
        assert_eq!(imp.vault_a().price(), 1.0);
        assert_state(
            &imp,
            BondsState {
                acquired_a: -5.0,
                permanent_a: 5.0,
                ..BondsState::default()
            },
        );
    }

    // -- rejections -----------------------------------------------------------

    #[test]
    fn rejections_leave_state_untouched() {
        let mut imp = ledger(&[BondCommand::CreateBond(10.0)]);
        let before = imp.clone();

        assert_eq!(imp.chicken_out(11.0), Err(EXCEEDS_PENDING));
        assert_eq!(imp.harvest_a(1.0), Err(EMPTY_BUCKET));
        assert_eq!(imp.shift_b2a(1.0), Err(EXCEEDS_BUCKET));
        assert!(matches!(imp.create_bond(-1.0), Err(SimError::InvalidArgument(_))));
        assert!(matches!(imp.chicken_in(1.0, 2.0), Err(SimError::InvalidArgument(_))));
        assert_eq!(imp, before);
    }
}
