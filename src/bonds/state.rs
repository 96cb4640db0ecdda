//! Observable state of the chicken-bond ledger.
//!
//! Funds live in two yield-bearing buckets, `A` and `B`.  Bucket `A` also
//! holds every pending bond.  The owned part of each bucket is split into
//! an `acquired` share and a `permanent` share:
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `pending` | bonded funds not yet chickened in or out (bucket `A`) |
//! | `acquired_a` / `acquired_b` | protocol-owned, redeemable funds |
//! | `permanent_a` / `permanent_b` | protocol-owned, locked funds |

use core::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of the five ledger quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BondsState {
    /// Funds of bonds still waiting to chicken in or out.
    pub pending: f64,
    /// Redeemable protocol-owned funds in bucket `A`.
    pub acquired_a: f64,
    /// Redeemable protocol-owned funds in bucket `B`.
    pub acquired_b: f64,
    /// Locked protocol-owned funds in bucket `A`.
    pub permanent_a: f64,
    /// Locked protocol-owned funds in bucket `B`.
    pub permanent_b: f64,
}

impl BondsState {
    /// Protocol-owned funds in bucket `A` (`acquired_a + permanent_a`).
    #[must_use]
    pub fn owned_a(&self) -> f64 {
        self.acquired_a + self.permanent_a
    }

    /// Protocol-owned funds in bucket `B` (`acquired_b + permanent_b`).
    #[must_use]
    pub fn owned_b(&self) -> f64 {
        self.acquired_b + self.permanent_b
    }

    /// Every fund in the ledger, pending bonds included.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.pending + self.owned_a() + self.owned_b()
    }

    /// Field-wise comparison with a tolerance relative to the larger
    /// magnitude (absolute below 1).
    ///
    /// Returns a description of the first field that differs, or `None`
    /// when the states agree.
    #[must_use]
    pub fn mismatch(&self, other: &Self, tolerance: f64) -> Option<String> {
        self.fields()
            .into_iter()
            .zip(other.fields())
            .find(|&((_, a), (_, b))| !roughly_eq(a, b, tolerance))
            .map(|((name, a), (_, b))| format!("{name}: {a} vs {b} (off by {})", (a - b).abs()))
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("pending", self.pending),
            ("acquired_a", self.acquired_a),
            ("acquired_b", self.acquired_b),
            ("permanent_a", self.permanent_a),
            ("permanent_b", self.permanent_b),
        ]
    }
}

fn roughly_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * 1.0_f64.max(a.abs()).max(b.abs())
}

impl fmt::Display for BondsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pending={} acquired=({}, {}) permanent=({}, {})",
            self.pending, self.acquired_a, self.acquired_b, self.permanent_a, self.permanent_b
        )
    }
}
