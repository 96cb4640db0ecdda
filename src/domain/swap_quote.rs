//! Outcome of a swap or single-asset withdrawal quote.

use core::fmt;

/// Net output and withheld fee of a swap (or of a one-coin withdrawal).
///
/// `dy` is what the caller receives; `fee` is the part of the fee-free
/// output that was withheld.  The admin share of `fee` is skimmed off the
/// pool's balance and the remainder stays behind for LPs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapQuote {
    dy: f64,
    fee: f64,
}

impl SwapQuote {
    /// Creates a quote.
    #[must_use]
    pub const fn new(dy: f64, fee: f64) -> Self {
        Self { dy, fee }
    }

    /// Amount received by the caller.
    #[must_use]
    pub const fn dy(&self) -> f64 {
        self.dy
    }

    /// Fee withheld from the output.
    #[must_use]
    pub const fn fee(&self) -> f64 {
        self.fee
    }

    /// Output before fees: `dy + fee`.
    #[must_use]
    pub fn dy_no_fee(&self) -> f64 {
        self.dy + self.fee
    }

    /// Amount leaving the pool's balance when the admin share
    /// `admin_fee` of the fee is skimmed: `dy + fee · admin_fee`.
    #[must_use]
    pub fn balance_debit(&self, admin_fee: f64) -> f64 {
        self.dy + self.fee * admin_fee
    }
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SwapQuote(dy={}, fee={})", self.dy, self.fee)
    }
}
