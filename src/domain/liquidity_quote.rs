//! Outcome of an imbalanced liquidity change quote.

/// LP tokens minted (positive) or burned (negative) by moving the pool to
/// a new balance vector, together with the per-asset imbalance fees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiquidityQuote {
    mint_burn: f64,
    fees: Vec<f64>,
}

impl LiquidityQuote {
    /// Creates a quote.
    #[must_use]
    pub fn new(mint_burn: f64, fees: Vec<f64>) -> Self {
        Self { mint_burn, fees }
    }

    /// LP supply change: `> 0` mints, `< 0` burns.
    #[must_use]
    pub const fn mint_burn(&self) -> f64 {
        self.mint_burn
    }

    /// Imbalance fee charged on each asset.
    #[must_use]
    pub fn fees(&self) -> &[f64] {
        &self.fees
    }

    /// Consumes the quote, returning `(mint_burn, fees)`.
    #[must_use]
    pub fn into_parts(self) -> (f64, Vec<f64>) {
        (self.mint_burn, self.fees)
    }
}
