//! Domain value types used throughout the simulator.
//!
//! Validated newtypes guard the pool parameters (fee fractions,
//! amplification via [`PoolParams`]), and small result structs carry the
//! economic outputs of quotes.

mod fee_rate;
mod liquidity_quote;
mod pool_params;
mod swap_quote;

pub use fee_rate::FeeRate;
pub use liquidity_quote::LiquidityQuote;
pub use pool_params::PoolParams;
pub use swap_quote::SwapQuote;
