//! Relative profit of a marginal one-sided deposit, per price and amplification.
//!
//! dy/dx is the price of asset 0 in asset 1.  The invariant is 1e9, so the
//! deposit of 1 is tiny next to the pool.
//!
//! Prints CSV to stdout; failed cells are logged and written as `NaN`.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=sand_buckets=warn cargo run --release --example marginal_deposit > marginal_deposit.csv
//! ```

use std::io;

use sand_buckets::config::SweepConfig;
use sand_buckets::sheets::marginal_deposit;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let sheet = marginal_deposit(&SweepConfig::default().with_invariant(1e9))?;
    sheet.write_csv(io::stdout().lock())?;
    Ok(())
}
