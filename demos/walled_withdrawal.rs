//! ROI of a one-coin withdrawal that stops at the wall price.
//!
//! Like `perfect_withdrawal`, but the withdrawal stops once the pool is as
//! far past the peg as a price of 1.0004 on the other side.
//!
//! Prints CSV to stdout; failed cells are logged and written as `NaN`.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=sand_buckets=warn cargo run --release --example walled_withdrawal > walled_withdrawal.csv
//! ```

use std::io;

use sand_buckets::config::SweepConfig;
use sand_buckets::sheets::walled_withdrawal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let sheet = walled_withdrawal(&SweepConfig::default())?;
    sheet.write_csv(io::stdout().lock())?;
    Ok(())
}
