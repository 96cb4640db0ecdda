//! ROI of the one-coin withdrawal that rebalances an unbalanced pool.
//!
//! The pool starts with more asset 0 than asset 1, priced at dx/dy.  The
//! withdrawal takes asset 0 until both balances are equal.
//!
//! Prints CSV to stdout; failed cells are logged and written as `NaN`.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=sand_buckets=warn cargo run --release --example perfect_withdrawal > perfect_withdrawal.csv
//! ```

use std::io;

use sand_buckets::config::SweepConfig;
use sand_buckets::sheets::perfect_withdrawal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let sheet = perfect_withdrawal(&SweepConfig::default())?;
    sheet.write_csv(io::stdout().lock())?;
    Ok(())
}
