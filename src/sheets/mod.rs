//! Price-grid sweeps over two-asset StableSwap pools.
//!
//! Each sweep walks the price grid of a [`SweepConfig`] and, for every
//! amplification column, builds a fresh pool with the configured invariant
//! sitting at that price, then measures one liquidity operation on it:
//!
//! | Sweep | First column | Cell |
//! |-------|--------------|------|
//! | [`marginal_deposit`] | `dy/dx` | relative profit of a one-sided deposit of `dx` |
//! | [`perfect_withdrawal`] | `Initial dx/dy` | ROI of the one-coin withdrawal that balances the pool |
//! | [`walled_withdrawal`] | `Initial dx/dy` | ROI of the one-coin withdrawal that stops at the wall price |
//!
//! A cell whose solver fails is recorded as `NaN` and logged; the rest of
//! the grid is still computed.
//!
//! # Example
//!
//! ```rust
//! use sand_buckets::config::SweepConfig;
//! use sand_buckets::sheets::marginal_deposit;
//!
//! let cfg = SweepConfig::default()
//!     .with_rows(4)
//!     .with_amplifications(vec![100.0])
//!     .with_invariant(1e9);
//! let sheet = marginal_deposit(&cfg).expect("valid sweep");
//!
//! assert_eq!(sheet.header(), ["dy/dx", "A=100"]);
//! assert_eq!(sheet.rows().len(), 3);
//!
//! let mut csv = Vec::new();
//! sheet.write_csv(&mut csv).expect("in-memory write");
//! assert!(String::from_utf8(csv).expect("utf-8").starts_with("dy/dx,A=100\n"));
//! ```

mod marginal_deposit;
mod perfect_withdrawal;
mod walled_withdrawal;

use std::io;

use tracing::{debug, warn};

pub use marginal_deposit::marginal_deposit;
pub use perfect_withdrawal::perfect_withdrawal;
pub use walled_withdrawal::walled_withdrawal;

use crate::config::SweepConfig;
use crate::domain::PoolParams;
use crate::error::Result;

/// A numeric table with a header row.
///
/// The first value of every row is the grid price; the others follow the
/// amplification columns of the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Sheet {
    /// Column titles.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, one per grid price.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of column `index` (0 is the price column).
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index).copied())
    }

    /// Writes the sheet as comma-separated values, header first.
    ///
    /// # Errors
    ///
    /// Propagates any error of `out`.
    pub fn write_csv<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self.header.join(","))?;
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            writeln!(out, "{}", line.join(","))?;
        }
        out.flush()
    }
}

// -- grid ------------------------------------------------------------------------

/// Price of grid row `i`.
///
/// The lower half of the grid climbs from 1 in steps of `fine_step`; the
/// upper half continues from where a full grid of fine steps would end,
/// in steps of 1.
fn grid_price(rows: u32, i: u32, start: f64, fine_step: f64) -> f64 {
    let rows = f64::from(rows);
    let i = f64::from(i);
    let half = rows / 2.0;
    if i > half {
        1.0 + rows * (fine_step / 2.0) + (i - half)
    } else {
        start + i * fine_step
    }
}

/// Builds a sheet with one row per grid point `1..rows` and one column per
/// amplification.
///
/// `price(i)` gives the grid price of row `i`; `cell(params, price)`
/// computes one table cell.
fn sweep<P, C>(cfg: &SweepConfig, price_title: &str, price: P, cell: C) -> Result<Sheet>
where
    P: Fn(u32) -> f64,
    C: Fn(&PoolParams, f64) -> Result<f64>,
{
    sweep_with(cfg, price_title, price, |_| Ok(()), |params, _: &(), p| cell(params, p))
}

/// Like [`sweep`], with per-column state computed once by
/// `setup(params)` and handed to every cell of that column.
///
/// A column whose setup fails is filled with `NaN`.
fn sweep_with<P, S, K, C>(
    cfg: &SweepConfig,
    price_title: &str,
    price: P,
    setup: S,
    cell: C,
) -> Result<Sheet>
where
    P: Fn(u32) -> f64,
    S: Fn(&PoolParams) -> Result<K>,
    C: Fn(&PoolParams, &K, f64) -> Result<f64>,
{
    cfg.validate()?;
    let columns = cfg
        .amplifications
        .iter()
        .map(|&a| {
            let params = cfg.params(a)?;
            let state = setup(&params);
            if let Err(err) = &state {
                warn!(amplification = a, %err, "sweep column setup failed");
            }
            Ok((a, params, state))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(price_title.to_owned());
    header.extend(columns.iter().map(|(a, _, _)| format!("A={a}")));

    let rows = (1..cfg.rows)
        .map(|i| {
            let p = price(i);
            let mut row = Vec::with_capacity(columns.len() + 1);
            row.push(p);
            row.extend(columns.iter().map(|(a, params, state)| match state {
                Ok(state) => cell(params, state, p).unwrap_or_else(|err| {
                    warn!(amplification = a, price = p, %err, "sweep cell failed");
                    f64::NAN
                }),
                Err(_) => f64::NAN,
            }));
            row
        })
        .collect::<Vec<_>>();

    debug!(rows = rows.len(), columns = header.len(), title = price_title, "sweep done");
    Ok(Sheet { header, rows })
}
