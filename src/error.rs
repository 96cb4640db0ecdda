//! Unified error types for the simulator.
//!
//! All fallible operations across the crate return [`SimError`] as their
//! error type.  The variants separate "bad input" from "no solution found"
//! so callers can tell a rejected call apart from a solver that gave up.
//!
//! None of these conditions are transient: every computation is pure and
//! deterministic, so a failure is a property of the inputs and retrying
//! the same call yields the same error.

use thiserror::Error;

/// Every error the simulator can raise.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// An argument violated a documented precondition (negative balance,
    /// fee outside `[0, 1]`, fewer than two assets, zero amplification,
    /// mismatched lengths, out-of-range index, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A fixed-point iteration did not settle within its iteration cap or
    /// produced a non-finite iterate.
    #[error("not converged within {iterations} iterations")]
    ConvergenceFailure {
        /// Number of iterations performed before giving up.
        iterations: u32,
    },

    /// A bisection search could not bracket or reach its target.
    #[error("bisection failed: {0}")]
    BisectionFailure(&'static str),

    /// The requested liquidity change cannot be carried out (negative
    /// mint or burn, or balances that would go negative after fees).
    #[error("{0}")]
    InfeasibleOperation(&'static str),

    /// A computation produced a value outside its valid domain: `NaN`,
    /// `±∞`, or a negative quantity that must be non-negative.
    #[error("invalid result: {0}")]
    InvalidResult(&'static str),

    /// The model-based harness observed an implementation whose state
    /// drifted away from the reference model.
    #[error("state divergence after step {step} ({command}): {detail}")]
    Divergence {
        /// Zero-based index of the command that exposed the divergence.
        step: usize,
        /// Display form of the offending command.
        command: String,
        /// Which field diverged and by how much.
        detail: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, SimError>;
