//! Numerical core of the StableSwap simulator.
//!
//! Everything here is pure: functions take balances and constants by
//! reference and return new values.  Pool types in [`crate::pools`] layer
//! state and fee accounting on top.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `invariant` | [`compute_d`], [`compute_y_d`], marginal price helpers |
//! | `solver` | [`try_converge`] fixed-point loop, [`bin_search_desc`] bisection |
//! | `targets` | Ratio-targeting swap / deposit / withdrawal solvers |
//! | `vector` | Element-wise helpers over `&[f64]` |
//! | `checked` | Finiteness and sign guards |

mod checked;
mod invariant;
mod solver;
mod targets;
mod vector;

pub use checked::{
    all_non_negative, approx_positive, clamped, finite, finite_non_negative, non_negative,
    positive, NEGATIVE_SLACK,
};
pub use invariant::{
    compute_d, compute_y_d, dydx_y_from_x, other_side, xy_from_dydx, InvariantConstants,
};
pub use solver::{
    bin_search_desc, converge, try_converge, BISECTION_EPSILON, CONVERGENCE_EPSILON,
    MAX_ITERATIONS,
};
pub use targets::{
    balancing_dx, balancing_one_coin_deposit, balancing_one_coin_withdrawal,
    dx_that_sets_y_over_x, dx_that_splits_pool, one_coin_deposit_that_sets_y_over_x,
    one_coin_withdrawal_that_sets_y_over_x,
};
pub use vector::{
    ensure_len, map_add, map_div, map_mul, map_sub, ones, prod, set, sum, zeros, zip_add,
    zip_div, zip_mul, zip_sub,
};
