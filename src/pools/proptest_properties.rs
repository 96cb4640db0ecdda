//! Property-based tests for the StableSwap pool and its target solvers.
//!
//! Covers the behaviour a StableSwap pool must show for any parameters:
//!
//! 1. **Homogeneity**: scaling every balance by `s` scales `D`, swap
//!    outputs, deposits and withdrawals by `s` and leaves prices alone.
//! 2. **Spot price monotonicity**: the more `y` per `x`, the more `y` a
//!    unit of `x` buys.
//! 3. **Fee-free proportional liquidity**: depositing in the pool's ratio
//!    pays no imbalance fee, and withdrawing it again is lossless.
//! 4. **Swap accounting**: exact crediting of the input, the two-asset
//!    closed form, the advantage of splitting a swap, growth of `D` from
//!    retained fees, and rate-scaled balances.
//! 5. **Target solvers**: swaps, deposits and withdrawals land on the
//!    requested ratio.
//! 6. **Fee caps and profitability** of single-sided liquidity within the
//!    `[1, 2]` price range.
//! 7. **No free withdrawals**: taking coins out always burns LP tokens.

use proptest::prelude::*;

use crate::domain::{FeeRate, PoolParams};
use crate::error::SimError;
use crate::math::{
    balancing_dx, balancing_one_coin_deposit, balancing_one_coin_withdrawal, compute_d,
    dx_that_sets_y_over_x, dydx_y_from_x, map_mul, one_coin_deposit_that_sets_y_over_x,
    one_coin_withdrawal_that_sets_y_over_x, ones, xy_from_dydx, zip_sub,
};
use crate::pools::StableSwapPool;
use crate::traits::{LiquidityPool, PoolState, SwapPool};

const EPSILON: f64 = 1e-6;
const ROUGH_EPSILON: f64 = 1e-5;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Equality relative to the larger operand, absolute below 1.
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON * 1.0_f64.max(a.abs()).max(b.abs())
}

fn approx_gt(a: f64, b: f64) -> bool {
    a > b - EPSILON * 1.0_f64.max(a.abs()).max(b.abs())
}

fn all_approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| approx_eq(x, y))
}

fn make_params(n: usize, amp: f64, fee: f64, admin_fee: f64) -> PoolParams {
    let (Ok(fee), Ok(admin_fee)) = (FeeRate::new(fee), FeeRate::new(admin_fee)) else {
        panic!("valid fees");
    };
    let Ok(params) = PoolParams::new(n, amp, fee, admin_fee) else {
        panic!("valid params");
    };
    params
}

fn make_pool(params: &PoolParams, balances: Vec<f64>, supply: Option<f64>) -> StableSwapPool {
    let n = params.n();
    let Ok(pool) = StableSwapPool::new(params.clone(), balances, ones(n), supply) else {
        panic!("valid pool");
    };
    pool
}

fn make_rated_pool(params: &PoolParams, balances: Vec<f64>, rates: Vec<f64>) -> StableSwapPool {
    let Ok(pool) = StableSwapPool::new(params.clone(), balances, rates, None) else {
        panic!("valid rated pool");
    };
    pool
}

fn invariant_of(pool: &StableSwapPool) -> f64 {
    let Ok(d) = pool.d() else {
        panic!("expected D");
    };
    d
}

/// Two-asset pool `[x, y]` with `D = 2` and spot price `dydx`.
fn pool_in_price_range(amp: f64, fee: f64, admin_fee: f64, dydx: f64) -> StableSwapPool {
    let Ok((x, y)) = xy_from_dydx(amp, 2.0, dydx) else {
        panic!("price {dydx} should be reachable");
    };
    make_pool(&make_params(2, amp, fee, admin_fee), vec![x, y], None)
}

fn two(pool: &StableSwapPool) -> (f64, f64) {
    (pool.balances()[0], pool.balances()[1])
}

/// Marginal price of asset `i` in asset `j`, sampled with a swap of
/// `D / scale`.
fn sampled_price(pool: &StableSwapPool, i: usize, j: usize, scale: f64) -> f64 {
    let Ok(d) = pool.d() else {
        panic!("expected D");
    };
    let dx = d / scale;
    let Ok(quote) = pool.dy(i, j, dx) else {
        panic!("expected quote");
    };
    quote.dy() / dx
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn balances_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0_f64..1e4, 2..=4)
}

fn pair_strategy() -> impl Strategy<Value = (f64, f64)> {
    (1.0_f64..1e4, 1.0_f64..1e4)
}

fn ordered_pair_strategy() -> impl Strategy<Value = (f64, f64)> {
    pair_strategy().prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

fn amp_strategy() -> impl Strategy<Value = f64> {
    1.0_f64..5000.0
}

fn fee_strategy() -> impl Strategy<Value = f64> {
    0.0_f64..0.05
}

fn admin_fee_strategy() -> impl Strategy<Value = f64> {
    0.0_f64..=1.0
}

fn scale_strategy() -> impl Strategy<Value = f64> {
    0.01_f64..1000.0
}

// ---------------------------------------------------------------------------
// 1. Homogeneity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn d_is_homogeneous(
        balances in balances_strategy(),
        amp in amp_strategy(),
        s in scale_strategy(),
    ) {
        let c = make_params(balances.len(), amp, 0.0, 0.0);
        let (Ok(d1), Ok(d2)) = (
            compute_d(c.constants(), &balances),
            compute_d(c.constants(), &map_mul(&balances, s)),
        ) else {
            panic!("expected D");
        };
        prop_assert!(approx_eq(d1 * s, d2), "D {d1} * {s} vs {d2}");
    }

    #[test]
    fn spot_price_is_homogeneous_of_degree_zero(
        balances in balances_strategy(),
        amp in amp_strategy(),
        s in scale_strategy(),
    ) {
        let params = make_params(balances.len(), amp, 0.0, 0.0);
        let p1 = make_pool(&params, balances.clone(), None);
        let p2 = make_pool(&params, map_mul(&balances, s), None);

        for i in 0..params.n() {
            for j in (0..params.n()).filter(|&j| j != i) {
                let price1 = sampled_price(&p1, i, j, 1e6);
                let price2 = sampled_price(&p2, i, j, 1e6);
                prop_assert!(approx_eq(price1, price2), "{i}->{j}: {price1} vs {price2}");
            }
        }
    }

    #[test]
    fn exchange_is_homogeneous(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dx in 0.0_f64..1e4,
        s in scale_strategy(),
    ) {
        let params = make_params(balances.len(), amp, fee, admin_fee);
        let mut p1 = make_pool(&params, balances.clone(), None);
        let mut p2 = make_pool(&params, map_mul(&balances, s), None);

        let (Ok(dy1), Ok(dy2)) = (p1.exchange(0, 1, dx), p2.exchange(0, 1, dx * s)) else {
            panic!("expected swaps");
        };

        prop_assert!(approx_eq(dy1 * s, dy2), "dy {dy1} * {s} vs {dy2}");
        prop_assert!(all_approx_eq(&map_mul(p1.balances(), s), p2.balances()));
    }

    #[test]
    fn deposit_is_homogeneous(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        fractions in prop::collection::vec(0.0_f64..2.0, 4),
        ts1 in 0.01_f64..1e4,
        ts2 in 0.01_f64..1e4,
        s in scale_strategy(),
    ) {
        let n = balances.len();
        let params = make_params(n, amp, fee, admin_fee);
        let amounts: Vec<f64> =
            balances.iter().zip(&fractions).map(|(b, f)| b * f).collect();

        let mut p1 = make_pool(&params, balances.clone(), Some(ts1));
        let mut p2 = make_pool(&params, map_mul(&balances, s), Some(ts2));

        // Deposits that would lower D are rejected; nothing to compare.
        let (Ok(lp1), Ok(lp2)) =
            (p1.add_liquidity(&amounts), p2.add_liquidity(&map_mul(&amounts, s)))
        else {
            return Ok(());
        };
        let (Ok(vp1), Ok(vp2)) = (p1.virtual_price(), p2.virtual_price()) else {
            panic!("expected virtual prices");
        };

        prop_assert!(approx_eq(lp1 / ts1, lp2 / ts2));
        prop_assert!(approx_eq(lp1 * vp1 * s, lp2 * vp2));
        prop_assert!(all_approx_eq(&map_mul(p1.balances(), s), p2.balances()));
    }

    #[test]
    fn one_coin_withdrawal_is_homogeneous(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        burn_fraction in 0.001_f64..0.999,
        ts1 in 0.01_f64..1e4,
        ts2 in 0.01_f64..1e4,
        s in scale_strategy(),
    ) {
        let params = make_params(balances.len(), amp, fee, admin_fee);
        let mut p1 = make_pool(&params, balances.clone(), Some(ts1));
        let mut p2 = make_pool(&params, map_mul(&balances, s), Some(ts2));

        let (lp1, lp2) = (ts1 * burn_fraction, ts2 * burn_fraction);
        let (Ok(vp1), Ok(vp2)) = (p1.virtual_price(), p2.virtual_price()) else {
            panic!("expected virtual prices");
        };

        let (Ok(dx1), Ok(dx2)) =
            (p1.remove_liquidity_one_coin(lp1, 0), p2.remove_liquidity_one_coin(lp2, 0))
        else {
            return Ok(());
        };

        prop_assert!(approx_eq(lp1 * vp1 * s, lp2 * vp2));
        prop_assert!(approx_eq(dx1 * s, dx2), "dx {dx1} * {s} vs {dx2}");
        prop_assert!(all_approx_eq(&map_mul(p1.balances(), s), p2.balances()));
    }
}

// ---------------------------------------------------------------------------
// 2. Spot price monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spot_price_grows_with_y_over_x(
        amp in amp_strategy(),
        (lo, hi) in (0.001_f64..1e3, 1.001_f64..10.0).prop_map(|(a, k)| (a, a * k)),
    ) {
        let params = make_params(2, amp, 0.0, 0.0);
        let rich = make_pool(&params, vec![1.0, hi], None);
        let poor = make_pool(&params, vec![1.0, lo], None);

        prop_assert!(approx_gt(sampled_price(&rich, 0, 1, 1e6), sampled_price(&poor, 0, 1, 1e6)));
    }

    #[test]
    fn closed_form_spot_price_decreases_in_x(
        amp in amp_strategy(),
        d in 2.0_f64..10.0,
        (f1, f2) in (0.01_f64..0.98).prop_flat_map(|f1| (Just(f1), (f1 + 0.01)..0.99)),
    ) {
        let c = make_params(2, amp, 0.0, 0.0);
        let (Ok((p1, _)), Ok((p2, _))) =
            (dydx_y_from_x(c.constants(), d, f1 * d), dydx_y_from_x(c.constants(), d, f2 * d))
        else {
            panic!("expected spot prices");
        };
        prop_assert!(p1 >= p2, "{p1} < {p2}");
    }
}

// ---------------------------------------------------------------------------
// 3. Proportional liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proportional_deposit_pays_no_fee(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        x in 0.001_f64..10.0,
    ) {
        let params = make_params(balances.len(), amp, fee, admin_fee);
        let pool = make_pool(&params, balances.clone(), None);

        let new_balances = map_mul(&balances, 1.0 + x);
        let Ok(deposit) = zip_sub(&new_balances, &balances) else {
            panic!("equal lengths");
        };
        let Ok(quote) = pool.calc_token_amount_with_fees(&new_balances) else {
            panic!("expected quote");
        };

        for (fee, amount) in quote.fees().iter().zip(&deposit) {
            prop_assert!((fee / amount).abs() < EPSILON, "fee {fee} on {amount}");
        }
    }

    #[test]
    fn proportional_round_trip_is_lossless(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        x in 0.001_f64..10.0,
    ) {
        let params = make_params(balances.len(), amp, fee, admin_fee);
        let mut pool = make_pool(&params, balances.clone(), None);

        let deposited = map_mul(&balances, x);
        let Ok(lp) = pool.add_liquidity(&deposited) else {
            panic!("expected deposit");
        };
        let Ok(withdrawn) = pool.remove_liquidity(lp) else {
            panic!("expected withdrawal");
        };

        prop_assert!(all_approx_eq(&deposited, &withdrawn), "{deposited:?} vs {withdrawn:?}");
    }
}

// ---------------------------------------------------------------------------
// 4. Swap accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn exchange_credits_exactly_dx(
        (x, y) in pair_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dx in 0.0_f64..1e4,
    ) {
        let mut pool = make_pool(&make_params(2, amp, fee, admin_fee), vec![x, y], None);
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        prop_assert!(approx_eq(pool.balances()[0], x + dx));
    }

    #[test]
    fn exchange_to_mirror_image_leaves_fee_leakage(
        (x, y) in ordered_pair_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
    ) {
        let mut pool = make_pool(&make_params(2, amp, fee, admin_fee), vec![x, y], None);
        let Ok(_) = pool.exchange(0, 1, y - x) else {
            panic!("expected swap");
        };
        let (x2, y2) = two(&pool);

        prop_assert!(approx_eq(x2, y));
        prop_assert!(approx_eq(y2, x + (y - x) * fee * (1.0 - admin_fee)));
    }

    #[test]
    fn splitting_a_swap_favours_the_swapper(
        (x, y) in pair_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dx1 in 0.0_f64..1e4,
        dx2 in 0.0_f64..1e4,
    ) {
        let params = make_params(2, amp, fee, admin_fee);
        let mut split = make_pool(&params, vec![x, y], None);
        let mut whole = make_pool(&params, vec![x, y], None);

        let (Ok(a), Ok(b), Ok(dy_whole)) = (
            split.exchange(0, 1, dx1),
            split.exchange(0, 1, dx2),
            whole.exchange(0, 1, dx1 + dx2),
        ) else {
            panic!("expected swaps");
        };

        prop_assert!(approx_gt(a + b, dy_whole));
        prop_assert!(approx_eq(whole.balances()[0], split.balances()[0]));
        prop_assert!(approx_gt(whole.balances()[1], split.balances()[1]));
    }

    #[test]
    fn retained_fees_grow_d(
        x in 1e3_f64..1e4,
        y in 1e3_f64..1e4,
        amp in amp_strategy(),
        fee in 1e-3_f64..0.05,
        admin_fee in 0.0_f64..0.5,
        dx in 10.0_f64..1e3,
    ) {
        let mut pool = make_pool(&make_params(2, amp, fee, admin_fee), vec![x, y], None);
        let before = invariant_of(&pool);
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        let after = invariant_of(&pool);
        prop_assert!(after > before, "D {before} -> {after}");
    }

    #[test]
    fn fee_free_exchange_keeps_d(
        balances in balances_strategy(),
        amp in amp_strategy(),
        dx in 0.0_f64..1e4,
    ) {
        let mut pool = make_pool(&make_params(balances.len(), amp, 0.0, 0.0), balances, None);
        let before = invariant_of(&pool);
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        prop_assert!(approx_eq(invariant_of(&pool), before));
    }

    #[test]
    fn rated_exchange_matches_rescaled_pool(
        (x, y) in pair_strategy(),
        rate in 0.5_f64..4.0,
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dx in 0.0_f64..1e4,
    ) {
        let params = make_params(2, amp, fee, admin_fee);
        let mut rated = make_rated_pool(&params, vec![x, y], vec![1.0, rate]);
        let mut plain = make_pool(&params, vec![x, y * rate], None);
        prop_assert!(approx_eq(invariant_of(&rated), invariant_of(&plain)));

        let (Ok(dy_rated), Ok(dy_plain)) = (rated.exchange(0, 1, dx), plain.exchange(0, 1, dx))
        else {
            panic!("expected swaps");
        };

        prop_assert!(approx_eq(dy_rated * rate, dy_plain), "{dy_rated} * {rate} vs {dy_plain}");
        prop_assert!(approx_eq(rated.balances()[0], x + dx));
        prop_assert!(approx_eq(rated.balances()[1] * rate, plain.balances()[1]));
    }

    #[test]
    fn rated_exchange_is_homogeneous(
        (x, y) in pair_strategy(),
        rate in 0.5_f64..4.0,
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dx in 0.0_f64..1e4,
        s in scale_strategy(),
    ) {
        let params = make_params(2, amp, fee, admin_fee);
        let rates = vec![1.0, rate];
        let mut p1 = make_rated_pool(&params, vec![x, y], rates.clone());
        let mut p2 = make_rated_pool(&params, vec![x * s, y * s], rates);

        let (Ok(dy1), Ok(dy2)) = (p1.exchange(0, 1, dx), p2.exchange(0, 1, dx * s)) else {
            panic!("expected swaps");
        };

        prop_assert!(approx_eq(dy1 * s, dy2), "dy {dy1} * {s} vs {dy2}");
        prop_assert!(all_approx_eq(&map_mul(p1.balances(), s), p2.balances()));
    }

    #[test]
    fn fee_free_rated_pool_keeps_virtual_price(
        (x, y) in pair_strategy(),
        amp in amp_strategy(),
        dx in 0.0_f64..1e4,
    ) {
        let mut pool = make_rated_pool(&make_params(2, amp, 0.0, 0.0), vec![x, y], vec![1.0, 2.0]);
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        let Ok(vp) = pool.virtual_price() else {
            panic!("expected virtual price");
        };
        prop_assert!(approx_eq(vp, 1.0));
    }
}

// ---------------------------------------------------------------------------
// 5. Target solvers
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn swap_reaches_target_ratio(
        (x, y) in ordered_pair_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        share in 0.05_f64..1.0,
    ) {
        let params = make_params(2, amp, fee, admin_fee);
        let mut pool = make_pool(&params, vec![x, y], None);
        let target = share * y / x;

        let Ok(dx) = dx_that_sets_y_over_x(&params, target, x, y) else {
            panic!("target {target} should be reachable");
        };
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        let (x2, y2) = two(&pool);

        prop_assert!(approx_eq(x2 * target, y2), "{x2} * {target} vs {y2}");
    }

    #[test]
    fn balancing_swap_equalises_pool(
        (x, y) in ordered_pair_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
    ) {
        let params = make_params(2, amp, fee, admin_fee);
        let mut pool = make_pool(&params, vec![x, y], None);

        let Ok(dx) = balancing_dx(&params, x, y) else {
            panic!("expected balancing dx");
        };
        let Ok(_) = pool.exchange(0, 1, dx) else {
            panic!("expected swap");
        };
        let (x2, y2) = two(&pool);

        prop_assert!(approx_eq(x2, y2), "{x2} vs {y2}");
    }

    #[test]
    fn balancing_one_coin_deposit_equalises_pool(
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dydx in 1.001_f64..2.0,
    ) {
        let mut pool = pool_in_price_range(amp, fee, admin_fee, dydx);
        let (x, y) = two(&pool);

        let Ok(dx) = balancing_one_coin_deposit(pool.params(), x, y) else {
            panic!("expected balancing deposit");
        };
        let Ok(_) = pool.add_liquidity(&[dx, 0.0]) else {
            panic!("expected deposit");
        };
        let (x2, y2) = two(&pool);

        prop_assert!(approx_eq(x2, y2), "{x2} vs {y2}");
    }

    #[test]
    fn balancing_one_coin_withdrawal_equalises_pool(
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dydx in 1.001_f64..2.0,
    ) {
        let mut pool = pool_in_price_range(amp, fee, admin_fee, dydx);
        let (x, y) = two(&pool);

        // Withdrawing asset 1, so it takes the solver's asset 0 slot.
        let Ok(fraction) = balancing_one_coin_withdrawal(pool.params(), y, x) else {
            panic!("expected balancing withdrawal");
        };
        let Ok(_) = pool.remove_liquidity_one_coin(pool.total_supply() * fraction, 1) else {
            panic!("expected withdrawal");
        };
        let (x2, y2) = two(&pool);

        prop_assert!(approx_eq(x2, y2), "{x2} vs {y2}");
    }

    #[test]
    fn pool_with_requested_spot_price(
        amp in amp_strategy(),
        d in 2.0_f64..10.0,
        dydx in 1.0_f64..2.0,
    ) {
        let Ok((x, y)) = xy_from_dydx(amp, d, dydx) else {
            panic!("price {dydx} should be reachable");
        };
        let params = make_params(2, amp, 0.0, 0.0);
        let Ok((reapplied, _)) = dydx_y_from_x(params.constants(), d, x) else {
            panic!("expected spot price");
        };
        let pool = make_pool(&params, vec![x, y], None);

        prop_assert!(approx_eq(dydx, reapplied), "{dydx} vs {reapplied}");
        prop_assert!(approx_eq(dydx, sampled_price(&pool, 0, 1, 1e9)));
    }
}

// ---------------------------------------------------------------------------
// 6. Fee caps and profitability
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn single_sided_deposit_fee_is_capped(
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dydx in 1.001_f64..2.0,
        share in 0.0_f64..1.0,
    ) {
        let mut pool = pool_in_price_range(amp, fee, admin_fee, dydx);
        let (x, y) = two(&pool);
        let Ok(max) = balancing_one_coin_deposit(pool.params(), x, y) else {
            panic!("expected balancing deposit");
        };
        let dx = max * share;

        let Ok(lp) = pool.add_liquidity(&[dx, 0.0]) else {
            panic!("expected deposit");
        };
        let Ok(vp) = pool.virtual_price() else {
            panic!("expected virtual price");
        };

        prop_assert!(approx_gt(lp * vp, dx * (1.0 - fee)));
    }

    #[test]
    fn single_sided_withdrawal_fee_is_capped(
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        dydx in 1.001_f64..2.0,
        share in 0.0_f64..1.0,
    ) {
        let mut pool = pool_in_price_range(amp, fee, admin_fee, dydx);
        let (x, y) = two(&pool);
        let Ok(fraction) = balancing_one_coin_withdrawal(pool.params(), y, x) else {
            panic!("expected balancing withdrawal");
        };
        let lp = pool.total_supply() * fraction * share;
        let Ok(vp) = pool.virtual_price() else {
            panic!("expected virtual price");
        };

        let Ok(dy) = pool.remove_liquidity_one_coin(lp, 1) else {
            panic!("expected withdrawal");
        };

        prop_assert!(approx_gt(dy, lp * vp * (1.0 - fee)));
    }

    #[test]
    fn fee_less_round_trip_earns_the_price_gap(
        amp in amp_strategy(),
        dydx in 1.001_f64..2.0,
    ) {
        let Ok((x, y)) = xy_from_dydx(amp, 1e9, dydx) else {
            panic!("price {dydx} should be reachable");
        };
        let params = make_params(2, amp, 0.0, 0.0);
        let mut pool = make_pool(&params, vec![x, y], None);

        let dx = 1.0;
        let Ok(lp) = pool.add_liquidity(&[dx, 0.0]) else {
            panic!("expected deposit");
        };
        let (x1, y1) = two(&pool);
        let Ok(swap) = dx_that_sets_y_over_x(&params, x / y, x1, y1) else {
            panic!("expected flipping swap");
        };
        let Ok(_) = pool.exchange(0, 1, swap) else {
            panic!("expected swap");
        };
        let Ok(dx2) = pool.remove_liquidity_one_coin(lp, 0) else {
            panic!("expected withdrawal");
        };

        let profit = (dx2 - dx) / dx;
        prop_assert!((profit - (dydx - 1.0)).abs() < ROUGH_EPSILON, "{profit} vs {}", dydx - 1.0);
    }

    #[test]
    fn depositing_high_and_withdrawing_low_is_profitable(
        amp in amp_strategy(),
        a in 0.0_f64..1.0,
        b in 0.0_f64..1.0,
        c in 0.0_f64..1.0,
        d in 0.0_f64..1.0,
    ) {
        let (fee, admin_fee) = (0.0004, 0.5);
        let params = make_params(2, amp, fee, admin_fee);
        let ratio_at = |price: f64| {
            let Ok((x, y)) = xy_from_dydx(amp, 2.0, price) else {
                panic!("price {price} should be reachable");
            };
            y / x
        };
        let (lo, hi) = (ratio_at(1.0 + fee), ratio_at(2.0));
        let within = |t: f64| lo + (hi - lo) * t;
        let (improved_y_over_x, initial_y_over_x) = (within(a.min(b)), within(a.max(b)));
        let (improved_x_over_y, flipped_x_over_y) = (within(c.min(d)), within(c.max(d)));

        let mut pool = make_pool(&params, vec![1.0, initial_y_over_x], None);
        let Ok(dx) =
            one_coin_deposit_that_sets_y_over_x(&params, improved_y_over_x, 1.0, initial_y_over_x)
        else {
            panic!("expected deposit target");
        };
        let Ok(mint) = pool.add_liquidity(&[dx, 0.0]) else {
            panic!("expected deposit");
        };

        // Make the pool left-heavy.
        let (x1, y1) = two(&pool);
        let Ok(swap) = dx_that_sets_y_over_x(&params, 1.0 / flipped_x_over_y, x1, y1) else {
            panic!("expected flipping swap");
        };
        let Ok(_) = pool.exchange(0, 1, swap) else {
            panic!("expected swap");
        };

        let (x2, y2) = two(&pool);
        let Ok(fraction) =
            one_coin_withdrawal_that_sets_y_over_x(&params, 1.0 / improved_x_over_y, x2, y2)
        else {
            panic!("expected withdrawal target");
        };
        let burn = pool.total_supply() * fraction;
        let Ok(dx2) = pool.remove_liquidity_one_coin(burn, 0) else {
            panic!("expected withdrawal");
        };

        prop_assert!(approx_gt(dx2 / burn, dx / mint), "{} vs {}", dx2 / burn, dx / mint);
    }
}

// ---------------------------------------------------------------------------
// 7. Withdrawals and the invariant floor
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn withdrawing_coins_always_burns_lp(
        balances in balances_strategy(),
        amp in amp_strategy(),
        fee in fee_strategy(),
        admin_fee in admin_fee_strategy(),
        fractions in prop::collection::vec(0.0_f64..=0.999, 4),
    ) {
        let params = make_params(balances.len(), amp, fee, admin_fee);
        let mut pool = make_pool(&params, balances.clone(), None);
        let amounts: Vec<f64> =
            balances.iter().zip(&fractions).map(|(b, f)| b * f).collect();
        prop_assume!(amounts.iter().sum::<f64>() > balances.iter().sum::<f64>() / 1e9);

        match pool.remove_liquidity_imbalance(&amounts) {
            Ok(burn) => prop_assert!(burn > 0.0, "burned {burn}"),
            Err(SimError::InfeasibleOperation(msg)) => prop_assert!(
                msg == "impossible withdrawal" || msg == "impossible liquidity change",
                "unexpected message {msg}"
            ),
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn d_is_never_negative(
        balances in prop::collection::vec(0.001_f64..1e4, 2..=4),
        amp in amp_strategy(),
    ) {
        let params = make_params(balances.len(), amp, 0.0, 0.0);
        let Ok(d) = compute_d(params.constants(), &balances) else {
            panic!("expected D");
        };
        prop_assert!(d >= 0.0);
    }
}
