//! Integration tests for the Fourier pricing engine.
//!
//! Reference values come from closed forms where they exist (Black-Scholes,
//! the Merton Poisson-weighted Black-Scholes series) and from converged
//! high-resolution runs for Heston and Bates.

use approx::assert_abs_diff_eq;
use fp_core::Real;
use fp_instruments::{OptionSpec, OptionType};
use fp_models::{
    keys, BatesParameters, GbmParameters, HestonParameters, JumpParameters, MarketEnvironment,
    MertonParameters, ModelParameters,
};
use fp_pricingengines::{black_scholes_price, FourierPricer};
use fp_time::Date;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn environment(pricing_date: Date, spot: Real, rate: Real) -> MarketEnvironment {
    MarketEnvironment::builder("test", pricing_date)
        .with_constant(keys::INITIAL_VALUE, spot)
        .with_constant(keys::SHORT_RATE, rate)
        .build()
        .unwrap()
}

fn price(params: &ModelParameters, env: &MarketEnvironment, strike: Real, expiry: Date, right: OptionType) -> Real {
    let option = OptionSpec::new(strike, expiry, right).unwrap();
    FourierPricer::default().price(params, env, &option).unwrap().price
}

/// Merton price as a Poisson mixture of Black-Scholes prices.
fn merton_series(right: OptionType, s: Real, k: Real, r: Real, t: Real, sigma: Real, j: &JumpParameters) -> Real {
    let kappa = j.jump_compensator();
    let lambda_p = j.lambda * (1.0 + kappa);
    let mut weight = (-lambda_p * t).exp();
    let mut total = 0.0;
    for n in 0..80 {
        if n > 0 {
            weight *= lambda_p * t / n as Real;
        }
        let nf = n as Real;
        let sigma_n = (sigma * sigma + nf * j.delta * j.delta / t).sqrt();
        let r_n = r - j.lambda * kappa + nf * (1.0 + kappa).ln() / t;
        total += weight * black_scholes_price(right, s, k, r_n, sigma_n, t);
    }
    total
}

// ─── Reference scenario ───────────────────────────────────────────────────────

#[test]
fn test_reference_scenario_gbm() {
    init_logging();
    let env = environment(date(2020, 1, 1), 100.0, 0.01);
    let expiry = date(2020, 3, 30);
    let gbm: ModelParameters = GbmParameters::new(0.2).unwrap().into();

    let put = price(&gbm, &env, 100.0, expiry, OptionType::Put);
    let call = price(&gbm, &env, 100.0, expiry, OptionType::Call);
    assert_abs_diff_eq!(put, 3.81, epsilon = 0.05);
    assert_abs_diff_eq!(call, 4.06, epsilon = 0.05);

    let t = env.time_to(expiry);
    assert_abs_diff_eq!(put, black_scholes_price(OptionType::Put, 100.0, 100.0, 0.01, 0.2, t), epsilon = 1e-7);
    assert_abs_diff_eq!(call, black_scholes_price(OptionType::Call, 100.0, 100.0, 0.01, 0.2, t), epsilon = 1e-7);
}

// ─── Model reference values ───────────────────────────────────────────────────

#[test]
fn test_merton_matches_series() {
    let env = environment(date(2020, 1, 1), 100.0, 0.01);
    let expiry = date(2020, 3, 30);
    let t = env.time_to(expiry);
    let jumps = JumpParameters::new(0.8, -0.2, 0.1).unwrap();
    let merton: ModelParameters = MertonParameters::new(0.2, jumps).unwrap().into();

    for k in [80.0, 100.0, 120.0] {
        for right in [OptionType::Call, OptionType::Put] {
            let fourier = price(&merton, &env, k, expiry, right);
            let series = merton_series(right, 100.0, k, 0.01, t, 0.2, &jumps);
            assert_abs_diff_eq!(fourier, series, epsilon = 1e-7);
        }
    }
    assert_abs_diff_eq!(price(&merton, &env, 100.0, expiry, OptionType::Put), 4.9623, epsilon = 1e-3);
}

#[test]
fn test_heston_reference() {
    let env = environment(date(2021, 1, 1), 100.0, 0.05);
    let expiry = date(2022, 1, 1);
    let heston: ModelParameters = HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7).unwrap().into();
    assert_abs_diff_eq!(price(&heston, &env, 105.0, expiry, OptionType::Put), 7.5579, epsilon = 1e-3);
    assert_abs_diff_eq!(price(&heston, &env, 105.0, expiry, OptionType::Call), 7.6788, epsilon = 1e-3);
}

#[test]
fn test_bates_reference() {
    let env = environment(date(2021, 1, 1), 100.0, 0.05);
    let expiry = date(2022, 1, 1);
    let bates: ModelParameters = BatesParameters::new(
        HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7).unwrap(),
        JumpParameters::new(0.5, -0.1, 0.15).unwrap(),
    )
    .into();
    assert_abs_diff_eq!(price(&bates, &env, 100.0, expiry, OptionType::Put), 6.7911, epsilon = 1e-3);
    assert_abs_diff_eq!(price(&bates, &env, 100.0, expiry, OptionType::Call), 11.6682, epsilon = 1e-3);
}

#[test]
fn test_feller_violation_still_prices() {
    init_logging();
    let env = environment(date(2020, 1, 1), 100.0, 0.02);
    let heston: ModelParameters = HestonParameters::new(0.04, 0.5, 0.04, 1.0, -0.9).unwrap().into();
    let put = price(&heston, &env, 100.0, date(2030, 1, 1), OptionType::Put);
    assert!(put.is_finite() && put > 0.0);
}

// ─── Black-Scholes limits ─────────────────────────────────────────────────────

#[test]
fn test_black_scholes_limits() {
    let env = environment(date(2020, 1, 1), 100.0, 0.01);
    let expiry = date(2020, 3, 30);
    let t = env.time_to(expiry);
    let no_jumps = JumpParameters::new(0.0, -0.2, 0.1).unwrap();

    let merton: ModelParameters = MertonParameters::new(0.2, no_jumps).unwrap().into();
    let heston = HestonParameters::new(0.04, 2.0, 0.04, 1e-4, -0.5).unwrap();
    let bates: ModelParameters = BatesParameters::new(heston, no_jumps).into();
    let heston: ModelParameters = heston.into();

    for k in [80.0, 90.0, 100.0, 110.0, 120.0] {
        let bs = black_scholes_price(OptionType::Put, 100.0, k, 0.01, 0.2, t);
        assert_abs_diff_eq!(price(&merton, &env, k, expiry, OptionType::Put), bs, epsilon = 1e-7);
        assert_abs_diff_eq!(price(&heston, &env, k, expiry, OptionType::Put), bs, epsilon = 1e-3);
        assert_abs_diff_eq!(price(&bates, &env, k, expiry, OptionType::Put), bs, epsilon = 1e-3);
    }
}

// ─── Boundary behaviour ───────────────────────────────────────────────────────

#[test]
fn test_deep_out_of_the_money_is_small_and_non_negative() {
    let env = environment(date(2020, 1, 1), 100.0, 0.01);
    let expiry = date(2020, 3, 30);
    let gbm: ModelParameters = GbmParameters::new(0.2).unwrap().into();
    let call = price(&gbm, &env, 300.0, expiry, OptionType::Call);
    let put = price(&gbm, &env, 30.0, expiry, OptionType::Put);
    assert!((0.0..1e-8).contains(&call));
    assert!((0.0..1e-8).contains(&put));
}

#[test]
fn test_reproducible() {
    let env = environment(date(2020, 1, 1), 100.0, 0.03);
    let bates: ModelParameters = BatesParameters::new(
        HestonParameters::new(0.05, 1.5, 0.06, 0.5, -0.6).unwrap(),
        JumpParameters::new(0.4, -0.15, 0.2).unwrap(),
    )
    .into();
    let option = OptionSpec::new(95.0, date(2021, 6, 30), OptionType::Call).unwrap();
    let pricer = FourierPricer::default();
    let a = pricer.price(&bates, &env, &option).unwrap();
    let b = pricer.price(&bates, &env, &option).unwrap();
    assert_eq!(a.price.to_bits(), b.price.to_bits());
    assert_eq!(a, b);
}

#[test]
fn test_price_grid_matches_single_prices() {
    let env = environment(date(2020, 1, 1), 100.0, 0.01);
    let heston: ModelParameters = HestonParameters::new(0.04, 2.5, 0.04, 0.3, -0.5).unwrap().into();
    let strikes = [80.0, 100.0, 120.0];
    let maturities = [date(2020, 3, 30), date(2020, 12, 31)];
    let grid = FourierPricer::default().price_grid(&heston, &env, &strikes, &maturities, OptionType::Call);
    assert_eq!(grid.len(), 6);
    for point in &grid {
        let single = price(&heston, &env, point.strike, point.maturity, OptionType::Call);
        assert_eq!(point.result.as_ref().unwrap().price, single);
    }
}

// ─── Properties ───────────────────────────────────────────────────────────────

fn any_model() -> impl Strategy<Value = ModelParameters> {
    let jumps = (0.0..2.0f64, -0.4..0.2f64, 0.0..0.4f64)
        .prop_map(|(l, m, d)| JumpParameters::new(l, m, d).unwrap());
    let heston = (0.005..0.2f64, 0.3..5.0f64, 0.005..0.2f64, 0.05..1.0f64, -0.95..0.5f64)
        .prop_map(|(v0, k, th, xi, rho)| HestonParameters::new(v0, k, th, xi, rho).unwrap());
    prop_oneof![
        (0.05..0.6f64).prop_map(|s| ModelParameters::from(GbmParameters::new(s).unwrap())),
        (0.05..0.6f64, jumps.clone())
            .prop_map(|(s, j)| ModelParameters::from(MertonParameters::new(s, j).unwrap())),
        heston.clone().prop_map(ModelParameters::from),
        (heston, jumps).prop_map(|(h, j)| ModelParameters::from(BatesParameters::new(h, j))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_put_call_parity(
        model in any_model(),
        strike in 60.0..160.0f64,
        days in 30i64..730,
        rate in -0.01..0.08f64,
    ) {
        let today = date(2020, 1, 1);
        let expiry = today + chrono::Duration::days(days);
        let env = environment(today, 100.0, rate);
        let t = env.time_to(expiry);
        let put = price(&model, &env, strike, expiry, OptionType::Put);
        let call = price(&model, &env, strike, expiry, OptionType::Call);
        prop_assert!(put >= 0.0 && call >= 0.0);
        prop_assert!((call - put - (100.0 - strike * (-rate * t).exp())).abs() < 1e-6);
    }

    #[test]
    fn prop_monotone_in_strike(
        model in any_model(),
        strike in 60.0..150.0f64,
        bump in 1.0..10.0f64,
        days in 30i64..730,
    ) {
        let today = date(2020, 1, 1);
        let expiry = today + chrono::Duration::days(days);
        let env = environment(today, 100.0, 0.02);
        let c1 = price(&model, &env, strike, expiry, OptionType::Call);
        let c2 = price(&model, &env, strike + bump, expiry, OptionType::Call);
        let p1 = price(&model, &env, strike, expiry, OptionType::Put);
        let p2 = price(&model, &env, strike + bump, expiry, OptionType::Put);
        prop_assert!(c2 <= c1 + 1e-8);
        prop_assert!(p2 >= p1 - 1e-8);
    }

    #[test]
    fn prop_monotone_in_spot(
        model in any_model(),
        spot in 60.0..150.0f64,
        bump in 1.0..10.0f64,
        days in 30i64..730,
    ) {
        let today = date(2020, 1, 1);
        let expiry = today + chrono::Duration::days(days);
        let env = environment(today, spot, 0.02);
        let bumped = env.with_constant(keys::INITIAL_VALUE, spot + bump);
        let p1 = price(&model, &env, 100.0, expiry, OptionType::Put);
        let p2 = price(&model, &bumped, 100.0, expiry, OptionType::Put);
        let c1 = price(&model, &env, 100.0, expiry, OptionType::Call);
        let c2 = price(&model, &bumped, 100.0, expiry, OptionType::Call);
        prop_assert!(p2 <= p1 + 1e-8, "put {p1} -> {p2}");
        prop_assert!(c2 >= c1 - 1e-8, "call {c1} -> {c2}");
    }
}
