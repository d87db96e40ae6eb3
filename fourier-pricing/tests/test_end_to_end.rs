//! End-to-end valuation through the façade.

use approx::assert_abs_diff_eq;
use fourier_pricing::prelude::*;
use fourier_pricing::pricingengines::AnalyticEuropeanEngine;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn environment() -> MarketEnvironment {
    MarketEnvironment::builder("reference", date(2020, 1, 1))
        .with_constant(keys::INITIAL_VALUE, 100.0)
        .with_constant(keys::SHORT_RATE, 0.01)
        .with_constant(keys::VOLATILITY, 0.2)
        .with_constant(keys::LAMBDA, 0.3)
        .with_constant(keys::MU, -0.2)
        .with_constant(keys::DELTA, 0.1)
        .with_constant(keys::V0, 0.04)
        .with_constant(keys::KAPPA, 2.5)
        .with_constant(keys::THETA, 0.04)
        .with_constant(keys::VOL_OF_VOL, 0.3)
        .with_constant(keys::RHO, -0.5)
        .with_constant(keys::STRIKE, 100.0)
        .with_date(keys::MATURITY, date(2020, 3, 30))
        .build()
        .unwrap()
}

#[test]
fn test_every_model_prices_with_parity() {
    let env = environment();
    let pricer = FourierPricer::default();
    let t = env.time_to(date(2020, 3, 30));
    let forward_gap = 100.0 - 100.0 * (-0.01 * t).exp();
    for tag in ModelTag::ALL {
        let params = ModelParameters::from_environment(tag, &env).unwrap();
        let put = pricer.price(&params, &env, &env.option_spec(OptionType::Put).unwrap()).unwrap();
        let call = pricer.price(&params, &env, &env.option_spec(OptionType::Call).unwrap()).unwrap();
        assert_eq!(put.model, tag);
        assert!(put.price > 0.0 && call.price > 0.0);
        assert_abs_diff_eq!(call.price - put.price, forward_gap, epsilon = 1e-9);
        assert!(put.diagnostics.evaluations > 0);
        assert!(put.diagnostics.upper_limit >= 32.0);
    }
}

#[test]
fn test_derived_environment_is_a_new_input() {
    let env = environment();
    let pricer = FourierPricer::default();
    let params = ModelParameters::from_environment(ModelTag::StochasticVolatility, &env).unwrap();
    let atm = pricer.price(&params, &env, &env.option_spec(OptionType::Put).unwrap()).unwrap();

    let shifted = env.with_constant(keys::STRIKE, 110.0);
    let otm = pricer.price(&params, &shifted, &shifted.option_spec(OptionType::Put).unwrap()).unwrap();
    assert!(otm.price > atm.price);

    let again = pricer.price(&params, &env, &env.option_spec(OptionType::Put).unwrap()).unwrap();
    assert_eq!(atm, again);
}

#[test]
fn test_put_decreases_with_spot() {
    let pricer = FourierPricer::default();
    let base = environment();
    let params = ModelParameters::from_environment(ModelTag::StochVolJumpDiffusion, &base).unwrap();
    let option = base.option_spec(OptionType::Put).unwrap();
    let prices: Vec<Real> = [90.0, 95.0, 100.0, 105.0, 110.0]
        .iter()
        .map(|&s| {
            let env = base.with_constant(keys::INITIAL_VALUE, s);
            pricer.price(&params, &env, &option).unwrap().price
        })
        .collect();
    assert!(prices.windows(2).all(|w| w[1] <= w[0]));
}

#[test]
fn test_actual_360_changes_the_horizon() {
    let env = environment();
    let env_360 = MarketEnvironment::builder("act360", env.pricing_date())
        .with_day_counter(DayCounterKind::Actual360)
        .with_environment(&env)
        .build()
        .unwrap();
    let gbm = GbmParameters::new(env.constant(keys::VOLATILITY).unwrap()).unwrap();
    let option = env.option_spec(OptionType::Call).unwrap();
    let res = FourierPricer::default()
        .price(&ModelParameters::from(gbm), &env_360, &option)
        .unwrap();
    assert_abs_diff_eq!(res.time_to_maturity, 89.0 / 360.0, epsilon = 1e-15);
    let closed_form = AnalyticEuropeanEngine.price(&gbm, &env_360, &option).unwrap();
    assert_abs_diff_eq!(res.price, closed_form, epsilon = 1e-7);
    let act_365 = AnalyticEuropeanEngine.price(&gbm, &env, &option).unwrap();
    assert!(closed_form > act_365);
}

#[test]
fn test_benchmark_report_for_reference_grid() {
    let env = environment();
    let engine = MonteCarloEngine::new(MonteCarloSettings::default().with_paths(20_000)).unwrap();
    let harness = BenchmarkHarness::new(engine, FourierPricer::default());
    let params = ModelParameters::from_environment(ModelTag::JumpDiffusion, &env).unwrap();
    let report = harness.run(
        &params,
        &env,
        &[date(2020, 3, 30), date(2020, 12, 31)],
        &[90.0, 100.0, 110.0],
        OptionType::Put,
    );
    assert_eq!(report.rows.len(), 6);
    assert_eq!(report.unavailable_count(), 0);
    assert!(report.max_abs_deviation().unwrap() < 0.5);
    assert!(report.to_string().starts_with("reference | Merton jump diffusion | Put"));
}
