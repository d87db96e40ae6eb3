//! Analytic European option engine (Black-Scholes).
//!
//! Closed-form price for the GBM model. The Fourier engine reproduces it to
//! integration tolerance, which makes it the natural regression reference.

use fp_core::{ensure, Price, Rate, Real, Result, Time, Volatility};
use fp_instruments::{OptionSpec, OptionType};
use fp_math::normal_cdf;
use fp_models::{GbmParameters, MarketEnvironment};

/// Closed-form Black-Scholes engine.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEuropeanEngine;

impl AnalyticEuropeanEngine {
    /// Price `option` under `params` in `env`.
    pub fn price(
        &self,
        params: &GbmParameters,
        env: &MarketEnvironment,
        option: &OptionSpec,
    ) -> Result<Price> {
        params.validate()?;
        option.validate()?;
        let t = env.time_to(option.maturity);
        ensure!(t > 0.0, "maturity {} is not after the pricing date", option.maturity);
        Ok(black_scholes_price(
            option.option_type,
            env.spot()?,
            option.strike,
            env.short_rate()?,
            params.volatility,
            t,
        ))
    }
}

/// Black-Scholes price of a European option (no dividends).
///
/// At or past expiry the intrinsic value is returned.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Price {
    let phi = option_type.sign();
    let t = time_to_expiry;
    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let std_dev = volatility * t.sqrt();
    let df = (-rate * t).exp();
    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if spot > strike * df { 1e15 } else { -1e15 };
        (big, big)
    };

    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}
