//! Monte Carlo versus Fourier benchmark harness.

use crate::report::{BenchmarkReport, BenchmarkRow, Comparison};
use fp_core::Real;
use fp_instruments::OptionType;
use fp_methods::SimulationEngine;
use fp_models::{keys, MarketEnvironment, ModelParameters};
use fp_pricingengines::FourierPricer;
use fp_time::Date;
use log::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs a simulation engine and the Fourier pricer side by side.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness<S: SimulationEngine> {
    engine: S,
    pricer: FourierPricer,
}

impl<S: SimulationEngine> BenchmarkHarness<S> {
    /// Pair a simulation engine with a Fourier pricer.
    pub fn new(engine: S, pricer: FourierPricer) -> Self {
        Self { engine, pricer }
    }

    /// The simulation engine.
    pub fn engine(&self) -> &S {
        &self.engine
    }

    /// Compare both prices at every `maturity × strike` point.
    ///
    /// Each point gets its own environment derived from `env`. Rows come
    /// back maturity-major in input order.
    pub fn run(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        maturities: &[Date],
        strikes: &[Real],
        option_type: OptionType,
    ) -> BenchmarkReport {
        info!(
            "benchmarking {} {} on '{}': {} maturities × {} strikes",
            params.tag(),
            option_type,
            env.name(),
            maturities.len(),
            strikes.len()
        );

        let points: Vec<(Date, Real)> = maturities
            .iter()
            .flat_map(|&m| strikes.iter().map(move |&k| (m, k)))
            .collect();

        #[cfg(feature = "parallel")]
        let iter = points.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = points.iter();

        let rows = iter
            .map(|&(maturity, strike)| self.compare_point(params, env, maturity, strike, option_type))
            .collect();

        BenchmarkReport {
            name: env.name().to_string(),
            model: params.tag(),
            option_type,
            rows,
        }
    }

    fn compare_point(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        maturity: Date,
        strike: Real,
        option_type: OptionType,
    ) -> BenchmarkRow {
        let point_env = env
            .with_constant(keys::STRIKE, strike)
            .with_date(keys::MATURITY, maturity);
        let comparison = point_env
            .option_spec(option_type)
            .and_then(|option| {
                let mcs = self.engine.simulate_and_price(params, &point_env, &option)?;
                let fourier = self.pricer.price(params, &point_env, &option)?;
                Ok(Comparison::compared(mcs.price, fourier.price))
            })
            .unwrap_or_else(|e| {
                warn!("{} K = {strike} maturity {maturity}: comparison unavailable: {e}", params.tag());
                Comparison::Unavailable {
                    reason: e.to_string(),
                }
            });

        BenchmarkRow {
            maturity,
            time_to_maturity: point_env.time_to(maturity),
            strike,
            comparison,
        }
    }
}
