//! Chunked, seeded Monte Carlo engine.

use super::{EuropeanPathPricer, PathGenerator};
use fp_core::{ensure, fail, Error, Price, Real, Result, Size, Time};
use fp_instruments::OptionSpec;
use fp_math::{derive_seed, Statistics};
use fp_models::{MarketEnvironment, ModelParameters, ModelTag};
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A price estimate produced by a simulation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationEstimate {
    /// Sample mean of the discounted payoff.
    pub price: Price,
    /// Standard error of the mean.
    pub std_error: Real,
    /// Number of simulated paths.
    pub samples: Size,
}

/// An engine that prices a European option by simulation.
///
/// The benchmark harness treats implementations as opaque and possibly
/// slow; failures are reported per call and never abort a batch.
pub trait SimulationEngine: Send + Sync {
    /// Simulate and average the discounted payoff of `option`.
    fn simulate_and_price(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        option: &OptionSpec,
    ) -> Result<SimulationEstimate>;
}

/// Monte Carlo configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloSettings {
    /// Total number of paths.
    pub paths: usize,
    /// Time steps per year for the stochastic-volatility models.
    pub steps_per_year: usize,
    /// Base seed; chunk `i` uses `derive_seed(seed, i)`.
    pub seed: u64,
    /// Number of independently seeded chunks.
    pub chunks: usize,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            paths: 50_000,
            steps_per_year: 100,
            seed: 42,
            chunks: 32,
        }
    }
}

impl MonteCarloSettings {
    /// Set the path count.
    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    /// Set the time-step density.
    pub fn with_steps_per_year(mut self, steps: usize) -> Self {
        self.steps_per_year = steps;
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the chunk count.
    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = chunks;
        self
    }

    /// At least two paths, one step per year and one chunk.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.paths >= 2, "need at least 2 paths, got {}", self.paths);
        ensure!(self.steps_per_year >= 1, "need at least 1 step per year");
        ensure!(self.chunks >= 1, "need at least 1 chunk");
        Ok(())
    }
}

/// Plain Monte Carlo engine (no variance reduction).
///
/// Paths are split into `chunks` fixed-size groups, each with its own
/// derived seed. Chunk statistics are merged in chunk order, so the
/// estimate depends only on the settings, not on the thread count.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    settings: MonteCarloSettings,
}

impl MonteCarloEngine {
    /// Create an engine from validated settings.
    pub fn new(settings: MonteCarloSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The settings in use.
    pub fn settings(&self) -> &MonteCarloSettings {
        &self.settings
    }

    /// Steps for a horizon `t`: one exact step for GBM and Merton.
    fn steps_for(&self, tag: ModelTag, t: Time) -> usize {
        match tag {
            ModelTag::Gbm | ModelTag::JumpDiffusion => 1,
            ModelTag::StochasticVolatility | ModelTag::StochVolJumpDiffusion => {
                ((t * self.settings.steps_per_year as Real).ceil() as usize).max(1)
            }
        }
    }
}

fn split_paths(n_paths: usize, n_chunks: usize) -> Vec<usize> {
    let chunks = n_chunks.max(1);
    let base = n_paths / chunks;
    let rem = n_paths % chunks;
    (0..chunks)
        .map(|i| if i < rem { base + 1 } else { base })
        .filter(|&n| n > 0)
        .collect()
}

impl SimulationEngine for MonteCarloEngine {
    fn simulate_and_price(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        option: &OptionSpec,
    ) -> Result<SimulationEstimate> {
        params.validate()?;
        option.validate()?;
        env.validate()?;
        let spot = env.spot()?;
        let rate = env.short_rate()?;
        let t = env.time_to(option.maturity);
        ensure!(
            t > 0.0,
            "maturity {} is not after the pricing date {}",
            option.maturity,
            env.pricing_date()
        );

        let steps = self.steps_for(params.tag(), t);
        let pricer = EuropeanPathPricer::new(option.payoff(), (-rate * t).exp());
        let chunks = split_paths(self.settings.paths, self.settings.chunks);
        let seed = self.settings.seed;

        let run_chunk = |(i, &n): (usize, &usize)| {
            let mut generator = PathGenerator::new(*params, spot, rate, t, steps, derive_seed(seed, i as u64));
            let mut stats = Statistics::new();
            for _ in 0..n {
                stats.add(pricer.value(generator.next_terminal()));
            }
            stats
        };

        #[cfg(feature = "parallel")]
        let partials: Vec<Statistics> = chunks.par_iter().enumerate().map(run_chunk).collect();
        #[cfg(not(feature = "parallel"))]
        let partials: Vec<Statistics> = chunks.iter().enumerate().map(run_chunk).collect();

        let mut stats = Statistics::new();
        for partial in &partials {
            stats.merge(partial);
        }

        let price = stats
            .mean()
            .ok_or_else(|| Error::ExternalEngine("simulation produced no samples".into()))?;
        let std_error = stats.error_estimate().unwrap_or(0.0);
        if !price.is_finite() {
            fail!(Error::ExternalEngine(format!(
                "simulation of {} produced a non-finite price",
                params.tag()
            )));
        }

        debug!(
            "{} {} K = {} T = {t:.4}: MC {price:.4} ± {std_error:.4} ({} paths, {steps} steps)",
            params.tag(),
            option.option_type,
            option.strike,
            stats.samples()
        );

        Ok(SimulationEstimate {
            price,
            std_error,
            samples: stats.samples(),
        })
    }
}
