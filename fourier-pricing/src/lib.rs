//! # fourier-pricing
//!
//! Fourier-transform pricing of European vanilla options under geometric
//! Brownian motion, Merton jump diffusion, Heston stochastic volatility and
//! Bates stochastic volatility with jumps, with a Monte Carlo engine and a
//! benchmark harness to cross-check the prices.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `fp-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use fourier_pricing::prelude::*;
//!
//! let today = Date::from_ymd_opt(2020, 1, 1).unwrap();
//! let env = MarketEnvironment::builder("gbm", today)
//!     .with_constant(keys::INITIAL_VALUE, 100.0)
//!     .with_constant(keys::SHORT_RATE, 0.01)
//!     .with_constant(keys::VOLATILITY, 0.2)
//!     .with_constant(keys::STRIKE, 100.0)
//!     .with_date(keys::MATURITY, Date::from_ymd_opt(2020, 3, 30).unwrap())
//!     .build()?;
//!
//! let params = ModelParameters::from_environment(ModelTag::Gbm, &env)?;
//! let put = FourierPricer::default().price(&params, &env, &env.option_spec(OptionType::Put)?)?;
//! assert!((put.price - 3.81).abs() < 0.05);
//! # Ok::<(), fourier_pricing::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use fp_core as core;

/// Dates and day counters.
pub use fp_time as time;

/// Quadrature, summation, RNG and statistics.
pub use fp_math as math;

/// Option specifications and payoffs.
pub use fp_instruments as instruments;

/// Market environments, model parameters and characteristic functions.
pub use fp_models as models;

/// Fourier and closed-form pricing engines.
pub use fp_pricingengines as pricingengines;

/// Monte Carlo simulation.
pub use fp_methods as methods;

/// Monte Carlo versus Fourier benchmark harness.
pub use fp_benchmark as benchmark;

/// The types needed for a typical valuation.
pub mod prelude {
    pub use fp_benchmark::{BenchmarkHarness, BenchmarkReport, Comparison};
    pub use fp_core::{Error, Real, Result};
    pub use fp_instruments::{OptionSpec, OptionType};
    pub use fp_methods::{MonteCarloEngine, MonteCarloSettings, SimulationEngine};
    pub use fp_models::{
        keys, BatesParameters, CharacteristicFunction, GbmParameters, HestonParameters,
        JumpParameters, MarketEnvironment, MertonParameters, ModelParameters, ModelTag,
    };
    pub use fp_pricingengines::{FourierPricer, IntegrationSettings, PricingResult};
    pub use fp_time::{Date, DayCounterKind};
}
