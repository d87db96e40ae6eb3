//! # fp-methods
//!
//! Numerical methods used to cross-check the Fourier engine.
//!
//! # Modules
//!
//! * [`monte_carlo`]: terminal-spot simulation for the four models and a seeded,
//!   chunked Monte Carlo [`SimulationEngine`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo simulation: path generation, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{
    EuropeanPathPricer, MonteCarloEngine, MonteCarloSettings, PathGenerator, SimulationEngine,
    SimulationEstimate,
};
