//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`PathGenerator`]: simulates the log-spot (and variance) of any
//!   [`ModelParameters`](fp_models::ModelParameters) on a uniform time grid
//! * [`EuropeanPathPricer`]: discounted payoff of a terminal spot
//! * [`MonteCarloEngine`]: splits the paths into seeded chunks, prices them
//!   (in parallel with the `parallel` feature) and merges the statistics
//! * [`SimulationEngine`]: the interface the benchmark harness consumes

mod engine;
mod path_generator;

pub use engine::{MonteCarloEngine, MonteCarloSettings, SimulationEngine, SimulationEstimate};
pub use path_generator::PathGenerator;

use fp_core::{DiscountFactor, Real};
use fp_instruments::PlainVanillaPayoff;

/// Discounted European payoff evaluated on the terminal spot.
#[derive(Debug, Clone, Copy)]
pub struct EuropeanPathPricer {
    payoff: PlainVanillaPayoff,
    discount: DiscountFactor,
}

impl EuropeanPathPricer {
    /// Create a pricer with payoff and discount factor.
    pub fn new(payoff: PlainVanillaPayoff, discount: DiscountFactor) -> Self {
        Self { payoff, discount }
    }

    /// Discounted payoff for terminal spot `s_t`.
    pub fn value(&self, s_t: Real) -> Real {
        self.payoff.value(s_t) * self.discount
    }
}
