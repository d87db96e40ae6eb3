//! # fp-benchmark
//!
//! Compares a [`SimulationEngine`](fp_methods::SimulationEngine) against the
//! [`FourierPricer`](fp_pricingengines::FourierPricer) over a grid of
//! maturities × strikes and renders the result as a text table.
//!
//! The harness holds no pricing logic of its own. A grid point whose
//! simulation or Fourier price fails is kept in the report as
//! [`Comparison::Unavailable`] and the run continues.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod harness;
pub mod report;

pub use harness::BenchmarkHarness;
pub use report::{BenchmarkReport, BenchmarkRow, Comparison};
