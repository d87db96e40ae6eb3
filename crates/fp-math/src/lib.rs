//! # fp-math
//!
//! Mathematical utilities: Gauss-Legendre quadrature, order-independent
//! summation, the normal distribution (via statrs), seeded random number
//! generation and a statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Normal distribution functions.
pub mod distributions;

/// Numerical integration rules.
pub mod integrals;

/// Seeded random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

/// Reproducible floating-point summation.
pub mod summation;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use integrals::{CompositeGaussLegendre, GaussLegendreIntegration, GaussianQuadrature};
pub use random_numbers::{derive_seed, MersenneTwisterRng};
pub use statistics::Statistics;
pub use summation::pairwise_sum;
