//! Numerical integration.
//!
//! Provides the Gauss-Legendre rule on [−1, 1] and a composite version
//! that tiles a finite interval with equal panels. The composite rule only
//! hands out `(abscissa, weight)` pairs; callers decide how the integrand
//! is evaluated (serially or in parallel) and how the weighted terms are
//! reduced.

pub mod composite;
pub mod gaussianquadratures;

pub use composite::CompositeGaussLegendre;
pub use gaussianquadratures::{GaussLegendreIntegration, GaussianQuadrature};
