//! Composite Gauss-Legendre rule on a finite interval.

use super::gaussianquadratures::{GaussLegendreIntegration, GaussianQuadrature};
use fp_core::Real;

/// Tiles `[a, b]` with `panels` equal sub-intervals and applies a fixed
/// Gauss-Legendre rule on each.
///
/// Doubling the panel count is the refinement step used by the Fourier
/// integrator; the difference between two successive refinements serves
/// as the a-posteriori error estimate.
#[derive(Debug, Clone)]
pub struct CompositeGaussLegendre {
    rule: GaussianQuadrature,
}

impl CompositeGaussLegendre {
    /// Create a composite rule using `order` nodes per panel.
    pub fn new(order: usize) -> Self {
        Self {
            rule: GaussLegendreIntegration::new(order.max(1)),
        }
    }

    /// Nodes per panel.
    pub fn order(&self) -> usize {
        self.rule.order()
    }

    /// All `(abscissa, weight)` pairs on `[a, b]`, panel by panel in
    /// ascending abscissa order. Weights already include the panel
    /// Jacobian, so `Σ wᵢ f(xᵢ) ≈ ∫ₐᵇ f`.
    pub fn nodes(&self, a: Real, b: Real, panels: usize) -> Vec<(Real, Real)> {
        let panels = panels.max(1);
        let h = (b - a) / panels as Real;
        let half = 0.5 * h;
        let mut nodes = Vec::with_capacity(panels * self.order());
        for p in 0..panels {
            let mid = a + (p as Real + 0.5) * h;
            nodes.extend(
                self.rule
                    .x()
                    .iter()
                    .zip(self.rule.w().iter())
                    .map(|(&xi, &wi)| (mid + half * xi, half * wi)),
            );
        }
        nodes
    }

    /// Serial composite integration of `f` on `[a, b]`.
    pub fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real, panels: usize) -> Real {
        let terms: Vec<Real> = self
            .nodes(a, b, panels)
            .into_iter()
            .map(|(x, w)| w * f(x))
            .collect();
        crate::summation::pairwise_sum(&terms)
    }
}
