//! Gauss-Legendre quadrature rule.
//!
//! Nodes are the roots of the Legendre polynomial `Pₙ`, located by Newton
//! iteration from the Tricomi initial guess; the three-term recurrence
//! `(k+1)P_{k+1} = (2k+1)x P_k − k P_{k−1}` evaluates `Pₙ` and its
//! derivative in `O(n)` per iterate. Weights are
//! `wᵢ = 2 / ((1 − xᵢ²) P'ₙ(xᵢ)²)`.

use fp_core::Real;
use std::f64::consts::PI;

/// Newton iterations per root before giving up on further refinement.
const MAX_NEWTON_ITERATIONS: usize = 100;

/// A Gauss quadrature rule defined by nodes and weights.
#[derive(Debug, Clone)]
pub struct GaussianQuadrature {
    x: Vec<Real>,
    w: Vec<Real>,
}

impl GaussianQuadrature {
    /// Quadrature nodes.
    pub fn x(&self) -> &[Real] {
        &self.x
    }

    /// Quadrature weights.
    pub fn w(&self) -> &[Real] {
        &self.w
    }

    /// Number of quadrature points.
    pub fn order(&self) -> usize {
        self.x.len()
    }

    /// Evaluate ∫ f(x) w(x) dx ≈ Σ wᵢ f(xᵢ).
    pub fn integrate<F: Fn(Real) -> Real>(&self, f: F) -> Real {
        self.x.iter().zip(self.w.iter()).map(|(&xi, &wi)| wi * f(xi)).sum()
    }
}

/// Gauss-Legendre quadrature on [−1, 1].
pub struct GaussLegendreIntegration;

impl GaussLegendreIntegration {
    /// Build a Gauss-Legendre quadrature of given `order`.
    ///
    /// Nodes are returned in ascending order.
    pub fn new(order: usize) -> GaussianQuadrature {
        let n = order;
        let mut x = vec![0.0; n];
        let mut w = vec![0.0; n];
        let nf = n as Real;

        // Roots are symmetric; solve for the upper half only.
        for i in 0..(n + 1) / 2 {
            let mut z = (PI * (i as Real + 0.75) / (nf + 0.5)).cos();
            let mut dp = 0.0;
            for _ in 0..MAX_NEWTON_ITERATIONS {
                let (p, d) = legendre_with_derivative(n, z);
                dp = d;
                let dz = p / d;
                z -= dz;
                if dz.abs() < 1e-15 {
                    break;
                }
            }
            let (_, d) = legendre_with_derivative(n, z);
            if d.is_finite() {
                dp = d;
            }
            let weight = 2.0 / ((1.0 - z * z) * dp * dp);
            x[i] = -z;
            x[n - 1 - i] = z;
            w[i] = weight;
            w[n - 1 - i] = weight;
        }

        GaussianQuadrature { x, w }
    }

    /// Integrate `f` on [a, b] by mapping to [−1, 1].
    pub fn integrate<F: Fn(Real) -> Real>(order: usize, f: F, a: Real, b: Real) -> Real {
        let q = Self::new(order);
        let half = 0.5 * (b - a);
        let mid = 0.5 * (a + b);
        q.x()
            .iter()
            .zip(q.w().iter())
            .map(|(&xi, &wi)| wi * f(mid + half * xi))
            .sum::<Real>()
            * half
    }
}

/// `(Pₙ(z), P'ₙ(z))` by upward recurrence.
fn legendre_with_derivative(n: usize, z: Real) -> (Real, Real) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 0..n {
        let p3 = p2;
        p2 = p1;
        let jf = j as Real;
        p1 = ((2.0 * jf + 1.0) * z * p2 - jf * p3) / (jf + 1.0);
    }
    let dp = n as Real * (z * p1 - p2) / (z * z - 1.0);
    (p1, dp)
}
