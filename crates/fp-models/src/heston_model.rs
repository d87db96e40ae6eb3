//! Heston (1993) stochastic-volatility model.
//!
//! ```text
//! dS = r S dt + √v S dW₁
//! dv = κ(θ − v) dt + ξ √v dW₂,     d⟨W₁, W₂⟩ = ρ dt
//! ```
//!
//! The characteristic function uses the "little Heston trap" form of
//! Albrecher, Mayer, Schoutens & Tistaert (2007), which stays on the
//! principal branch of the complex logarithm for long maturities. The
//! ratio `(β − d)/ξ²` is evaluated as `−(u² + iu)/(β + d)` so the
//! formula keeps full precision as `ξ → 0`, where it converges to GBM with
//! the integrated deterministic variance.

use crate::model::CharacteristicFunction;
use crate::Complex;
use fp_core::{ensure, Rate, Real, Result, Time};

/// Heston model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParameters {
    /// Initial variance `v₀`.
    pub v0: Real,
    /// Mean-reversion speed `κ`.
    pub kappa: Real,
    /// Long-run variance `θ`.
    pub theta: Real,
    /// Volatility of variance `ξ`.
    pub vol_of_vol: Real,
    /// Spot/variance correlation `ρ`.
    pub rho: Real,
}

impl HestonParameters {
    /// Create and validate.
    pub fn new(v0: Real, kappa: Real, theta: Real, vol_of_vol: Real, rho: Real) -> Result<Self> {
        let p = Self {
            v0,
            kappa,
            theta,
            vol_of_vol,
            rho,
        };
        p.validate()?;
        Ok(p)
    }

    /// `v₀ ≥ 0`, `κ, θ, ξ > 0`, `ρ ∈ [−1, 1]`.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.v0.is_finite() && self.v0 >= 0.0,
            "initial variance must be non-negative, got {}",
            self.v0
        );
        ensure!(
            self.kappa.is_finite() && self.kappa > 0.0,
            "mean-reversion speed must be positive, got {}",
            self.kappa
        );
        ensure!(
            self.theta.is_finite() && self.theta > 0.0,
            "long-run variance must be positive, got {}",
            self.theta
        );
        ensure!(
            self.vol_of_vol.is_finite() && self.vol_of_vol > 0.0,
            "vol of vol must be positive, got {}",
            self.vol_of_vol
        );
        ensure!(
            (-1.0..=1.0).contains(&self.rho),
            "correlation must lie in [-1, 1], got {}",
            self.rho
        );
        Ok(())
    }

    /// Feller condition `2κθ ≥ ξ²`: the variance process stays strictly
    /// positive.
    pub fn feller_satisfied(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.vol_of_vol * self.vol_of_vol
    }
}

impl CharacteristicFunction for HestonParameters {
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex {
        let one = Complex::new(1.0, 0.0);
        let iu = Complex::i() * u;
        let xi2 = self.vol_of_vol * self.vol_of_vol;

        let beta = self.kappa - self.rho * self.vol_of_vol * iu;
        let quad = u * u + iu;
        let mut d = (beta * beta + xi2 * quad).sqrt();
        if d.re < 0.0 {
            d = -d;
        }

        let beta_plus_d = beta + d;
        // (β − d)/ξ²
        let c = -quad / beta_plus_d;
        let g = c * xi2 / beta_plus_d;
        let e = (-d * t).exp();

        // ln((1 − g e)/(1 − g)) / ξ² = q · log1p(z)/z  with  z = q ξ²
        let q = c / beta_plus_d * (one - e) / (one - g);
        let log_term = q * log1p_over_z(q * xi2);

        let a = self.kappa * self.theta * (c * t - 2.0 * log_term);
        let b = self.v0 * c * (one - e) / (one - g * e);
        iu * (r * t) + a + b
    }
}

/// `ln(1 + z) / z`, continuous at `z = 0`.
fn log1p_over_z(z: Complex) -> Complex {
    if z.norm() < 1e-4 {
        // 1 − z/2 + z²/3 − z³/4
        let one = Complex::new(1.0, 0.0);
        one - z * (0.5 - z * (1.0 / 3.0 - 0.25 * z))
    } else {
        one_plus(z).ln() / z
    }
}

fn one_plus(z: Complex) -> Complex {
    Complex::new(1.0 + z.re, z.im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GbmParameters;
    use approx::assert_abs_diff_eq;
    use fp_core::Error;

    fn params() -> HestonParameters {
        HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7).unwrap()
    }

    #[test]
    fn validation() {
        assert!(matches!(HestonParameters::new(-0.01, 2.0, 0.04, 0.3, -0.7), Err(Error::InvalidParameters(_))));
        assert!(matches!(HestonParameters::new(0.04, 0.0, 0.04, 0.3, -0.7), Err(Error::InvalidParameters(_))));
        assert!(matches!(HestonParameters::new(0.04, 2.0, 0.0, 0.3, -0.7), Err(Error::InvalidParameters(_))));
        assert!(matches!(HestonParameters::new(0.04, 2.0, 0.04, 0.0, -0.7), Err(Error::InvalidParameters(_))));
        assert!(matches!(HestonParameters::new(0.04, 2.0, 0.04, 0.3, -1.01), Err(Error::InvalidParameters(_))));
        assert!(HestonParameters::new(0.0, 2.0, 0.04, 0.3, 1.0).is_ok());
    }

    #[test]
    fn feller() {
        assert!(params().feller_satisfied());
        let p = HestonParameters::new(0.04, 0.5, 0.04, 1.0, -0.7).unwrap();
        assert!(!p.feller_satisfied());
    }

    #[test]
    fn martingale_condition() {
        let p = params();
        for t in [0.1, 1.0, 10.0] {
            let v = p.characteristic_function(Complex::new(0.0, -1.0), t, 0.05).unwrap();
            assert_abs_diff_eq!(v.re, (0.05 * t).exp(), epsilon = 1e-12);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn vanishing_vol_of_vol_is_gbm_with_constant_variance() {
        // v0 = θ keeps the variance at θ when ξ → 0.
        let p = HestonParameters::new(0.04, 1.5, 0.04, 1e-8, 0.3).unwrap();
        let gbm = GbmParameters::new(0.2).unwrap();
        for k in 0..30 {
            let u = Complex::new(0.5 * k as f64, -0.5);
            let a = p.characteristic_function(u, 2.0, 0.01).unwrap();
            let b = gbm.characteristic_function(u, 2.0, 0.01).unwrap();
            assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn long_maturity_stays_finite_and_bounded() {
        let p = params();
        for k in 0..200 {
            let u = Complex::new(0.25 * k as f64, 0.0);
            let v = p.characteristic_function(u, 30.0, 0.0).unwrap();
            assert!(v.norm() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn log1p_series_matches_direct_evaluation() {
        let z = Complex::new(3e-5, -2e-5);
        let direct = one_plus(z).ln() / z;
        assert_abs_diff_eq!((log1p_over_z(z) - direct).norm(), 0.0, epsilon = 1e-11);
        assert_eq!(log1p_over_z(Complex::new(0.0, 0.0)), Complex::new(1.0, 0.0));
    }
}
