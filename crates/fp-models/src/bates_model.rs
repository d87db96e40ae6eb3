//! Bates (1996) stochastic volatility with jumps.
//!
//! Heston dynamics plus an independent Merton compound-Poisson jump term;
//! the characteristic function is the product of the two, i.e. the sum of
//! their exponents.

use crate::heston_model::HestonParameters;
use crate::merton_model::JumpParameters;
use crate::model::CharacteristicFunction;
use crate::Complex;
use fp_core::{Rate, Result, Time};

/// Bates model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatesParameters {
    /// Stochastic-volatility part.
    pub heston: HestonParameters,
    /// Jump part.
    pub jumps: JumpParameters,
}

impl BatesParameters {
    /// Combine already-validated components.
    pub fn new(heston: HestonParameters, jumps: JumpParameters) -> Self {
        Self { heston, jumps }
    }

    /// Validate both components.
    pub fn validate(&self) -> Result<()> {
        self.heston.validate()?;
        self.jumps.validate()
    }
}

impl CharacteristicFunction for BatesParameters {
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex {
        self.heston.log_characteristic(u, t, r) + self.jumps.log_characteristic(u, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn heston() -> HestonParameters {
        HestonParameters::new(0.04, 2.0, 0.04, 0.3, -0.7).unwrap()
    }

    #[test]
    fn zero_intensity_reduces_to_heston() {
        let bates = BatesParameters::new(heston(), JumpParameters::new(0.0, -0.1, 0.15).unwrap());
        for k in 0..25 {
            let u = Complex::new(0.4 * k as f64, -0.5);
            let a = bates.characteristic_function(u, 1.0, 0.05).unwrap();
            let b = heston().characteristic_function(u, 1.0, 0.05).unwrap();
            assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn product_of_components() {
        let jumps = JumpParameters::new(0.5, -0.1, 0.15).unwrap();
        let bates = BatesParameters::new(heston(), jumps);
        let u = Complex::new(1.3, -0.5);
        let a = bates.characteristic_function(u, 0.7, 0.05).unwrap();
        let b = heston().characteristic_function(u, 0.7, 0.05).unwrap() * jumps.log_characteristic(u, 0.7).exp();
        assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-14);
    }
}
