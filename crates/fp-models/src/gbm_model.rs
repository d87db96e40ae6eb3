//! Geometric Brownian motion.

use crate::model::CharacteristicFunction;
use crate::Complex;
use fp_core::{ensure, Rate, Result, Time, Volatility};

/// Black-Scholes dynamics `dS = r S dt + σ S dW`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParameters {
    /// Diffusion volatility `σ`.
    pub volatility: Volatility,
}

impl GbmParameters {
    /// Create and validate.
    pub fn new(volatility: Volatility) -> Result<Self> {
        let p = Self { volatility };
        p.validate()?;
        Ok(p)
    }

    /// `σ` must be positive and finite.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.volatility.is_finite() && self.volatility > 0.0,
            "volatility must be positive and finite, got {}",
            self.volatility
        );
        Ok(())
    }
}

impl CharacteristicFunction for GbmParameters {
    /// `iu(r − σ²/2)T − ½σ²u²T`
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex {
        let var = self.volatility * self.volatility;
        let iu = Complex::i() * u;
        iu * ((r - 0.5 * var) * t) - 0.5 * var * t * u * u
    }
}
