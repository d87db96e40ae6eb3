//! Merton (1976) jump diffusion.
//!
//! Log-returns are a Brownian motion with drift plus a compound Poisson
//! process of normally distributed log-jumps `Y ~ N(μ, δ²)` arriving at
//! rate `λ`. The drift carries the compensator `−λk` with
//! `k = E[e^Y − 1] = e^{μ + δ²/2} − 1`, keeping the discounted spot a
//! martingale.

use crate::gbm_model::GbmParameters;
use crate::model::CharacteristicFunction;
use crate::Complex;
use fp_core::{ensure, Rate, Real, Result, Time, Volatility};

/// Compound-Poisson log-normal jump parameters shared by Merton and Bates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpParameters {
    /// Jump intensity `λ` (jumps per year).
    pub lambda: Real,
    /// Mean log-jump size `μ`.
    pub mu: Real,
    /// Log-jump size volatility `δ`.
    pub delta: Real,
}

impl JumpParameters {
    /// Create and validate.
    pub fn new(lambda: Real, mu: Real, delta: Real) -> Result<Self> {
        let p = Self { lambda, mu, delta };
        p.validate()?;
        Ok(p)
    }

    /// `λ ≥ 0`, `δ ≥ 0`, all finite.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.lambda.is_finite() && self.lambda >= 0.0,
            "jump intensity must be non-negative and finite, got {}",
            self.lambda
        );
        ensure!(self.mu.is_finite(), "mean jump size must be finite, got {}", self.mu);
        ensure!(
            self.delta.is_finite() && self.delta >= 0.0,
            "jump volatility must be non-negative and finite, got {}",
            self.delta
        );
        Ok(())
    }

    /// Mean relative jump `k = e^{μ + δ²/2} − 1`.
    pub fn jump_compensator(&self) -> Real {
        (self.mu + 0.5 * self.delta * self.delta).exp_m1()
    }

    /// Exponent of the compensated jump part:
    /// `λT(e^{iuμ − δ²u²/2} − 1) − iuλkT`.
    pub fn log_characteristic(&self, u: Complex, t: Time) -> Complex {
        if self.lambda == 0.0 {
            return Complex::new(0.0, 0.0);
        }
        let iu = Complex::i() * u;
        let jump = (iu * self.mu - 0.5 * self.delta * self.delta * u * u).exp() - 1.0;
        self.lambda * t * jump - iu * (self.lambda * self.jump_compensator() * t)
    }
}

/// Merton jump diffusion: GBM plus [`JumpParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MertonParameters {
    /// Diffusion volatility `σ`.
    pub volatility: Volatility,
    /// Jump component.
    pub jumps: JumpParameters,
}

impl MertonParameters {
    /// Create and validate.
    pub fn new(volatility: Volatility, jumps: JumpParameters) -> Result<Self> {
        let p = Self { volatility, jumps };
        p.validate()?;
        Ok(p)
    }

    /// Validate diffusion and jump parts.
    pub fn validate(&self) -> Result<()> {
        self.diffusion().validate()?;
        self.jumps.validate()
    }

    /// The pure-diffusion part.
    pub fn diffusion(&self) -> GbmParameters {
        GbmParameters {
            volatility: self.volatility,
        }
    }
}

impl CharacteristicFunction for MertonParameters {
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex {
        self.diffusion().log_characteristic(u, t, r) + self.jumps.log_characteristic(u, t)
    }
}
