//! Model tags, the parameter union and the characteristic-function trait.

use crate::market_environment::{keys, MarketEnvironment};
use crate::{BatesParameters, Complex, GbmParameters, HestonParameters, JumpParameters, MertonParameters};
use fp_core::{Error, Rate, Result, Time};
use std::fmt;

/// Characteristic function of the log-return `ln(S_T / S₀)` under the
/// risk-neutral measure, drift `r` included.
///
/// Implementors provide the exponent `ln φ(u)`; products of independent
/// components (Heston × jumps) become sums of exponents. The provided
/// [`characteristic_function`](Self::characteristic_function) exponentiates
/// and rejects non-finite results.
///
/// Every implementation satisfies `φ(0) = 1` and the martingale condition
/// `φ(−i) = e^{rT}`.
pub trait CharacteristicFunction {
    /// `ln φ(u; T)` for complex `u`.
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex;

    /// `φ(u; T)` for complex `u`.
    ///
    /// # Errors
    /// [`Error::NumericalInstability`] when the value is not finite.
    fn characteristic_function(&self, u: Complex, t: Time, r: Rate) -> Result<Complex> {
        let value = self.log_characteristic(u, t, r).exp();
        if value.re.is_finite() && value.im.is_finite() {
            Ok(value)
        } else {
            Err(Error::NumericalInstability {
                frequency: u.re,
                detail: format!("characteristic function is {value} at u = {u}, T = {t}"),
            })
        }
    }
}

/// Which dynamics a parameter set describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelTag {
    /// Geometric Brownian motion.
    Gbm,
    /// Merton jump diffusion.
    JumpDiffusion,
    /// Heston stochastic volatility.
    StochasticVolatility,
    /// Bates stochastic volatility with jumps.
    StochVolJumpDiffusion,
}

impl ModelTag {
    /// All supported models.
    pub const ALL: [ModelTag; 4] = [
        ModelTag::Gbm,
        ModelTag::JumpDiffusion,
        ModelTag::StochasticVolatility,
        ModelTag::StochVolJumpDiffusion,
    ];
}

impl fmt::Display for ModelTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelTag::Gbm => "GBM",
            ModelTag::JumpDiffusion => "Merton jump diffusion",
            ModelTag::StochasticVolatility => "Heston",
            ModelTag::StochVolJumpDiffusion => "Bates",
        };
        f.write_str(name)
    }
}

/// Parameters of one of the four supported models.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelParameters {
    /// Geometric Brownian motion.
    Gbm(GbmParameters),
    /// Merton jump diffusion.
    JumpDiffusion(MertonParameters),
    /// Heston stochastic volatility.
    StochasticVolatility(HestonParameters),
    /// Bates stochastic volatility with jumps.
    StochVolJumpDiffusion(BatesParameters),
}

impl ModelParameters {
    /// The model this parameter set belongs to.
    pub fn tag(&self) -> ModelTag {
        match self {
            ModelParameters::Gbm(_) => ModelTag::Gbm,
            ModelParameters::JumpDiffusion(_) => ModelTag::JumpDiffusion,
            ModelParameters::StochasticVolatility(_) => ModelTag::StochasticVolatility,
            ModelParameters::StochVolJumpDiffusion(_) => ModelTag::StochVolJumpDiffusion,
        }
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelParameters::Gbm(p) => p.validate(),
            ModelParameters::JumpDiffusion(p) => p.validate(),
            ModelParameters::StochasticVolatility(p) => p.validate(),
            ModelParameters::StochVolJumpDiffusion(p) => p.validate(),
        }
    }

    /// Heston part of the parameters, for the stochastic-volatility models.
    pub fn heston(&self) -> Option<&HestonParameters> {
        match self {
            ModelParameters::StochasticVolatility(p) => Some(p),
            ModelParameters::StochVolJumpDiffusion(p) => Some(&p.heston),
            _ => None,
        }
    }

    /// Read the parameters of model `tag` from an environment.
    ///
    /// | model | keys |
    /// |---|---|
    /// | GBM | `volatility` |
    /// | Merton | `volatility`, `lambda`, `mu`, `delta` |
    /// | Heston | `v0`, `kappa`, `theta`, `vol_of_vol`, `rho` |
    /// | Bates | Heston keys plus `lambda`, `mu`, `delta` |
    pub fn from_environment(tag: ModelTag, env: &MarketEnvironment) -> Result<Self> {
        let jumps = |env: &MarketEnvironment| -> Result<JumpParameters> {
            JumpParameters::new(
                env.constant(keys::LAMBDA)?,
                env.constant(keys::MU)?,
                env.constant(keys::DELTA)?,
            )
        };
        let heston = |env: &MarketEnvironment| -> Result<HestonParameters> {
            HestonParameters::new(
                env.constant(keys::V0)?,
                env.constant(keys::KAPPA)?,
                env.constant(keys::THETA)?,
                env.constant(keys::VOL_OF_VOL)?,
                env.constant(keys::RHO)?,
            )
        };
        let params = match tag {
            ModelTag::Gbm => ModelParameters::Gbm(GbmParameters::new(env.constant(keys::VOLATILITY)?)?),
            ModelTag::JumpDiffusion => ModelParameters::JumpDiffusion(MertonParameters::new(
                env.constant(keys::VOLATILITY)?,
                jumps(env)?,
            )?),
            ModelTag::StochasticVolatility => ModelParameters::StochasticVolatility(heston(env)?),
            ModelTag::StochVolJumpDiffusion => ModelParameters::StochVolJumpDiffusion(
                BatesParameters::new(heston(env)?, jumps(env)?),
            ),
        };
        Ok(params)
    }
}

impl CharacteristicFunction for ModelParameters {
    fn log_characteristic(&self, u: Complex, t: Time, r: Rate) -> Complex {
        match self {
            ModelParameters::Gbm(p) => p.log_characteristic(u, t, r),
            ModelParameters::JumpDiffusion(p) => p.log_characteristic(u, t, r),
            ModelParameters::StochasticVolatility(p) => p.log_characteristic(u, t, r),
            ModelParameters::StochVolJumpDiffusion(p) => p.log_characteristic(u, t, r),
        }
    }
}

impl From<GbmParameters> for ModelParameters {
    fn from(p: GbmParameters) -> Self {
        ModelParameters::Gbm(p)
    }
}

impl From<MertonParameters> for ModelParameters {
    fn from(p: MertonParameters) -> Self {
        ModelParameters::JumpDiffusion(p)
    }
}

impl From<HestonParameters> for ModelParameters {
    fn from(p: HestonParameters) -> Self {
        ModelParameters::StochasticVolatility(p)
    }
}

impl From<BatesParameters> for ModelParameters {
    fn from(p: BatesParameters) -> Self {
        ModelParameters::StochVolJumpDiffusion(p)
    }
}
