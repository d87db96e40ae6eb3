//! # fp-models
//!
//! Market environments, model parameter records and the closed-form
//! characteristic functions of the four supported asset-return models:
//!
//! - [`GbmParameters`]: geometric Brownian motion (Black-Scholes)
//! - [`MertonParameters`]: Merton (1976) log-normal jump diffusion
//! - [`HestonParameters`]: Heston (1993) stochastic volatility
//! - [`BatesParameters`]: Bates (1996) stochastic volatility with jumps
//!
//! All four implement [`CharacteristicFunction`]; [`ModelParameters`] is the
//! closed tagged union the pricing engines dispatch on.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bates_model;
pub mod gbm_model;
pub mod heston_model;
pub mod market_environment;
pub mod merton_model;
pub mod model;

pub use bates_model::BatesParameters;
pub use gbm_model::GbmParameters;
pub use heston_model::HestonParameters;
pub use market_environment::{keys, MarketEnvironment, MarketEnvironmentBuilder};
pub use merton_model::{JumpParameters, MertonParameters};
pub use model::{CharacteristicFunction, ModelParameters, ModelTag};

/// Complex number type used by all characteristic functions.
pub type Complex = num_complex::Complex64;
