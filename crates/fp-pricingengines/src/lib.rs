//! # fp-pricingengines
//!
//! Pricing engines for European vanilla options.
//!
//! ## Engines
//!
//! - [`FourierPricer`]: Lewis (2001) single-integral transform pricer for
//!   any model implementing [`CharacteristicFunction`](fp_models::CharacteristicFunction)
//! - [`AnalyticEuropeanEngine`]: Black-Scholes closed form, used as the
//!   reference price for the GBM model
//!
//! [`TransformIntegrator`] is the truncated, self-refining quadrature the
//! Fourier pricer is built on.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod fourier_engine;
pub mod transform_integrator;

pub use analytic_european_engine::{black_scholes_price, AnalyticEuropeanEngine};
pub use fourier_engine::{FourierPricer, GridPoint, PricingDiagnostics, PricingResult};
pub use transform_integrator::{IntegrationOutcome, IntegrationSettings, TransformIntegrator};
