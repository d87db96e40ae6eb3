//! Fourier transform pricing engine.
//!
//! Uses the Lewis (2001) single-integral representation. With `φ` the
//! characteristic function of `ln(S_T/S₀)` and `x = ln(S₀/K)`,
//!
//! ```text
//! I   = √(S₀K) e^{−rT} / π · ∫₀^∞ Re[e^{iux} φ(u − i/2)] / (u² + ¼) du
//! Put = K e^{−rT} − I
//! Call = Put + S₀ − K e^{−rT}
//! ```
//!
//! The contour `Im u = −½` lies inside the strip of analyticity of every
//! supported model, so no damping parameter has to be tuned. Both rights
//! come from the same integral, so put-call parity holds to rounding. The
//! put is clamped to its no-arbitrage range
//! `[max(K e^{−rT} − S₀, 0), K e^{−rT}]`, which keeps both prices
//! non-negative whatever the quadrature settings.

use crate::transform_integrator::{IntegrationOutcome, IntegrationSettings, TransformIntegrator};
use fp_core::{ensure, Error, Price, Rate, Real, Result, Time};
use fp_instruments::{OptionSpec, OptionType};
use fp_models::{keys, CharacteristicFunction, Complex, MarketEnvironment, ModelParameters, ModelTag};
use fp_time::Date;
use log::{debug, warn};
use std::f64::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Numerical bookkeeping attached to every Fourier price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingDiagnostics {
    /// Error bound in price units.
    pub error_estimate: Real,
    /// Characteristic-function evaluations spent.
    pub evaluations: usize,
    /// Truncation point of the frequency integral.
    pub upper_limit: Real,
    /// Panels of the final quadrature rule.
    pub panels: usize,
}

/// A Fourier price with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Present value.
    pub price: Price,
    /// Model that produced it.
    pub model: ModelTag,
    /// Right of the option.
    pub option_type: OptionType,
    /// Strike.
    pub strike: Real,
    /// Time to maturity in years.
    pub time_to_maturity: Time,
    /// Integration diagnostics.
    pub diagnostics: PricingDiagnostics,
}

/// One point of a strike × maturity grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    /// Maturity date.
    pub maturity: Date,
    /// Strike.
    pub strike: Real,
    /// Price, or the error that point failed with.
    pub result: Result<PricingResult>,
}

/// Prices European options under any [`ModelParameters`].
///
/// Stateless apart from its integration settings; one pricer can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct FourierPricer {
    integrator: TransformIntegrator,
}

impl FourierPricer {
    /// Create a pricer with custom integration settings.
    pub fn new(settings: IntegrationSettings) -> Result<Self> {
        Ok(Self {
            integrator: TransformIntegrator::new(settings)?,
        })
    }

    /// The integration settings in use.
    pub fn settings(&self) -> &IntegrationSettings {
        self.integrator.settings()
    }

    /// Price `option` under `params` in `env`.
    ///
    /// # Errors
    /// - [`Error::InvalidParameters`] / [`Error::MissingParameter`] for bad
    ///   or absent inputs, including a maturity not after the pricing date;
    /// - [`Error::NumericalInstability`] if `φ` leaves the finite domain;
    /// - [`Error::IntegrationNotConverged`] with the best estimate when the
    ///   integral misses its tolerances.
    pub fn price(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        option: &OptionSpec,
    ) -> Result<PricingResult> {
        params.validate()?;
        option.validate()?;
        env.validate()?;
        let spot = env.spot()?;
        let rate = env.short_rate()?;
        let strike = option.strike;
        let t = env.time_to(option.maturity);
        ensure!(
            t > 0.0,
            "maturity {} is not after the pricing date {}",
            option.maturity,
            env.pricing_date()
        );

        if let Some(heston) = params.heston() {
            if !heston.feller_satisfied() {
                warn!(
                    "Feller condition 2κθ ≥ ξ² violated (κ = {}, θ = {}, ξ = {}); pricing anyway",
                    heston.kappa, heston.theta, heston.vol_of_vol
                );
            }
        }

        let outcome = self.lewis_integral(params, spot, strike, rate, t)?;
        let scale = (spot * strike).sqrt() * (-rate * t).exp() / PI;
        let (put, call) = prices_from_integral(scale * outcome.value, spot, strike, rate, t);
        let price = match option.option_type {
            OptionType::Put => put,
            OptionType::Call => call,
        };
        let error_estimate = scale * outcome.error_estimate;

        if let Some(failure) = outcome.failure() {
            warn!(
                "{} {} K = {strike} T = {t:.4}: {failure} (U = {}, {} panels, error bound {error_estimate:.3e})",
                params.tag(),
                option.option_type,
                outcome.upper_limit,
                outcome.panels
            );
            return Err(Error::IntegrationNotConverged {
                estimate: price,
                error_bound: error_estimate,
                refinements: outcome.refinements,
                upper_limit: outcome.upper_limit,
                failure,
            });
        }

        debug!(
            "{} {} K = {strike} T = {t:.4}: {price:.6} (±{error_estimate:.1e}, {} evaluations)",
            params.tag(),
            option.option_type,
            outcome.evaluations
        );

        Ok(PricingResult {
            price,
            model: params.tag(),
            option_type: option.option_type,
            strike,
            time_to_maturity: t,
            diagnostics: PricingDiagnostics {
                error_estimate,
                evaluations: outcome.evaluations,
                upper_limit: outcome.upper_limit,
                panels: outcome.panels,
            },
        })
    }

    /// Price every `(maturity, strike)` pair, maturity-major.
    ///
    /// Each point is priced on its own environment derived from `env`
    /// with the point's strike and maturity; a failing point does not stop
    /// the others.
    pub fn price_grid(
        &self,
        params: &ModelParameters,
        env: &MarketEnvironment,
        strikes: &[Real],
        maturities: &[Date],
        option_type: OptionType,
    ) -> Vec<GridPoint> {
        let points: Vec<(Date, Real)> = maturities
            .iter()
            .flat_map(|&m| strikes.iter().map(move |&k| (m, k)))
            .collect();

        #[cfg(feature = "parallel")]
        let iter = points.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = points.iter();

        iter.map(|&(maturity, strike)| {
            let point_env = env
                .with_constant(keys::STRIKE, strike)
                .with_date(keys::MATURITY, maturity);
            let result = point_env
                .option_spec(option_type)
                .and_then(|option| self.price(params, &point_env, &option));
            GridPoint {
                maturity,
                strike,
                result,
            }
        })
        .collect()
    }

    /// `∫₀^∞ Re[e^{iux} φ(u − i/2)] / (u² + ¼) du`, unscaled.
    fn lewis_integral<C>(
        &self,
        cf: &C,
        spot: Real,
        strike: Real,
        rate: Rate,
        t: Time,
    ) -> Result<IntegrationOutcome>
    where
        C: CharacteristicFunction + Sync,
    {
        let x = (spot / strike).ln();
        self.integrator.integrate(|u| {
            let phi = cf.characteristic_function(Complex::new(u, -0.5), t, rate)?;
            Ok(Complex::new(0.0, u * x).exp() * phi / (u * u + 0.25))
        })
    }
}

/// `(put, call)` from the scaled Lewis integral.
fn prices_from_integral(integral: Real, spot: Real, strike: Real, rate: Rate, t: Time) -> (Price, Price) {
    let discounted_strike = strike * (-rate * t).exp();
    let forward_gap = discounted_strike - spot;
    let put = (discounted_strike - integral).clamp(forward_gap.max(0.0), discounted_strike);
    (put, put - forward_gap)
}
