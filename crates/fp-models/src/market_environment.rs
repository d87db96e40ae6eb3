//! Market environment: named scalar and date parameters for a valuation.
//!
//! A [`MarketEnvironment`] is an immutable value. Parameters are set once
//! through [`MarketEnvironmentBuilder`]; "changing" a strike or maturity
//! between valuations means deriving a new environment with
//! [`MarketEnvironment::with_constant`] / [`MarketEnvironment::with_date`],
//! never mutating a shared one. Nothing downstream caches results keyed by
//! environment identity.

use fp_core::{ensure, Error, Real, Result, Time};
use fp_instruments::{OptionSpec, OptionType};
use fp_time::{Date, DayCounter, DayCounterKind};
use std::collections::BTreeMap;

/// Well-known parameter keys.
pub mod keys {
    /// Spot price of the underlying, `S₀`.
    pub const INITIAL_VALUE: &str = "initial_value";
    /// Constant continuously-compounded short rate `r`.
    pub const SHORT_RATE: &str = "short_rate";
    /// Option strike `K`.
    pub const STRIKE: &str = "strike";
    /// Option maturity (date entry).
    pub const MATURITY: &str = "maturity";
    /// Diffusion volatility `σ` (GBM, Merton).
    pub const VOLATILITY: &str = "volatility";
    /// Jump intensity `λ`.
    pub const LAMBDA: &str = "lambda";
    /// Mean log-jump size `μ`.
    pub const MU: &str = "mu";
    /// Log-jump size volatility `δ`.
    pub const DELTA: &str = "delta";
    /// Initial variance `v₀`.
    pub const V0: &str = "v0";
    /// Mean-reversion speed `κ`.
    pub const KAPPA: &str = "kappa";
    /// Long-run variance `θ`.
    pub const THETA: &str = "theta";
    /// Volatility of variance `ξ`.
    pub const VOL_OF_VOL: &str = "vol_of_vol";
    /// Spot/variance correlation `ρ`.
    pub const RHO: &str = "rho";
}

/// Named market and model parameters as of a pricing date.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketEnvironment {
    name: String,
    pricing_date: Date,
    day_counter: DayCounterKind,
    constants: BTreeMap<String, Real>,
    dates: BTreeMap<String, Date>,
}

impl MarketEnvironment {
    /// Start building an environment.
    pub fn builder(name: impl Into<String>, pricing_date: Date) -> MarketEnvironmentBuilder {
        MarketEnvironmentBuilder {
            env: MarketEnvironment {
                name: name.into(),
                pricing_date,
                day_counter: DayCounterKind::default(),
                constants: BTreeMap::new(),
                dates: BTreeMap::new(),
            },
        }
    }

    /// Environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Valuation date.
    pub fn pricing_date(&self) -> Date {
        self.pricing_date
    }

    /// Day-count convention used for year fractions.
    pub fn day_counter(&self) -> DayCounterKind {
        self.day_counter
    }

    /// Look up a scalar parameter.
    pub fn constant(&self, key: &str) -> Result<Real> {
        self.constants
            .get(key)
            .copied()
            .ok_or_else(|| Error::MissingParameter(format!("{key} (environment '{}')", self.name)))
    }

    /// Look up a date parameter.
    pub fn date(&self, key: &str) -> Result<Date> {
        self.dates
            .get(key)
            .copied()
            .ok_or_else(|| Error::MissingParameter(format!("{key} (environment '{}')", self.name)))
    }

    /// Spot price `S₀`.
    pub fn spot(&self) -> Result<Real> {
        self.constant(keys::INITIAL_VALUE)
    }

    /// Short rate `r`.
    pub fn short_rate(&self) -> Result<Real> {
        self.constant(keys::SHORT_RATE)
    }

    /// Year fraction from the pricing date to `date`.
    pub fn time_to(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.pricing_date, date)
    }

    /// A copy of this environment with one scalar replaced or added.
    #[must_use]
    pub fn with_constant(&self, key: impl Into<String>, value: Real) -> Self {
        let mut env = self.clone();
        env.constants.insert(key.into(), value);
        env
    }

    /// A copy of this environment with one date replaced or added.
    #[must_use]
    pub fn with_date(&self, key: impl Into<String>, date: Date) -> Self {
        let mut env = self.clone();
        env.dates.insert(key.into(), date);
        env
    }

    /// Build the option described by the `strike` and `maturity` entries.
    pub fn option_spec(&self, option_type: OptionType) -> Result<OptionSpec> {
        OptionSpec::new(
            self.constant(keys::STRIKE)?,
            self.date(keys::MATURITY)?,
            option_type,
        )
    }

    /// Check spot and short rate.
    pub fn validate(&self) -> Result<()> {
        let spot = self.spot()?;
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive and finite, got {spot}"
        );
        let r = self.short_rate()?;
        ensure!(r.is_finite(), "short rate must be finite, got {r}");
        Ok(())
    }
}

/// Builder for [`MarketEnvironment`].
#[derive(Debug, Clone)]
pub struct MarketEnvironmentBuilder {
    env: MarketEnvironment,
}

impl MarketEnvironmentBuilder {
    /// Set a scalar parameter.
    pub fn with_constant(mut self, key: impl Into<String>, value: Real) -> Self {
        self.env.constants.insert(key.into(), value);
        self
    }

    /// Set a date parameter.
    pub fn with_date(mut self, key: impl Into<String>, date: Date) -> Self {
        self.env.dates.insert(key.into(), date);
        self
    }

    /// Choose the day-count convention (default Actual/365 Fixed).
    pub fn with_day_counter(mut self, day_counter: DayCounterKind) -> Self {
        self.env.day_counter = day_counter;
        self
    }

    /// Copy every entry of `other` that is not already set here.
    pub fn with_environment(mut self, other: &MarketEnvironment) -> Self {
        for (k, v) in &other.constants {
            self.env.constants.entry(k.clone()).or_insert(*v);
        }
        for (k, d) in &other.dates {
            self.env.dates.entry(k.clone()).or_insert(*d);
        }
        self
    }

    /// Finish, validating spot and short rate.
    pub fn build(self) -> Result<MarketEnvironment> {
        self.env.validate()?;
        Ok(self.env)
    }
}
