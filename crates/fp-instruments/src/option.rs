//! European option specification.

use crate::payoff::{OptionType, PlainVanillaPayoff};
use fp_core::{ensure, Real, Result};
use fp_time::Date;

/// Strike, maturity date and right of a European vanilla option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// Strike price.
    pub strike: Real,
    /// Expiry date.
    pub maturity: Date,
    /// Put or call.
    pub option_type: OptionType,
}

impl OptionSpec {
    /// Create a new specification, rejecting non-positive or non-finite
    /// strikes.
    pub fn new(strike: Real, maturity: Date, option_type: OptionType) -> Result<Self> {
        let spec = Self {
            strike,
            maturity,
            option_type,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the strike domain.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive and finite, got {}",
            self.strike
        );
        Ok(())
    }

    /// Same contract with the opposite right.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// The terminal payoff of this option.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }
}
