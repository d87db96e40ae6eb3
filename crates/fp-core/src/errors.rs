//! Error types for fourier-pricing.
//!
//! Every crate in the workspace reports failures through the single
//! `thiserror`-derived [`Error`] enum defined here. The variants follow the
//! failure classes of a pricing call: bad inputs, a characteristic function
//! that leaves the finite domain, a quadrature that did not settle, and
//! failures reported by an external simulation engine.
//!
//! None of these are used for ordinary control flow. Each one is terminal
//! for the single pricing call that raised it.

use std::fmt;
use thiserror::Error;

/// Which stage of a truncated quadrature missed its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceFailure {
    /// The integrand envelope was still above tolerance at the largest
    /// allowed truncation point.
    Truncation,
    /// Successive panel refinements never agreed to tolerance.
    Refinement,
    /// Both of the above.
    TruncationAndRefinement,
}

impl fmt::Display for ConvergenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConvergenceFailure::Truncation => "truncation limit reached",
            ConvergenceFailure::Refinement => "refinement did not settle",
            ConvergenceFailure::TruncationAndRefinement => {
                "truncation limit reached and refinement did not settle"
            }
        };
        f.write_str(text)
    }
}

/// The top-level error type used throughout fourier-pricing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Out-of-domain input (negative volatility, non-positive strike,
    /// maturity not after the pricing date, correlation outside [-1, 1]...).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A named market-environment entry was requested but never set.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// The characteristic function produced a non-finite value on the
    /// integration contour.
    #[error("numerical instability at frequency u = {frequency}: {detail}")]
    NumericalInstability {
        /// Real frequency on the contour where the failure was detected.
        frequency: f64,
        /// Human-readable description of the failure.
        detail: String,
    },

    /// Quadrature refinement or truncation did not reach the requested
    /// tolerance. Carries the last estimate, its error bound and the stage
    /// that failed.
    #[error(
        "integration not converged ({failure}; U = {upper_limit}, {refinements} refinements): \
         estimate {estimate} (error bound {error_bound})"
    )]
    IntegrationNotConverged {
        /// Last best estimate of the quantity being integrated.
        estimate: f64,
        /// A-posteriori error bound of that estimate.
        error_bound: f64,
        /// Number of refinement steps that were attempted.
        refinements: usize,
        /// Truncation point of the last estimate.
        upper_limit: f64,
        /// Which stage missed its tolerance.
        failure: ConvergenceFailure,
    },

    /// Error propagated from an external (simulation) engine.
    #[error("external engine error: {0}")]
    ExternalEngine(String),
}

/// Shorthand `Result` type used throughout fourier-pricing.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidParameters(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use fp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> fp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameters(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameters(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns the given error immediately.
///
/// # Example
/// ```
/// use fp_core::{fail, errors::Error};
/// fn always_err() -> fp_core::errors::Result<()> {
///     fail!(Error::ExternalEngine("engine offline".into()));
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($err:expr) => {
        return Err($err)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_converged_message_carries_estimate() {
        let err = Error::IntegrationNotConverged {
            estimate: 1.25,
            error_bound: 0.5,
            refinements: 7,
            upper_limit: 4096.0,
            failure: ConvergenceFailure::Refinement,
        };
        let msg = err.to_string();
        assert!(msg.contains("1.25"), "{msg}");
        assert!(msg.contains("0.5"), "{msg}");
        assert!(msg.contains("7 refinements"), "{msg}");
        assert!(msg.contains("refinement did not settle"), "{msg}");
    }

    #[test]
    fn not_converged_message_names_the_truncation_limit() {
        let err = Error::IntegrationNotConverged {
            estimate: 0.0758,
            error_bound: 9.8e-5,
            refinements: 1,
            upper_limit: 4096.0,
            failure: ConvergenceFailure::Truncation,
        };
        let msg = err.to_string();
        assert!(msg.contains("truncation limit reached; U = 4096"), "{msg}");
        assert!(!msg.contains("did not settle"), "{msg}");
    }

    #[test]
    fn ensure_maps_to_invalid_parameters() {
        fn check(x: f64) -> Result<()> {
            ensure!(x.is_finite(), "value must be finite, got {x}");
            Ok(())
        }
        assert_eq!(
            check(f64::NAN),
            Err(Error::InvalidParameters("value must be finite, got NaN".into()))
        );
        assert!(check(1.0).is_ok());
    }

    #[test]
    fn fail_returns_the_given_error() {
        fn engine_offline() -> Result<f64> {
            fail!(Error::ExternalEngine("engine offline".into()));
        }
        assert_eq!(engine_offline(), Err(Error::ExternalEngine("engine offline".into())));
    }
}
