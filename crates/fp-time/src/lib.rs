//! # fp-time
//!
//! Date and day-count conventions for fourier-pricing.
//!
//! Dates are plain [`chrono::NaiveDate`] values. A [`DayCounter`] turns a
//! pair of dates into the year fraction used as time-to-maturity by the
//! pricing engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `DayCounter` trait and built-in conventions.
pub mod day_counter;

/// Calendar date type used throughout the workspace.
pub type Date = chrono::NaiveDate;

pub use day_counter::{Actual360, Actual365Fixed, DayCounter, DayCounterKind};
