//! `DayCounter` trait and built-in day-count conventions.
//!
//! A day counter computes the **day count fraction** (the fraction of a
//! year between two dates) used to convert a pricing date and a maturity
//! date into the time horizon `T` fed to characteristic functions.

use crate::Date;
use fp_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`. Negative if `d2 < d1`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1).num_days()
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1).num_days()
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Value-type selector for the built-in conventions.
///
/// Market environments store this instead of a trait object so that they
/// stay `Clone + PartialEq` and can be rebuilt cheaply per valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DayCounterKind {
    /// Actual/365 (Fixed).
    #[default]
    Actual365Fixed,
    /// Actual/360.
    Actual360,
}

impl DayCounter for DayCounterKind {
    fn name(&self) -> &str {
        match self {
            DayCounterKind::Actual365Fixed => Actual365Fixed.name(),
            DayCounterKind::Actual360 => Actual360.name(),
        }
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        (d2 - d1).num_days()
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        match self {
            DayCounterKind::Actual365Fixed => Actual365Fixed.year_fraction(d1, d2),
            DayCounterKind::Actual360 => Actual360.year_fraction(d1, d2),
        }
    }
}
