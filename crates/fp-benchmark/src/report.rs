//! Benchmark rows and the human-readable report.

use fp_core::{Price, Real, Time};
use fp_instruments::OptionType;
use fp_models::ModelTag;
use fp_time::Date;
use std::fmt;

/// Outcome of one grid point.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// Both prices were obtained.
    Compared {
        /// Simulation estimate.
        mcs: Price,
        /// Fourier price.
        fourier: Price,
        /// Price-unit difference `mcs − fourier`.
        abs_diff: Real,
        /// `abs_diff` relative to the Fourier price, in percent
        /// (NaN when the Fourier price is zero).
        rel_diff_pct: Real,
    },
    /// One of the two prices failed.
    Unavailable {
        /// Why the point could not be compared.
        reason: String,
    },
}

impl Comparison {
    /// Build a comparison from the two prices.
    pub fn compared(mcs: Price, fourier: Price) -> Self {
        let abs_diff = mcs - fourier;
        let rel_diff_pct = if fourier != 0.0 {
            abs_diff / fourier * 100.0
        } else {
            Real::NAN
        };
        Comparison::Compared {
            mcs,
            fourier,
            abs_diff,
            rel_diff_pct,
        }
    }

    /// The price-unit difference, if both prices exist.
    pub fn abs_diff(&self) -> Option<Real> {
        match self {
            Comparison::Compared { abs_diff, .. } => Some(*abs_diff),
            Comparison::Unavailable { .. } => None,
        }
    }
}

/// One `(maturity, strike)` row.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    /// Maturity date.
    pub maturity: Date,
    /// Year fraction to maturity.
    pub time_to_maturity: Time,
    /// Strike.
    pub strike: Real,
    /// Prices or the failure reason.
    pub comparison: Comparison,
}

/// All rows of one model benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// Environment name.
    pub name: String,
    /// Benchmarked model.
    pub model: ModelTag,
    /// Right of the options.
    pub option_type: OptionType,
    /// Rows, maturity-major.
    pub rows: Vec<BenchmarkRow>,
}

impl BenchmarkReport {
    /// Rows where both prices exist.
    pub fn available(&self) -> impl Iterator<Item = &BenchmarkRow> {
        self.rows
            .iter()
            .filter(|r| matches!(r.comparison, Comparison::Compared { .. }))
    }

    /// Number of rows that could not be compared.
    pub fn unavailable_count(&self) -> usize {
        self.rows.len() - self.available().count()
    }

    /// Largest `|mcs − fourier|` over the available rows.
    pub fn max_abs_deviation(&self) -> Option<Real> {
        self.rows
            .iter()
            .filter_map(|r| r.comparison.abs_diff())
            .map(Real::abs)
            .fold(None, |acc, d| Some(acc.map_or(d, |m: Real| m.max(d))))
    }

    /// Mean `|mcs − fourier|` over the available rows.
    pub fn mean_abs_deviation(&self) -> Option<Real> {
        let diffs: Vec<Real> = self
            .rows
            .iter()
            .filter_map(|r| r.comparison.abs_diff())
            .map(Real::abs)
            .collect();
        if diffs.is_empty() {
            None
        } else {
            Some(diffs.iter().sum::<Real>() / diffs.len() as Real)
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | {} | {}", self.name, self.model, self.option_type)?;
        writeln!(
            f,
            "{:>6} | {:>8} | {:>8} | {:>8} | {:>8} | {:>7}",
            "T", "strike", "mcs", "fourier", "abs diff", "rel %"
        )?;
        writeln!(f, "{}", "-".repeat(62))?;
        for row in &self.rows {
            write!(f, "{:>6.3} | {:>8.3} | ", row.time_to_maturity, row.strike)?;
            match &row.comparison {
                Comparison::Compared {
                    mcs,
                    fourier,
                    abs_diff,
                    rel_diff_pct,
                } => {
                    write!(f, "{mcs:>8.4} | {fourier:>8.4} | {abs_diff:>8.4} | ")?;
                    if rel_diff_pct.is_finite() {
                        writeln!(f, "{rel_diff_pct:>7.2}")?;
                    } else {
                        writeln!(f, "{:>7}", "n/a")?;
                    }
                }
                Comparison::Unavailable { reason } => writeln!(f, "unavailable: {reason}")?,
            }
        }
        match self.max_abs_deviation() {
            Some(max) => write!(
                f,
                "max |mcs - fourier| = {max:.4} over {} of {} rows",
                self.rows.len() - self.unavailable_count(),
                self.rows.len()
            ),
            None => write!(f, "no comparable rows"),
        }
    }
}
