//! Truncated, self-refining quadrature for Fourier integrands on `[0, ∞)`.
//!
//! The integrand is supplied as a complex-valued function of the real
//! frequency `u`; its real part is integrated and its modulus serves as the
//! envelope that decides where the semi-infinite range is cut off.
//!
//! 1. **Truncation.** Starting from `initial_upper_limit`, the envelope is
//!    sampled on `[U, 2U]`. `U` doubles until the sampled maximum drops
//!    below `truncation_tolerance × peak` (peak = envelope at `u = 0`) or
//!    `max_upper_limit` is reached.
//! 2. **Refinement.** A composite Gauss-Legendre rule is applied on
//!    `[0, U]` with a panel width fixed by the initial settings; the panel
//!    count then doubles until two successive estimates agree to
//!    `max(absolute_tolerance, relative_tolerance × |I|)`.
//!
//! The returned error estimate is the last refinement difference plus the
//! truncation tail bound `max envelope on [U, 2U] × U`. Integrand evaluations
//! for one rule run on the rayon pool when the `parallel` feature is
//! enabled; the weighted terms are collected in node order and reduced with
//! [`pairwise_sum`], so the result does not depend on the thread count.

use fp_core::{ensure, ConvergenceFailure, Real, Result};
use fp_math::{pairwise_sum, CompositeGaussLegendre};
use fp_models::Complex;
use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Envelope samples taken on each `[U, 2U]` truncation check.
const TAIL_SAMPLES: usize = 16;

/// Numerical configuration of a [`TransformIntegrator`].
///
/// `max_upper_limit` is a hard cap. An integrand whose envelope is still
/// above `truncation_tolerance × peak` at the cap is reported as not
/// converged rather than integrated further. With the defaults (cap 4096,
/// tolerance 1e-12) this happens for very short maturities with nearly
/// vanishing variance: GBM with σ = 1 % over one day, or Heston with
/// `v₀ = 0` over a week. Such inputs need a larger cap through
/// [`with_upper_limits`](Self::with_upper_limits); the panel count grows
/// in proportion to the truncation point, so the cost does too.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegrationSettings {
    /// Gauss-Legendre nodes per panel.
    pub nodes_per_panel: usize,
    /// Panels on `[0, initial_upper_limit]` before refinement.
    pub initial_panels: usize,
    /// Maximum number of panel doublings.
    pub max_refinements: usize,
    /// First truncation point tried.
    pub initial_upper_limit: Real,
    /// Largest truncation point allowed; reaching it without meeting the
    /// truncation tolerance fails the integration.
    pub max_upper_limit: Real,
    /// Tail envelope threshold, relative to the envelope peak.
    pub truncation_tolerance: Real,
    /// Absolute refinement tolerance.
    pub absolute_tolerance: Real,
    /// Relative refinement tolerance.
    pub relative_tolerance: Real,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            nodes_per_panel: 16,
            initial_panels: 16,
            max_refinements: 7,
            initial_upper_limit: 32.0,
            max_upper_limit: 4096.0,
            truncation_tolerance: 1e-12,
            absolute_tolerance: 1e-10,
            relative_tolerance: 1e-10,
        }
    }
}

impl IntegrationSettings {
    /// Set the Gauss-Legendre order per panel.
    pub fn with_nodes_per_panel(mut self, n: usize) -> Self {
        self.nodes_per_panel = n;
        self
    }

    /// Set the initial panel count.
    pub fn with_initial_panels(mut self, n: usize) -> Self {
        self.initial_panels = n;
        self
    }

    /// Set the maximum number of panel doublings.
    pub fn with_max_refinements(mut self, n: usize) -> Self {
        self.max_refinements = n;
        self
    }

    /// Set the initial and maximum truncation points.
    pub fn with_upper_limits(mut self, initial: Real, max: Real) -> Self {
        self.initial_upper_limit = initial;
        self.max_upper_limit = max;
        self
    }

    /// Set the truncation tolerance.
    pub fn with_truncation_tolerance(mut self, tol: Real) -> Self {
        self.truncation_tolerance = tol;
        self
    }

    /// Set both refinement tolerances.
    pub fn with_tolerances(mut self, absolute: Real, relative: Real) -> Self {
        self.absolute_tolerance = absolute;
        self.relative_tolerance = relative;
        self
    }

    /// Check that the settings describe a usable integrator.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.nodes_per_panel >= 2, "need at least 2 nodes per panel");
        ensure!(self.initial_panels >= 1, "need at least one panel");
        ensure!(self.max_refinements >= 1, "need at least one refinement step");
        ensure!(
            self.initial_upper_limit.is_finite() && self.initial_upper_limit > 0.0,
            "initial upper limit must be positive, got {}",
            self.initial_upper_limit
        );
        ensure!(
            self.max_upper_limit.is_finite() && self.max_upper_limit >= self.initial_upper_limit,
            "max upper limit {} is below the initial limit {}",
            self.max_upper_limit,
            self.initial_upper_limit
        );
        ensure!(
            self.truncation_tolerance > 0.0
                && self.absolute_tolerance >= 0.0
                && self.relative_tolerance >= 0.0,
            "tolerances must be non-negative and the truncation tolerance positive"
        );
        Ok(())
    }
}

/// Result of one integration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegrationOutcome {
    /// Integral estimate.
    pub value: Real,
    /// A-posteriori error bound: refinement difference plus truncation tail.
    pub error_estimate: Real,
    /// Total integrand evaluations, truncation checks included.
    pub evaluations: usize,
    /// Truncation point used.
    pub upper_limit: Real,
    /// Panels of the final rule.
    pub panels: usize,
    /// Panel doublings performed.
    pub refinements: usize,
    /// Whether the envelope fell below tolerance before `max_upper_limit`.
    pub truncated: bool,
    /// Whether two successive refinements agreed to tolerance.
    pub settled: bool,
}

impl IntegrationOutcome {
    /// Whether both the truncation and the refinement tolerances were met.
    pub fn converged(&self) -> bool {
        self.truncated && self.settled
    }

    /// The stage that missed its tolerance, if any.
    pub fn failure(&self) -> Option<ConvergenceFailure> {
        match (self.truncated, self.settled) {
            (true, true) => None,
            (false, true) => Some(ConvergenceFailure::Truncation),
            (true, false) => Some(ConvergenceFailure::Refinement),
            (false, false) => Some(ConvergenceFailure::TruncationAndRefinement),
        }
    }
}

/// Integrates `∫₀^∞ Re f(u) du` for a complex Fourier integrand `f`.
#[derive(Debug, Clone)]
pub struct TransformIntegrator {
    settings: IntegrationSettings,
    rule: CompositeGaussLegendre,
}

impl Default for TransformIntegrator {
    fn default() -> Self {
        let settings = IntegrationSettings::default();
        Self {
            rule: CompositeGaussLegendre::new(settings.nodes_per_panel),
            settings,
        }
    }
}

impl TransformIntegrator {
    /// Build an integrator from validated settings.
    pub fn new(settings: IntegrationSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            rule: CompositeGaussLegendre::new(settings.nodes_per_panel),
            settings,
        })
    }

    /// The settings in use.
    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }

    /// Integrate the real part of `f` over `[0, ∞)`.
    ///
    /// A result that misses a tolerance is returned with
    /// [`IntegrationOutcome::converged`] false; only errors raised by `f`
    /// itself are propagated.
    pub fn integrate<F>(&self, f: F) -> Result<IntegrationOutcome>
    where
        F: Fn(Real) -> Result<Complex> + Sync,
    {
        let s = &self.settings;
        let mut evaluations = 1;
        let peak = f(0.0)?.norm();

        let mut upper = s.initial_upper_limit;
        let (tail, truncated) = loop {
            let tail = self.tail_envelope(&f, upper)?;
            evaluations += TAIL_SAMPLES + 1;
            if tail <= s.truncation_tolerance * peak {
                break (tail, true);
            }
            if 2.0 * upper > s.max_upper_limit {
                break (tail, false);
            }
            upper *= 2.0;
        };
        let tail_bound = tail * upper;
        debug!(
            "truncated at U = {upper} (tail envelope {tail:.3e}, peak {peak:.3e}, within tolerance: {truncated})"
        );

        let scale = (upper / s.initial_upper_limit).round().max(1.0) as usize;
        let mut panels = s.initial_panels * scale;
        let mut previous = self.quadrature(&f, upper, panels)?;
        evaluations += panels * self.rule.order();

        let mut value = previous;
        let mut difference = Real::INFINITY;
        let mut refinements = 0;
        let mut settled = false;
        while refinements < s.max_refinements {
            panels *= 2;
            refinements += 1;
            value = self.quadrature(&f, upper, panels)?;
            evaluations += panels * self.rule.order();
            difference = (value - previous).abs();
            debug!("refinement {refinements}: {panels} panels, I = {value:.12e}, |ΔI| = {difference:.3e}");
            if difference <= s.absolute_tolerance.max(s.relative_tolerance * value.abs()) {
                settled = true;
                break;
            }
            previous = value;
        }

        Ok(IntegrationOutcome {
            value,
            error_estimate: difference + tail_bound,
            evaluations,
            upper_limit: upper,
            panels,
            refinements,
            truncated,
            settled,
        })
    }

    /// Largest envelope value sampled on `[upper, 2·upper]`.
    fn tail_envelope<F>(&self, f: &F, upper: Real) -> Result<Real>
    where
        F: Fn(Real) -> Result<Complex> + Sync,
    {
        let step = upper / TAIL_SAMPLES as Real;
        (0..=TAIL_SAMPLES).try_fold(0.0, |acc: Real, j| {
            let u = upper + j as Real * step;
            Ok(acc.max(f(u)?.norm()))
        })
    }

    /// Composite Gauss-Legendre estimate of `∫₀^upper Re f`.
    fn quadrature<F>(&self, f: &F, upper: Real, panels: usize) -> Result<Real>
    where
        F: Fn(Real) -> Result<Complex> + Sync,
    {
        let nodes = self.rule.nodes(0.0, upper, panels);

        #[cfg(feature = "parallel")]
        let iter = nodes.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = nodes.iter();

        let terms = iter
            .map(|&(u, w)| f(u).map(|z| w * z.re))
            .collect::<Result<Vec<Real>>>()?;
        Ok(pairwise_sum(&terms))
    }
}
