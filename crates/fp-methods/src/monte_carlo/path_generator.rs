//! Terminal-spot simulation for the supported models.
//!
//! State is the log-spot `x = ln S` plus, for the stochastic-volatility
//! models, the variance `v`.
//!
//! * GBM and Merton are stepped exactly: the Gaussian increment has the
//!   exact mean and variance over `dt`, and the jumps arriving in a step are
//!   a Poisson(λ·dt) count of `N(μ, δ²)` log-jumps, summed as
//!   `nμ + δ√n·Z`.
//! * Heston and Bates use a log-Euler step for the spot and the
//!   full-truncation Euler scheme for the variance (Lord, Koekkoek &
//!   van Dijk 2010): `v⁺ = max(v, 0)` is used in both drift and diffusion,
//!   while `v` itself may go negative.

use fp_core::{Rate, Real, Time};
use fp_math::MersenneTwisterRng;
use fp_models::{HestonParameters, JumpParameters, ModelParameters};

/// Steps risk-neutral sample paths of one model and hands out their
/// terminal spots.
pub struct PathGenerator {
    params: ModelParameters,
    spot: Real,
    rate: Rate,
    dt: Time,
    steps: usize,
    rng: MersenneTwisterRng,
}

impl PathGenerator {
    /// Create a generator over `[0, maturity]` with `steps` uniform steps.
    pub fn new(
        params: ModelParameters,
        spot: Real,
        rate: Rate,
        maturity: Time,
        steps: usize,
        seed: u64,
    ) -> Self {
        let steps = steps.max(1);
        Self {
            params,
            spot,
            rate,
            dt: maturity / steps as Real,
            steps,
            rng: MersenneTwisterRng::new(seed),
        }
    }

    /// Initial variance of the model (zero for constant-volatility models).
    fn initial_variance(&self) -> Real {
        self.params.heston().map_or(0.0, |h| h.v0)
    }

    /// Simulate one path and return only its terminal spot.
    pub fn next_terminal(&mut self) -> Real {
        let mut x = self.spot.ln();
        let mut v = self.initial_variance();
        for _ in 0..self.steps {
            self.advance(&mut x, &mut v);
        }
        x.exp()
    }

    fn advance(&mut self, x: &mut Real, v: &mut Real) {
        let params = self.params;
        match params {
            ModelParameters::Gbm(p) => {
                *x += self.diffusion_step(p.volatility, 0.0);
            }
            ModelParameters::JumpDiffusion(p) => {
                let compensator = p.jumps.lambda * p.jumps.jump_compensator();
                *x += self.diffusion_step(p.volatility, compensator) + self.jump_step(&p.jumps);
            }
            ModelParameters::StochasticVolatility(h) => {
                self.heston_step(&h, x, v, 0.0);
            }
            ModelParameters::StochVolJumpDiffusion(b) => {
                let compensator = b.jumps.lambda * b.jumps.jump_compensator();
                self.heston_step(&b.heston, x, v, compensator);
                *x += self.jump_step(&b.jumps);
            }
        }
    }

    /// Exact log-normal increment with drift `r − c − σ²/2`.
    fn diffusion_step(&mut self, sigma: Real, compensator: Real) -> Real {
        let dt = self.dt;
        (self.rate - compensator - 0.5 * sigma * sigma) * dt + sigma * dt.sqrt() * self.rng.next_normal()
    }

    /// Sum of the log-jumps arriving in one step.
    fn jump_step(&mut self, jumps: &JumpParameters) -> Real {
        let n = self.rng.next_poisson(jumps.lambda * self.dt);
        if n == 0 {
            return 0.0;
        }
        let n = n as Real;
        n * jumps.mu + jumps.delta * n.sqrt() * self.rng.next_normal()
    }

    fn heston_step(&mut self, h: &HestonParameters, x: &mut Real, v: &mut Real, compensator: Real) {
        let dt = self.dt;
        let z1 = self.rng.next_normal();
        let z2 = h.rho * z1 + (1.0 - h.rho * h.rho).sqrt() * self.rng.next_normal();
        let v_plus = v.max(0.0);
        let sd = (v_plus * dt).sqrt();
        *x += (self.rate - compensator - 0.5 * v_plus) * dt + sd * z1;
        *v += h.kappa * (h.theta - v_plus) * dt + h.vol_of_vol * sd * z2;
    }
}
