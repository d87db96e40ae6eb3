//! Seeded random number generation.
//!
//! Wraps the Mersenne Twister from `rand_mt` and draws Gaussian and
//! Poisson deviates through `rand_distr`. Every generator is constructed
//! from an explicit seed; there is no thread-local or global RNG.

use fp_core::Real;
use rand_distr::{Distribution, Poisson, StandardNormal};
use rand_mt::Mt64;

/// A seeded MT19937-64 generator producing uniform, normal and Poisson
/// deviates.
pub struct MersenneTwisterRng {
    rng: Mt64,
}

impl MersenneTwisterRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt64::new(seed),
        }
    }

    /// Next uniform deviate in `[0, 1)`.
    pub fn next_uniform(&mut self) -> Real {
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }

    /// Next standard-normal deviate.
    pub fn next_normal(&mut self) -> Real {
        StandardNormal.sample(&mut self.rng)
    }

    /// Next Poisson count with the given mean. A non-positive or
    /// non-finite mean yields zero.
    pub fn next_poisson(&mut self, mean: Real) -> u64 {
        if !(mean > 0.0 && mean.is_finite()) {
            return 0;
        }
        match Poisson::new(mean) {
            Ok(dist) => {
                let n: Real = dist.sample(&mut self.rng);
                n as u64
            }
            Err(_) => 0,
        }
    }
}

/// Derive an independent-looking seed for stream `index` from `base`
/// (SplitMix64 finaliser). Used to give each simulation chunk its own
/// stream so that results do not depend on how chunks are scheduled.
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base
        .wrapping_add(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
