//! Statistics accumulator for Monte Carlo estimates.

use fp_core::Real;

/// Incremental statistics accumulator.
///
/// Accumulates samples and computes mean, variance, standard deviation,
/// and standard error of the mean.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    sum_x: Real,
    sum_x2: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum_x: 0.0,
            sum_x2: 0.0,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum_x += x;
        self.sum_x2 += x * x;
    }

    /// Fold another accumulator into this one.
    ///
    /// Merging a fixed list of accumulators in a fixed order gives
    /// reproducible results regardless of how they were filled.
    pub fn merge(&mut self, other: &Statistics) {
        self.count += other.count;
        self.sum_x += other.sum_x;
        self.sum_x2 += other.sum_x2;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean. Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum_x / self.count as Real)
        }
    }

    /// Unbiased (Bessel-corrected) variance. Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum_x / n;
        let s2 = (self.sum_x2 / n - m * m).max(0.0);
        Some(s2 * n / (n - 1.0))
    }

    /// Standard deviation. Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(|v| v.sqrt())
    }

    /// Standard error of the mean, `σ / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn basic_statistics() {
        let mut s = Statistics::new();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            s.add(x);
        }
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.error_estimate().unwrap(), (2.5_f64 / 5.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn empty_statistics() {
        let s = Statistics::default();
        assert_eq!(s.mean(), None);
        assert_eq!(s.variance(), None);
    }

    #[test]
    fn merge_matches_single_pass() {
        let data = [0.5, 1.5, -2.0, 4.0, 3.25, 0.0, 7.5];
        let mut whole = Statistics::new();
        data.iter().for_each(|&x| whole.add(x));

        let mut left = Statistics::new();
        let mut right = Statistics::new();
        data[..3].iter().for_each(|&x| left.add(x));
        data[3..].iter().for_each(|&x| right.add(x));
        left.merge(&right);

        assert_eq!(left.samples(), whole.samples());
        assert_abs_diff_eq!(left.mean().unwrap(), whole.mean().unwrap(), epsilon = 1e-14);
        assert_abs_diff_eq!(left.variance().unwrap(), whole.variance().unwrap(), epsilon = 1e-12);
    }
}
