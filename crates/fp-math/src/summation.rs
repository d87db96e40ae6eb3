//! Pairwise (cascade) summation.
//!
//! The result depends only on the order of the input slice, never on how
//! the terms were produced, so a parallel map followed by an
//! order-preserving collect and [`pairwise_sum`] gives the same bits for
//! any number of worker threads. The rounding error grows as `O(log n)`
//! rather than `O(n)` for naive left-to-right accumulation.

use fp_core::Real;

/// Below this length the terms are added left to right.
const BLOCK: usize = 8;

/// Sum `values` by recursive halving.
pub fn pairwise_sum(values: &[Real]) -> Real {
    if values.len() <= BLOCK {
        return values.iter().fold(0.0, |acc, &v| acc + v);
    }
    let mid = values.len() / 2;
    pairwise_sum(&values[..mid]) + pairwise_sum(&values[mid..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_and_small() {
        assert_eq!(pairwise_sum(&[]), 0.0);
        assert_eq!(pairwise_sum(&[1.5, 2.5]), 4.0);
    }

    #[test]
    fn many_small_terms() {
        let values = vec![0.1; 1_000_000];
        assert_abs_diff_eq!(pairwise_sum(&values), 100_000.0, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn agrees_with_naive_sum(values in prop::collection::vec(-1e3f64..1e3, 0..500)) {
            let naive: f64 = values.iter().sum();
            prop_assert!((pairwise_sum(&values) - naive).abs() < 1e-8);
        }

        #[test]
        fn deterministic(values in prop::collection::vec(-1e6f64..1e6, 0..300)) {
            let copy = values.clone();
            prop_assert_eq!(pairwise_sum(&values).to_bits(), pairwise_sum(&copy).to_bits());
        }
    }
}
