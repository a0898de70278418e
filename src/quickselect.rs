// 🎯 Quickselect - k-th order statistic without a full sort
//
// Three-way partition around a pivot (less / equal / greater), then keep
// only the group that holds position k. Expected O(n) with a random pivot,
// O(n²) in the worst case.

use rand::Rng;
use tracing::trace;

// ============================================================================
// PIVOT RULES
// ============================================================================

/// Chooses the pivot position inside the current partition.
pub trait PivotRule {
    /// Index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniformly random pivot.
///
/// Guards against inputs crafted to defeat a fixed pivot rule, at the cost
/// of expected rather than guaranteed linear time.
pub struct RandomPivot<R> {
    rng: R,
}

impl<R: Rng> RandomPivot<R> {
    pub fn new(rng: R) -> Self {
        RandomPivot { rng }
    }
}

impl<R: Rng> PivotRule for RandomPivot<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Always the middle element. Deterministic, but quadratic on adversarial input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MiddlePivot;

impl PivotRule for MiddlePivot {
    fn pick(&mut self, len: usize) -> usize {
        len / 2
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Value at position `k` (0-based) of `values` once sorted ascending.
///
/// Returns `None` for an empty slice or `k >= values.len()`.
pub fn quickselect<P: PivotRule + ?Sized>(values: &[f64], k: usize, pivot_rule: &mut P) -> Option<f64> {
    if k >= values.len() {
        return None;
    }

    let mut current = values.to_vec();
    let mut k = k;

    loop {
        if current.len() == 1 {
            // Only k == 0 can reach a single-element partition
            return current.first().copied();
        }

        let index = pivot_rule.pick(current.len()).min(current.len() - 1);
        let pivot = current[index];

        let mut lows = Vec::new();
        let mut highs = Vec::new();
        let mut equal = 0usize;
        for &value in &current {
            if value < pivot {
                lows.push(value);
            } else if value > pivot {
                highs.push(value);
            } else {
                equal += 1;
            }
        }

        trace!(
            len = current.len(),
            pivot,
            lows = lows.len(),
            equal,
            highs = highs.len(),
            k,
            "partitioned"
        );

        if k < lows.len() {
            current = lows;
        } else if k < lows.len() + equal {
            return Some(pivot);
        } else {
            k -= lows.len() + equal;
            current = highs;
        }
    }
}

/// Median by selection: the middle order statistic for odd lengths, the
/// mean of the two middle ones for even lengths. `None` when empty.
pub fn median_by_selection<P: PivotRule + ?Sized>(values: &[f64], pivot_rule: &mut P) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    if n % 2 == 1 {
        quickselect(values, n / 2, pivot_rule)
    } else {
        let left = quickselect(values, n / 2 - 1, pivot_rule)?;
        let right = quickselect(values, n / 2, pivot_rule)?;
        Some(0.5 * (left + right))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> RandomPivot<SmallRng> {
        RandomPivot::new(SmallRng::seed_from_u64(seed))
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    #[test]
    fn test_single_element() {
        assert_eq!(quickselect(&[42.0], 0, &mut MiddlePivot), Some(42.0));
        assert_eq!(quickselect(&[42.0], 0, &mut seeded(1)), Some(42.0));
    }

    #[test]
    fn test_out_of_range_k() {
        assert_eq!(quickselect(&[], 0, &mut MiddlePivot), None);
        assert_eq!(quickselect(&[1.0, 2.0], 2, &mut MiddlePivot), None);
    }

    #[test]
    fn test_every_order_statistic() {
        let values = [22.11, 43.0, 11.72, 2.2, 36.29, 2.5, 19.0, 210.22];
        let expected = sorted(&values);

        for k in 0..values.len() {
            assert_eq!(quickselect(&values, k, &mut seeded(k as u64)), Some(expected[k]));
            assert_eq!(quickselect(&values, k, &mut MiddlePivot), Some(expected[k]));
        }
    }

    #[test]
    fn test_duplicates() {
        let values = [11.9, 2.5, 11.9, 2.5, 11.9, 30.2];

        assert_eq!(quickselect(&values, 0, &mut MiddlePivot), Some(2.5));
        assert_eq!(quickselect(&values, 1, &mut MiddlePivot), Some(2.5));
        assert_eq!(quickselect(&values, 2, &mut MiddlePivot), Some(11.9));
        assert_eq!(quickselect(&values, 4, &mut MiddlePivot), Some(11.9));
        assert_eq!(quickselect(&values, 5, &mut MiddlePivot), Some(30.2));
    }

    #[test]
    fn test_all_equal() {
        let values = [7.0; 9];
        assert_eq!(median_by_selection(&values, &mut seeded(3)), Some(7.0));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_by_selection(&[10.2, 11.5, 2.5], &mut MiddlePivot), Some(10.2));
        assert_eq!(
            median_by_selection(&[4.0, 1.0, 3.0, 2.0], &mut MiddlePivot),
            Some(2.5)
        );
        assert_eq!(median_by_selection(&[], &mut MiddlePivot), None);
    }

    #[test]
    fn test_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        let before = values.clone();
        median_by_selection(&values, &mut seeded(9));
        assert_eq!(values, before);
    }

    #[test]
    fn test_out_of_range_pivot_is_clamped() {
        struct PastTheEnd;
        impl PivotRule for PastTheEnd {
            fn pick(&mut self, len: usize) -> usize {
                len + 10
            }
        }

        assert_eq!(quickselect(&[5.0, 1.0, 3.0], 1, &mut PastTheEnd), Some(3.0));
    }

    #[test]
    fn test_repeated_random_runs_agree() {
        let values = [22.11, 43.0, 11.72, 2.2, 36.29, 2.5, 19.0, 210.22, 10.2, 11.5, 2.5];
        let mut rule = RandomPivot::new(rand::thread_rng());

        for _ in 0..100 {
            assert_eq!(median_by_selection(&values, &mut rule), Some(11.72));
        }
    }

    proptest! {
        #[test]
        fn prop_selection_matches_sorted_position(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
            seed in any::<u64>(),
            k_frac in 0.0f64..1.0,
        ) {
            let k = ((values.len() as f64) * k_frac) as usize;
            let k = k.min(values.len() - 1);
            let expected = sorted(&values)[k];

            prop_assert_eq!(quickselect(&values, k, &mut seeded(seed)), Some(expected));
        }

        #[test]
        fn prop_pivot_rule_does_not_change_median(
            values in prop::collection::vec(-1000i32..1000, 1..100),
            seed in any::<u64>(),
        ) {
            let values: Vec<f64> = values.into_iter().map(f64::from).collect();

            let random = median_by_selection(&values, &mut seeded(seed));
            let middle = median_by_selection(&values, &mut MiddlePivot);
            prop_assert_eq!(random, middle);
        }
    }
}
