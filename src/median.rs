// 📊 Median - the two strategies and the public entry points
//
// solution1: validate → flatten → sort → middle        O(n log n)
// solution2: validate → flatten → quickselect          O(n) expected
//
// Both return `None` on invalid or empty input. `compute_median` is the
// same pipeline with a distinguishable error instead.

use crate::error::LedgerError;
use crate::flatten::{cutoffs, flatten_until_first_sunday, MonthCutoff};
use crate::quickselect::{median_by_selection, MiddlePivot, PivotRule, RandomPivot};
use crate::validation::{audit, validate};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

// ============================================================================
// STRATEGY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MedianStrategy {
    /// Full sort, then pick the middle
    Sort,
    /// Quickselect the middle order statistic(s)
    Select,
}

impl MedianStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MedianStrategy::Sort => "sort",
            MedianStrategy::Select => "select",
        }
    }

    /// Matches the sort-based and selection-based entry points
    pub fn solution_name(&self) -> &'static str {
        match self {
            MedianStrategy::Sort => "solution1",
            MedianStrategy::Select => "solution2",
        }
    }
}

impl fmt::Display for MedianStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SORT-BASED MEDIAN
// ============================================================================

/// Sort ascending and take the middle element, or the mean of the two
/// middle elements for even lengths. `None` when empty.
pub fn median_by_sort(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n == 0 {
        None
    } else if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Median of `values` using `strategy`. `None` when empty.
pub fn median_of(
    values: &[f64],
    strategy: MedianStrategy,
    pivot_rule: &mut dyn PivotRule,
) -> Option<f64> {
    match strategy {
        MedianStrategy::Sort => median_by_sort(values),
        MedianStrategy::Select => median_by_selection(values, pivot_rule),
    }
}

/// Median of every amount recorded up to and including the first Sunday
/// of each month.
pub fn compute_median(
    expenses: &Value,
    strategy: MedianStrategy,
    pivot_rule: &mut dyn PivotRule,
) -> Result<f64, LedgerError> {
    let ledger = validate(expenses)?;
    let values = flatten_until_first_sunday(&ledger);
    debug!(%strategy, amounts = values.len(), "computing median");

    median_of(&values, strategy, pivot_rule).ok_or(LedgerError::NoAmounts)
}

/// Sort-based median; `None` when the ledger is invalid or nothing qualifies.
pub fn solution1(expenses: &Value) -> Option<f64> {
    compute_median(expenses, MedianStrategy::Sort, &mut MiddlePivot).ok()
}

/// Quickselect median with a random pivot; `None` when the ledger is
/// invalid or nothing qualifies.
pub fn solution2(expenses: &Value) -> Option<f64> {
    let mut pivot_rule = RandomPivot::new(rand::thread_rng());
    compute_median(expenses, MedianStrategy::Select, &mut pivot_rule).ok()
}

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of one strategy, with the month cutoffs that fed it
#[derive(Debug, Clone, Serialize)]
pub struct MedianReport {
    pub strategy: MedianStrategy,
    pub solution: &'static str,
    pub median: Option<f64>,
    pub amount_count: usize,
    pub months: Vec<MonthCutoff>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl MedianReport {
    /// Run `strategy` over `expenses` and describe the result.
    /// `issues` is filled with the full audit when validation fails.
    pub fn run(
        expenses: &Value,
        strategy: MedianStrategy,
        pivot_rule: &mut dyn PivotRule,
    ) -> Self {
        let (median, amount_count, months, issues) = match validate(expenses) {
            Ok(ledger) => {
                let values = flatten_until_first_sunday(&ledger);
                let median = median_of(&values, strategy, pivot_rule);
                (median, values.len(), cutoffs(&ledger), Vec::new())
            }
            Err(_) => {
                let issues = audit(expenses).iter().map(ToString::to_string).collect();
                (None, 0, Vec::new(), issues)
            }
        };

        MedianReport {
            strategy,
            solution: strategy.solution_name(),
            median,
            amount_count,
            months,
            issues,
        }
    }

    pub fn summary(&self) -> String {
        match self.median {
            Some(median) => format!(
                "{} ({}): {} over {} amounts",
                self.solution, self.strategy, median, self.amount_count
            ),
            None => format!("{} ({}): None", self.solution, self.strategy),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ledger::example_ledger;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use serde_json::json;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_median_by_sort() {
        assert_eq!(median_by_sort(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median_by_sort(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median_by_sort(&[5.0]), Some(5.0));
        assert_eq!(median_by_sort(&[]), None);
    }

    #[test]
    fn test_example_ledger_median() {
        // 2023-01-01 (Sunday) and 2023-03-04 qualify: 11 amounts, middle is 11.72
        let expenses = example_ledger();

        assert_eq!(solution1(&expenses), Some(11.72));
        assert_eq!(solution2(&expenses), Some(11.72));
    }

    #[test]
    fn test_january_only() {
        let expenses = json!({
            "2023-01": {
                "01": {
                    "food": [22.11, 43, 11.72, 2.2, 36.29, 2.5, 19],
                    "fuel": [210.22]
                },
                "09": {
                    "food": [11.9],
                    "fuel": [190.22]
                }
            }
        });

        // Sorted: 2.2, 2.5, 11.72, 19, 22.11, 36.29, 43, 210.22
        let expected = (19.0 + 22.11) / 2.0;
        assert!((solution1(&expenses).unwrap() - expected).abs() < EPS);
        assert!((solution2(&expenses).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_march_only() {
        let expenses = json!({
            "2023-03": {
                "07": {"food": [20, 11.9, 30.20, 11.9]},
                "04": {"food": [10.20, 11.50, 2.5], "fuel": []}
            }
        });

        assert_eq!(solution1(&expenses), Some(10.20));
        assert_eq!(solution2(&expenses), Some(10.20));
    }

    #[test]
    fn test_empty_ledgers_have_no_result() {
        for expenses in [json!({}), json!({"2023-04": {}}), json!({"2023-04": {}, "2023-05": {}})] {
            assert_eq!(solution1(&expenses), None);
            assert_eq!(solution2(&expenses), None);

            let err = compute_median(&expenses, MedianStrategy::Sort, &mut MiddlePivot).unwrap_err();
            assert_eq!(err, LedgerError::NoAmounts);
        }
    }

    #[test]
    fn test_only_late_days_have_no_result() {
        let expenses = json!({"2023-01": {"09": {"food": [11.9]}}});

        assert_eq!(solution1(&expenses), None);
        assert_eq!(solution2(&expenses), None);
    }

    #[test]
    fn test_invalid_day_has_no_result() {
        let expenses = json!({"2023-02": {"30": {"food": [1.0, 2.0]}}});

        assert_eq!(solution1(&expenses), None);
        assert_eq!(solution2(&expenses), None);

        let err = compute_median(&expenses, MedianStrategy::Select, &mut MiddlePivot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DayOutOfRange);
    }

    #[test]
    fn test_invalid_amount_has_no_result() {
        let expenses = json!({"2023-01": {"01": {"food": [1.0, "2.0"]}}});

        assert_eq!(solution1(&expenses), None);
        assert_eq!(solution2(&expenses), None);
    }

    #[test]
    fn test_report_for_example_ledger() {
        let report = MedianReport::run(&example_ledger(), MedianStrategy::Select, &mut MiddlePivot);

        assert_eq!(report.median, Some(11.72));
        assert_eq!(report.amount_count, 11);
        assert_eq!(report.months.len(), 3);
        assert!(report.issues.is_empty());
        assert_eq!(report.summary(), "solution2 (select): 11.72 over 11 amounts");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["strategy"], "select");
        assert!(json.get("issues").is_none());
    }

    #[test]
    fn test_report_for_invalid_ledger() {
        let expenses = json!({"2023-02": {"30": {"food": [1.0]}, "31": {}}});
        let report = MedianReport::run(&expenses, MedianStrategy::Sort, &mut MiddlePivot);

        assert_eq!(report.median, None);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.summary(), "solution1 (sort): None");
    }

    proptest! {
        #[test]
        fn prop_sort_and_selection_agree(
            values in prop::collection::vec(-1.0e4f64..1.0e4, 0..150),
            seed in any::<u64>(),
        ) {
            let mut pivot_rule = RandomPivot::new(SmallRng::seed_from_u64(seed));
            let by_sort = median_by_sort(&values);
            let by_selection = median_by_selection(&values, &mut pivot_rule);

            match (by_sort, by_selection) {
                (Some(a), Some(b)) => prop_assert!((a - b).abs() < EPS),
                (a, b) => prop_assert_eq!(a, b),
            }
        }
    }
}
