// 🧺 First-Sunday Filter
// Collects every amount recorded on or before the first Sunday of each month.

use crate::ledger::Ledger;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// How one month was cut at its first Sunday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCutoff {
    pub year_month: String,
    pub first_sunday: NaiveDate,
    pub days_included: usize,
    pub days_excluded: usize,
    pub amounts: usize,
}

/// All amounts on days up to and including each month's first Sunday,
/// in no particular order. Empty when nothing qualifies.
pub fn flatten_until_first_sunday(ledger: &Ledger) -> Vec<f64> {
    let mut values = Vec::new();

    for month in &ledger.months {
        let first_sunday = month.year_month.first_sunday();
        let before = values.len();

        for day in month.days.iter().filter(|d| d.day <= first_sunday) {
            values.extend(day.amounts());
        }

        debug!(
            year_month = %month.year_month,
            first_sunday,
            amounts = values.len() - before,
            "month flattened"
        );
    }

    values
}

/// Per-month view of what the filter kept and dropped
pub fn cutoffs(ledger: &Ledger) -> Vec<MonthCutoff> {
    ledger
        .months
        .iter()
        .map(|month| {
            let first_sunday = month.year_month.first_sunday();
            let (included, excluded): (Vec<_>, Vec<_>) =
                month.days.iter().partition(|d| d.day <= first_sunday);

            MonthCutoff {
                year_month: month.year_month.to_string(),
                first_sunday: month.year_month.first_sunday_date(),
                days_included: included.len(),
                days_excluded: excluded.len(),
                amounts: included.iter().map(|d| d.amounts().count()).sum(),
            }
        })
        .collect()
}
