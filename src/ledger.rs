// 📒 Expense Ledger - year-month → day → category → amounts
//
// The raw ledger is a dynamically typed JSON value, exactly as it is
// written down as a literal. `validation::validate` turns it into the
// typed `Ledger` below; nothing else constructs one.

use crate::calendar::YearMonth;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

// ============================================================================
// TYPED LEDGER
// ============================================================================

/// Amounts per category label for one day
pub type CategoryMap = BTreeMap<String, Vec<f64>>;

/// One day of expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLedger {
    /// Original key as written (e.g. "01")
    pub key: String,

    /// Day-of-month, already checked against the month length
    pub day: u32,

    pub categories: CategoryMap,
}

impl DayLedger {
    /// All amounts of the day, category by category
    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.categories.values().flatten().copied()
    }
}

/// One month of expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLedger {
    pub year_month: YearMonth,
    pub days: Vec<DayLedger>,
}

/// A validated expense ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ledger {
    pub months: Vec<MonthLedger>,
}

impl Ledger {
    /// Total number of recorded amounts, ignoring any filter
    pub fn amount_count(&self) -> usize {
        self.months
            .iter()
            .flat_map(|m| &m.days)
            .map(|d| d.categories.values().map(Vec::len).sum::<usize>())
            .sum()
    }

    /// No months, or no days in any month
    pub fn is_empty(&self) -> bool {
        self.months.iter().all(|m| m.days.is_empty())
    }
}

// ============================================================================
// EXAMPLE LEDGER
// ============================================================================

/// The fixed example ledger the CLI runs against.
pub fn example_ledger() -> Value {
    json!({
        "2023-01": {
            "01": {
                "food": [22.11, 43, 11.72, 2.2, 36.29, 2.5, 19],
                "fuel": [210.22]
            },
            "09": {
                "food": [11.9],
                "fuel": [190.22]
            }
        },
        "2023-03": {
            "07": {
                "food": [20, 11.9, 30.20, 11.9]
            },
            "04": {
                "food": [10.20, 11.50, 2.5],
                "fuel": []
            }
        },
        "2023-04": {}
    })
}

/// Short name of a JSON value's type, used in error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
