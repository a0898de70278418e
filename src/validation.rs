// ✅ Ledger Validation
// Checks every key and leaf of a raw ledger and builds the typed `Ledger`.
//
// Rules:
// 1. The ledger, each day map and each category map are mappings
// 2. Year-month keys parse as YYYY-MM with a real month
// 3. Day keys are integers between 1 and the last day of their month
// 4. Category values are lists of numbers (no strings, booleans or nulls)

use crate::calendar::YearMonth;
use crate::error::LedgerError;
use crate::ledger::{json_type_name, CategoryMap, DayLedger, Ledger, MonthLedger};
use serde_json::{Map, Value};
use tracing::{debug, warn};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Validate a raw ledger, stopping at the first problem found.
pub fn validate(expenses: &Value) -> Result<Ledger, LedgerError> {
    let mut walker = Walker::new(Mode::FailFast);
    match walker.ledger(expenses) {
        Ok(ledger) => {
            debug!(months = ledger.months.len(), "ledger validated");
            Ok(ledger)
        }
        Err(Stop(issue)) => {
            warn!(%issue, "ledger rejected");
            Err(issue)
        }
    }
}

/// Pass/fail view of [`validate`].
pub fn is_input_data_valid(expenses: &Value) -> bool {
    validate(expenses).is_ok()
}

/// Walk the whole ledger and report every problem instead of the first.
/// An empty result means the ledger is valid.
pub fn audit(expenses: &Value) -> Vec<LedgerError> {
    let mut walker = Walker::new(Mode::Exhaustive);
    // Exhaustive mode never stops early
    let _ = walker.ledger(expenses);
    walker.issues
}

// ============================================================================
// WALKER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    FailFast,
    Exhaustive,
}

/// Carries the issue that ended a fail-fast walk
struct Stop(LedgerError);

struct Walker {
    mode: Mode,
    issues: Vec<LedgerError>,
}

impl Walker {
    fn new(mode: Mode) -> Self {
        Walker {
            mode,
            issues: Vec::new(),
        }
    }

    fn report(&mut self, issue: LedgerError) -> Result<(), Stop> {
        match self.mode {
            Mode::FailFast => Err(Stop(issue)),
            Mode::Exhaustive => {
                self.issues.push(issue);
                Ok(())
            }
        }
    }

    fn ledger(&mut self, expenses: &Value) -> Result<Ledger, Stop> {
        let mut ledger = Ledger::default();

        let Some(months) = expenses.as_object() else {
            self.report(LedgerError::NotAMapping {
                path: "ledger".to_string(),
                found: json_type_name(expenses),
            })?;
            return Ok(ledger);
        };

        for (key, days) in months {
            if let Some(month) = self.month(key, days)? {
                ledger.months.push(month);
            }
        }

        Ok(ledger)
    }

    fn month(&mut self, key: &str, days: &Value) -> Result<Option<MonthLedger>, Stop> {
        let Some(year_month) = YearMonth::parse(key) else {
            self.report(LedgerError::MalformedKey {
                key: key.to_string(),
            })?;
            return Ok(None);
        };

        let Some(days) = days.as_object() else {
            self.report(LedgerError::NotAMapping {
                path: key.to_string(),
                found: json_type_name(days),
            })?;
            return Ok(None);
        };

        let mut month = MonthLedger {
            year_month,
            days: Vec::with_capacity(days.len()),
        };

        for (day_key, categories) in days {
            if let Some(day) = self.day(year_month, day_key, categories)? {
                month.days.push(day);
            }
        }

        Ok(Some(month))
    }

    fn day(
        &mut self,
        year_month: YearMonth,
        day_key: &str,
        categories: &Value,
    ) -> Result<Option<DayLedger>, Stop> {
        let last_day = year_month.last_day();
        let day = match day_key.trim().parse::<i64>() {
            Ok(day) if day < 1 => {
                self.report(LedgerError::MalformedDay {
                    year_month: year_month.to_string(),
                    day: day_key.to_string(),
                })?;
                None
            }
            Ok(day) if day > last_day as i64 => {
                self.report(LedgerError::DayOutOfRange {
                    year_month: year_month.to_string(),
                    day,
                    last_day,
                })?;
                None
            }
            Ok(day) => Some(day as u32),
            Err(_) => {
                self.report(LedgerError::MalformedDay {
                    year_month: year_month.to_string(),
                    day: day_key.to_string(),
                })?;
                None
            }
        };

        let Some(categories) = categories.as_object() else {
            self.report(LedgerError::NotAMapping {
                path: format!("{}-{}", year_month, day_key),
                found: json_type_name(categories),
            })?;
            return Ok(None);
        };

        let categories = self.categories(year_month, day_key, categories)?;

        Ok(day.map(|day| DayLedger {
            key: day_key.to_string(),
            day,
            categories,
        }))
    }

    fn categories(
        &mut self,
        year_month: YearMonth,
        day_key: &str,
        categories: &Map<String, Value>,
    ) -> Result<CategoryMap, Stop> {
        let mut parsed = CategoryMap::new();

        for (category, amounts) in categories {
            let Some(amounts) = amounts.as_array() else {
                self.report(LedgerError::NotAList {
                    year_month: year_month.to_string(),
                    day: day_key.to_string(),
                    category: category.clone(),
                })?;
                continue;
            };

            let mut values = Vec::with_capacity(amounts.len());
            for amount in amounts {
                match amount.as_f64() {
                    Some(value) => values.push(value),
                    None => self.report(LedgerError::NonNumericAmount {
                        year_month: year_month.to_string(),
                        day: day_key.to_string(),
                        category: category.clone(),
                        value: amount.to_string(),
                    })?,
                }
            }

            parsed.insert(category.clone(), values);
        }

        Ok(parsed)
    }
}

// ============================================================================
// TESTS
// ============================================================================
