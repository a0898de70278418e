// Expense Median - Core Library
// Median of expenses recorded up to the first Sunday of each month,
// by full sort and by quickselect.

pub mod calendar;
pub mod error;
pub mod flatten;
pub mod ledger;
pub mod median;
pub mod quickselect;
pub mod validation;

// Re-export commonly used types
pub use calendar::{first_sunday, last_day_of_month, YearMonth};
pub use error::{ErrorKind, LedgerError};
pub use flatten::{cutoffs, flatten_until_first_sunday, MonthCutoff};
pub use ledger::{example_ledger, CategoryMap, DayLedger, Ledger, MonthLedger};
pub use median::{
    compute_median, median_by_sort, median_of, solution1, solution2, MedianReport,
    MedianStrategy,
};
pub use quickselect::{median_by_selection, quickselect, MiddlePivot, PivotRule, RandomPivot};
pub use validation::{audit, is_input_data_valid, validate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
