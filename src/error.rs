// ⚠️ Ledger Errors
// Every reason a ledger can be rejected, plus the empty-result case.

use serde::Serialize;
use thiserror::Error;

/// Why a ledger produced no median.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("{path} must be a mapping, found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("Malformed year-month key '{key}' (expected YYYY-MM)")]
    MalformedKey { key: String },

    #[error("Malformed day key '{day}' under {year_month}")]
    MalformedDay { year_month: String, day: String },

    #[error("Day {day} under {year_month} exceeds last day of month ({last_day})")]
    DayOutOfRange {
        year_month: String,
        day: i64,
        last_day: u32,
    },

    #[error("Category '{category}' on {year_month}-{day} is not a list of amounts")]
    NotAList {
        year_month: String,
        day: String,
        category: String,
    },

    #[error("Non-numeric amount {value} in '{category}' on {year_month}-{day}")]
    NonNumericAmount {
        year_month: String,
        day: String,
        category: String,
        value: String,
    },

    #[error("No amounts recorded up to the first Sunday of any month")]
    NoAmounts,
}

/// Coarse classification of a [`LedgerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Structure or key could not be parsed
    MalformedKey,
    /// Day-of-month past the end of its month
    DayOutOfRange,
    /// Leaf value is not a number
    NonNumericAmount,
    /// Valid ledger, nothing to take the median of
    Empty,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotAMapping { .. }
            | LedgerError::MalformedKey { .. }
            | LedgerError::MalformedDay { .. } => ErrorKind::MalformedKey,
            LedgerError::DayOutOfRange { .. } => ErrorKind::DayOutOfRange,
            LedgerError::NotAList { .. } | LedgerError::NonNumericAmount { .. } => {
                ErrorKind::NonNumericAmount
            }
            LedgerError::NoAmounts => ErrorKind::Empty,
        }
    }

    /// True for every error raised by validation (everything but `NoAmounts`)
    pub fn is_invalid_input(&self) -> bool {
        self.kind() != ErrorKind::Empty
    }
}
