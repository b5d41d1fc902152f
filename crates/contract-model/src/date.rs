//! Contract validity dates.
//!
//! A date cell starts life as raw text and is parsed exactly once. Text that
//! does not match the contract pattern degrades to [`DateValue::Missing`]
//! instead of failing the batch, and every comparison involving a missing
//! value answers "no relationship".

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// The single day-month-year pattern accepted for contract dates.
pub const CONTRACT_DATE_FORMAT: &str = "%d-%m-%Y";

/// Rendering used for parsed dates on output.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A start or end date of a contract interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateValue {
    /// Raw input text, not yet parsed.
    Text(String),
    /// A parsed calendar date.
    Valid(NaiveDate),
    /// Input that could not be parsed, or an empty cell.
    Missing,
}

impl DateValue {
    /// Returns the parsed date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateValue::Valid(date) => Some(*date),
            DateValue::Text(_) | DateValue::Missing => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, DateValue::Valid(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, DateValue::Missing)
    }

    /// `self <= other`, false when either side is not a parsed date.
    pub fn on_or_before(&self, other: &DateValue) -> bool {
        matches!((self.date(), other.date()), (Some(a), Some(b)) if a <= b)
    }

    /// `self < other`, false when either side is not a parsed date.
    pub fn is_before(&self, other: &DateValue) -> bool {
        matches!((self.date(), other.date()), (Some(a), Some(b)) if a < b)
    }

    /// Total order used for sorting: parsed dates ascending, then everything
    /// else (unparsed text and missing values) in stable input order.
    pub fn sort_cmp(&self, other: &DateValue) -> Ordering {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Valid(date)
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::Valid(date) => write!(f, "{}", date.format(OUTPUT_DATE_FORMAT)),
            DateValue::Text(text) => f.write_str(text),
            DateValue::Missing => f.write_str("NaT"),
        }
    }
}
