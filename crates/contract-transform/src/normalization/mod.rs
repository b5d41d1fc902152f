//! Date parsing and interval normalization.

pub mod date;
pub mod interval;

pub use date::{coerce_dates, parse_contract_date};
pub use interval::{NormalizeReport, normalize_intervals};
