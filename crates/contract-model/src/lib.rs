//! Supplier contract data model.
//!
//! Records carry a `[start_date, end_date]` validity window per supplier
//! product. Dates are modelled as [`DateValue`] so unparsable input stays
//! visible as a missing value instead of disappearing.

pub mod date;
pub mod error;
pub mod ids;
pub mod options;
pub mod record;

pub use date::{CONTRACT_DATE_FORMAT, DateValue, OUTPUT_DATE_FORMAT};
pub use error::{ContractError, Result};
pub use ids::{GROUP_KEY_SEPARATOR, GroupKey, RowId};
pub use options::{CleaningOptions, ColumnNames, ResolutionPolicy};
pub use record::{ContractRecord, ContractTable};
