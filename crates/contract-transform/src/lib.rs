//! Supplier contract interval cleaning.
//!
//! - **normalization**: fixed-pattern date parsing and reversed-interval repair
//! - **overlap**: per-group overlap scan and the resolution policies
//! - **pipeline**: both stages combined under [`CleaningOptions`](contract_model::CleaningOptions)

pub mod normalization;
pub mod overlap;
pub mod pipeline;

pub use normalization::{NormalizeReport, normalize_intervals, parse_contract_date};
pub use overlap::{OverlapReport, OverlapScan, resolve_overlaps};
pub use pipeline::{CleaningReport, clean_table};
