//! Reversed interval repair.
//!
//! Swaps `start_date` and `end_date` wherever both are parsed and the end
//! precedes the start. Rows with a missing endpoint are never touched and no
//! row is added or removed.

use std::mem;

use contract_model::{ContractTable, RowId};
use tracing::{debug, info};

use super::date::coerce_dates;

/// Outcome of a normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Rows whose endpoints were swapped, in table order.
    pub swapped: Vec<RowId>,
    /// Date cells that failed to parse during this pass.
    pub invalid_dates: usize,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        self.swapped.is_empty()
    }
}

/// Parse date cells and swap reversed intervals in place.
pub fn normalize_intervals(table: &mut ContractTable) -> NormalizeReport {
    let invalid_dates = coerce_dates(table);
    let mut swapped = Vec::new();
    for record in &mut table.records {
        if !record.is_reversed() {
            continue;
        }
        debug!(
            row = %record.row,
            start = %record.start_date,
            end = %record.end_date,
            "swapping reversed interval"
        );
        mem::swap(&mut record.start_date, &mut record.end_date);
        swapped.push(record.row);
    }
    info!(
        rows = table.len(),
        swapped = swapped.len(),
        invalid_dates,
        "interval normalization complete"
    );
    NormalizeReport {
        swapped,
        invalid_dates,
    }
}
