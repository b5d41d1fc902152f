//! Cleaning pipeline: interval normalization followed by optional overlap
//! resolution.

use contract_model::{CleaningOptions, ContractTable};
use tracing::info_span;

use crate::normalization::{NormalizeReport, normalize_intervals};
use crate::overlap::{OverlapReport, resolve_overlaps};

/// Reports from both cleaning stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub normalize: NormalizeReport,
    /// `None` when overlap resolution was disabled.
    pub overlaps: Option<OverlapReport>,
}

impl CleaningReport {
    /// True if the input had reversed or overlapping intervals.
    pub fn has_defects(&self) -> bool {
        !self.normalize.swapped.is_empty()
            || self
                .overlaps
                .as_ref()
                .is_some_and(|report| !report.scan.is_empty())
    }

    pub fn invalid_dates(&self) -> usize {
        self.normalize.invalid_dates
            + self
                .overlaps
                .as_ref()
                .map_or(0, |report| report.invalid_dates)
    }
}

/// Run the cleaning stages selected by `options` over `table` in place.
pub fn clean_table(table: &mut ContractTable, options: &CleaningOptions) -> CleaningReport {
    let input_rows = table.len();
    let normalize = {
        let span = info_span!("normalize_intervals", rows = input_rows);
        let _guard = span.enter();
        normalize_intervals(table)
    };
    let overlaps = options
        .resolve_overlaps
        .then(|| resolve_overlaps(table, options.policy));
    CleaningReport {
        input_rows,
        output_rows: table.len(),
        normalize,
        overlaps,
    }
}
