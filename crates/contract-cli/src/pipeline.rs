//! File-level cleaning run: load, clean, and optionally write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use contract_ingest::{read_contract_csv, write_contract_csv};
use contract_model::{CleaningOptions, ContractTable, GroupKey, RowId};
use contract_transform::{CleaningReport, clean_table};
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// Suffix inserted before the extension of the default output file.
pub const CLEANED_SUFFIX: &str = "cleaned";

/// A row of the input, named the way a reader of the file would find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub row: RowId,
    pub reference_no: String,
    pub group: GroupKey,
}

/// Everything a caller needs to report on one run.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub input: PathBuf,
    /// Written file, `None` for dry runs and checks.
    pub output: Option<PathBuf>,
    pub report: CleaningReport,
    /// Rows whose dates were swapped.
    pub swapped: Vec<RowLabel>,
    /// Rows flagged as overlapping, in scan order.
    pub flagged: Vec<RowLabel>,
    /// The cleaned table.
    pub table: ContractTable,
}

/// `<dir>/<stem>.cleaned.csv` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "contracts".to_string());
    input.with_file_name(format!("{stem}.{CLEANED_SUFFIX}.csv"))
}

fn label_rows(
    labels: &BTreeMap<RowId, (String, GroupKey)>,
    rows: impl IntoIterator<Item = RowId>,
) -> Vec<RowLabel> {
    rows.into_iter()
        .filter_map(|row| {
            labels.get(&row).map(|(reference_no, group)| RowLabel {
                row,
                reference_no: reference_no.clone(),
                group: group.clone(),
            })
        })
        .collect()
}

/// Clean `input` with `options`, writing to `output` when one is given.
pub fn run_file(
    input: &Path,
    output: Option<&Path>,
    options: &CleaningOptions,
) -> Result<CleanOutcome> {
    let span = info_span!("clean_file", input = %input.display());
    let _guard = span.enter();

    let mut table = read_contract_csv(input, &options.columns)
        .with_context(|| format!("load {}", input.display()))?;
    let labels: BTreeMap<RowId, (String, GroupKey)> = table
        .records
        .iter()
        .map(|record| {
            (
                record.row,
                (record.reference_no.clone(), record.group_key()),
            )
        })
        .collect();

    let report = clean_table(&mut table, options);

    let swapped = label_rows(&labels, report.normalize.swapped.iter().copied());
    let flagged = label_rows(
        &labels,
        report
            .overlaps
            .iter()
            .flat_map(|overlaps| overlaps.scan.rows()),
    );
    for label in &flagged {
        debug!(
            row = %label.row,
            reference = redact_value(&label.reference_no),
            group = redact_value(label.group.as_str()),
            "flagged row"
        );
    }

    if let Some(path) = output {
        write_contract_csv(&table, &options.columns, path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        swapped = swapped.len(),
        flagged = flagged.len(),
        written = output.is_some(),
        "cleaning run complete"
    );

    Ok(CleanOutcome {
        input: input.to_path_buf(),
        output: output.map(Path::to_path_buf),
        report,
        swapped,
        flagged,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/data/contracts.csv")),
            PathBuf::from("/data/contracts.cleaned.csv")
        );
        assert_eq!(
            default_output_path(Path::new("contracts")),
            PathBuf::from("contracts.cleaned.csv")
        );
    }
}
