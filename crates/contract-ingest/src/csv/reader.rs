//! CSV file reading into a [`ContractTable`].
//!
//! Every column is read as text. Dates stay unparsed until normalization so
//! that unparsable cells are counted in one place.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use contract_model::{ColumnNames, ContractTable, DateValue};
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::values::{cell_text, parse_i64};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects UTF-16 input, which the CSV reader would misparse.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

fn ensure_header(path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut first = String::new();
    BufReader::new(file)
        .read_line(&mut first)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if first.trim_start_matches('\u{feff}').trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read a CSV file with every column as a string column.
pub fn read_text_frame(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;
    ensure_header(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Header names as they appear in the file, without a BOM or padding.
fn header_name(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

fn find_column<'a>(df: &'a DataFrame, wanted: &str, path: &Path) -> Result<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| header_name(column.name().as_str()) == wanted)
        .ok_or_else(|| IngestError::MissingColumn {
            column: wanted.to_string(),
            path: path.to_path_buf(),
        })
}

/// Convert a text frame into a [`ContractTable`].
///
/// The five named columns are required; all other columns become payload in
/// file order. `path` is only used in error messages.
pub fn frame_to_table(df: &DataFrame, columns: &ColumnNames, path: &Path) -> Result<ContractTable> {
    columns.validate()?;

    let supplier = find_column(df, &columns.supplier, path)?;
    let product = find_column(df, &columns.product_id, path)?;
    let reference = find_column(df, &columns.reference_no, path)?;
    let start = find_column(df, &columns.start_date, path)?;
    let end = find_column(df, &columns.end_date, path)?;

    let payload: Vec<(String, &Column)> = df
        .get_columns()
        .iter()
        .map(|column| (header_name(column.name().as_str()).to_string(), column))
        .filter(|(name, _)| !columns.is_known(name))
        .collect();

    let mut table = ContractTable::new(payload.iter().map(|(name, _)| name.clone()).collect());
    for idx in 0..df.height() {
        let product_text = cell_text(product, idx).unwrap_or_default();
        let product_id = parse_i64(&product_text).ok_or_else(|| IngestError::InvalidValue {
            field: columns.product_id.clone(),
            value: product_text.clone(),
            row: idx,
            path: path.to_path_buf(),
        })?;
        table.push(
            cell_text(supplier, idx).unwrap_or_default(),
            product_id,
            cell_text(reference, idx).unwrap_or_default(),
            DateValue::Text(cell_text(start, idx).unwrap_or_default()),
            DateValue::Text(cell_text(end, idx).unwrap_or_default()),
            payload
                .iter()
                .map(|(_, column)| cell_text(column, idx))
                .collect(),
        );
    }

    debug!(
        payload_columns = table.payload_columns.len(),
        "mapped contract columns"
    );
    Ok(table)
}

/// Load a contract CSV file.
///
/// # Errors
///
/// Fails when the file is missing, too large, not UTF-8, has no header,
/// lacks one of the named columns, or holds a non-integer product id.
pub fn read_contract_csv(path: &Path, columns: &ColumnNames) -> Result<ContractTable> {
    let df = read_text_frame(path)?;
    let table = frame_to_table(&df, columns, path)?;
    info!(path = %path.display(), rows = table.len(), "loaded contract table");
    Ok(table)
}
