//! Writing cleaned contract tables back to CSV.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use contract_model::{ColumnNames, ContractTable, DateValue};
use polars::prelude::*;
use tracing::info;

use crate::error::{IngestError, Result};

/// Days since 1970-01-01, the physical representation of a Polars date.
fn epoch_days(value: &DateValue) -> Result<Option<i32>> {
    let Some(date) = value.date() else {
        return Ok(None);
    };
    let days = date.signed_duration_since(NaiveDate::default()).num_days();
    i32::try_from(days)
        .map(Some)
        .map_err(|_| IngestError::DataFrame {
            message: format!("date {date} is out of range"),
        })
}

fn date_column(name: &str, values: Vec<Option<i32>>) -> Result<Column> {
    let series = Series::new(name.into(), values).cast(&DataType::Date)?;
    Ok(series.into_column())
}

/// Build a DataFrame with the named columns first, then the payload columns.
///
/// Date columns are typed dates; cells that are not a parsed date are null.
pub fn table_to_dataframe(table: &ContractTable, columns: &ColumnNames) -> Result<DataFrame> {
    let records = &table.records;

    let supplier: Vec<&str> = records.iter().map(|r| r.supplier.as_str()).collect();
    let product: Vec<i64> = records.iter().map(|r| r.product_id).collect();
    let reference: Vec<&str> = records.iter().map(|r| r.reference_no.as_str()).collect();
    let start = records
        .iter()
        .map(|r| epoch_days(&r.start_date))
        .collect::<Result<Vec<_>>>()?;
    let end = records
        .iter()
        .map(|r| epoch_days(&r.end_date))
        .collect::<Result<Vec<_>>>()?;

    let mut out = vec![
        Series::new(columns.supplier.as_str().into(), supplier).into_column(),
        Series::new(columns.product_id.as_str().into(), product).into_column(),
        Series::new(columns.reference_no.as_str().into(), reference).into_column(),
        date_column(&columns.start_date, start)?,
        date_column(&columns.end_date, end)?,
    ];
    for (idx, name) in table.payload_columns.iter().enumerate() {
        let values: Vec<Option<&str>> = records
            .iter()
            .map(|r| r.payload.get(idx).and_then(|v| v.as_deref()))
            .collect();
        out.push(Series::new(name.as_str().into(), values).into_column());
    }

    Ok(DataFrame::new(out)?)
}

/// Write `table` to `path` as CSV with a header row.
pub fn write_contract_csv(table: &ContractTable, columns: &ColumnNames, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table, columns)?;
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(path = %path.display(), rows = df.height(), "wrote contract table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateValue {
        DateValue::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(epoch_days(&ymd(1970, 1, 2)).unwrap(), Some(1));
        assert_eq!(epoch_days(&DateValue::Missing).unwrap(), None);
        assert_eq!(
            epoch_days(&DateValue::Text("x".to_string())).unwrap(),
            None
        );
    }

    #[test]
    fn test_table_to_dataframe_layout() {
        let mut table = ContractTable::new(vec!["QtyFct".to_string()]);
        table.push(
            "C",
            2496186,
            "-2607899",
            ymd(2014, 1, 10),
            DateValue::Missing,
            vec![Some("1".to_string())],
        );

        let df = table_to_dataframe(&table, &ColumnNames::default()).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Supplier",
                "Supplier_Product",
                "Ref_No",
                "start_date",
                "end_date",
                "QtyFct"
            ]
        );
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("start_date").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("end_date").unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let table = ContractTable::new(vec!["Note".to_string()]);
        let df = table_to_dataframe(&table, &ColumnNames::default()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 6);
    }
}
