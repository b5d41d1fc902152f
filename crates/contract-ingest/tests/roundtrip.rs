//! Load, clean, and write a contract file through the ingest crate.

use std::fs;

use contract_ingest::{IngestError, read_contract_csv, write_contract_csv};
use contract_model::{CleaningOptions, ColumnNames, DateValue};
use contract_transform::clean_table;
use tempfile::TempDir;

#[test]
fn cleaned_table_is_written_with_iso_dates() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("contracts.csv");
    fs::write(
        &input,
        "\u{feff}Supplier,Supplier_Product,Ref_No,start_date,end_date,QtyFct\n\
         C,2498095,-2607905,21-03-2021,20-03-2021,5\n\
         C,2496185,-2607811,bad,21-03-2013,\n",
    )
    .unwrap();
    let columns = ColumnNames::default();

    let mut table = read_contract_csv(&input, &columns).unwrap();
    let report = clean_table(&mut table, &CleaningOptions::default());
    let output = dir.path().join("contracts.cleaned.csv");
    write_contract_csv(&table, &columns, &output).unwrap();

    assert_eq!(report.normalize.invalid_dates, 1);
    assert_eq!(table.records[0].start_date, DateValue::Missing);
    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Supplier,Supplier_Product,Ref_No,start_date,end_date,QtyFct",
            "C,2496185,-2607811,,2013-03-21,",
            "C,2498095,-2607905,2021-03-20,2021-03-21,5",
        ]
    );
}

#[test]
fn unwritable_output_is_reported() {
    let dir = TempDir::new().unwrap();
    let table = contract_model::ContractTable::default();
    let target = dir.path().join("missing-dir").join("out.csv");

    let result = write_contract_csv(&table, &ColumnNames::default(), &target);

    assert!(matches!(result, Err(IngestError::FileWrite { .. })));
}
