//! End-to-end cleaning of CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use contract_cli::pipeline::{default_output_path, run_file};
use contract_model::{CleaningOptions, ResolutionPolicy};
use tempfile::TempDir;

const SAMPLE: &str = "\
Supplier,Supplier_Product,Ref_No,start_date,end_date,QtyFct
C,2496185,-2607811,20-03-2013,21-03-2013,1
C,2496186,-2607899,10-01-2014,31-12-2019,2
C,2496186,-2607904,01-02-2018,08-02-2020,3
C,2496186,-2607904,01-05-2018,08-05-2020,
C,2498095,-2607905,21-03-2021,20-03-2021,5
";

fn write_sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("contracts.csv");
    fs::write(&path, SAMPLE).unwrap();
    path
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn drop_extras_writes_cleaned_csv() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = default_output_path(&input);

    let outcome = run_file(&input, Some(&output), &CleaningOptions::default()).unwrap();

    assert_eq!(outcome.output.as_deref(), Some(output.as_path()));
    insta::assert_snapshot!(read(&output).trim_end(), @r"
    Supplier,Supplier_Product,Ref_No,start_date,end_date,QtyFct
    C,2496185,-2607811,2013-03-20,2013-03-21,1
    C,2496186,-2607899,2014-01-10,2019-12-31,2
    C,2498095,-2607905,2021-03-20,2021-03-21,5
    ");
}

#[test]
fn extend_and_drop_carries_latest_end_date() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let output = dir.path().join("out.csv");
    let options = CleaningOptions::default().with_policy(ResolutionPolicy::ExtendAndDrop);

    run_file(&input, Some(&output), &options).unwrap();

    let text = read(&output);
    assert!(text.contains("C,2496186,-2607899,2014-01-10,2020-05-08,2"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn check_run_reports_defects_without_writing() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let outcome = run_file(&input, None, &CleaningOptions::default()).unwrap();

    assert!(outcome.report.has_defects());
    assert!(outcome.output.is_none());
    assert!(!default_output_path(&input).exists());
    let swapped: Vec<&str> = outcome
        .swapped
        .iter()
        .map(|label| label.reference_no.as_str())
        .collect();
    assert_eq!(swapped, vec!["-2607905"]);
    let flagged: Vec<(&str, &str)> = outcome
        .flagged
        .iter()
        .map(|label| (label.reference_no.as_str(), label.group.as_str()))
        .collect();
    assert_eq!(
        flagged,
        vec![("-2607904", "C-2496186"), ("-2607904", "C-2496186")]
    );
}

#[test]
fn header_only_file_gives_empty_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.csv");
    fs::write(&input, "Supplier,Supplier_Product,Ref_No,start_date,end_date\n").unwrap();
    let output = dir.path().join("empty.cleaned.csv");

    let outcome = run_file(&input, Some(&output), &CleaningOptions::default()).unwrap();

    assert_eq!(outcome.report.output_rows, 0);
    assert!(!outcome.report.has_defects());
    assert_eq!(
        read(&output).trim_end(),
        "Supplier,Supplier_Product,Ref_No,start_date,end_date"
    );
}

#[test]
fn missing_column_names_the_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "Supplier,Ref_No\nC,1\n").unwrap();

    let error = run_file(&input, None, &CleaningOptions::default()).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("bad.csv"));
    assert!(message.contains("Supplier_Product"));
}
