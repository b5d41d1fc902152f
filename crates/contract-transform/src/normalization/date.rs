//! Parsing of contract date cells.
//!
//! Only the fixed day-month-year pattern is accepted. Anything else becomes
//! [`DateValue::Missing`]; parse failures are data, not errors.

use chrono::NaiveDate;
use contract_model::{CONTRACT_DATE_FORMAT, ContractTable, DateValue};

/// Parse a raw date cell using [`CONTRACT_DATE_FORMAT`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use contract_model::DateValue;
/// use contract_transform::normalization::parse_contract_date;
///
/// assert_eq!(
///     parse_contract_date("21-03-2021"),
///     DateValue::Valid(NaiveDate::from_ymd_opt(2021, 3, 21).unwrap())
/// );
/// assert_eq!(parse_contract_date("2021-03-21"), DateValue::Missing);
/// assert_eq!(parse_contract_date(""), DateValue::Missing);
/// ```
pub fn parse_contract_date(value: &str) -> DateValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return DateValue::Missing;
    }
    NaiveDate::parse_from_str(trimmed, CONTRACT_DATE_FORMAT)
        .map(DateValue::Valid)
        .unwrap_or(DateValue::Missing)
}

/// Parse a cell in place if it still holds raw text.
///
/// Returns true if the cell was coerced to [`DateValue::Missing`].
fn coerce_cell(cell: &mut DateValue) -> bool {
    let DateValue::Text(text) = cell else {
        return false;
    };
    let parsed = parse_contract_date(text);
    *cell = parsed;
    cell.is_missing()
}

/// Parse every textual start/end date in the table.
///
/// Cells that are already parsed (or already missing) are left alone, so
/// repeated calls are no-ops. Returns the number of cells that failed to
/// parse during this call.
pub fn coerce_dates(table: &mut ContractTable) -> usize {
    let mut coerced = 0;
    for record in &mut table.records {
        if coerce_cell(&mut record.start_date) {
            coerced += 1;
        }
        if coerce_cell(&mut record.end_date) {
            coerced += 1;
        }
    }
    coerced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateValue {
        DateValue::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn parses_day_month_year() {
        assert_eq!(parse_contract_date("10-01-2014"), ymd(2014, 1, 10));
        assert_eq!(parse_contract_date(" 31-12-2019 "), ymd(2019, 12, 31));
    }

    #[test]
    fn other_patterns_become_missing() {
        assert_eq!(parse_contract_date("2014-01-10"), DateValue::Missing);
        assert_eq!(parse_contract_date("10/01/2014"), DateValue::Missing);
        assert_eq!(parse_contract_date("31-02-2020"), DateValue::Missing);
        assert_eq!(parse_contract_date("not a date"), DateValue::Missing);
    }

    #[test]
    fn coerce_counts_only_new_failures() {
        let mut table = ContractTable::default();
        table.push(
            "C",
            1,
            "r",
            DateValue::Text("01-01-2020".to_string()),
            DateValue::Text("bogus".to_string()),
            vec![],
        );
        table.push("C", 2, "r", DateValue::Missing, ymd(2020, 1, 1), vec![]);

        assert_eq!(coerce_dates(&mut table), 1);
        assert_eq!(table.records[0].start_date, ymd(2020, 1, 1));
        assert_eq!(table.records[0].end_date, DateValue::Missing);
        assert_eq!(coerce_dates(&mut table), 0);
    }
}
