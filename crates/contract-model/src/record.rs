//! Contract records and the working table.

use crate::date::DateValue;
use crate::ids::{GroupKey, RowId};

/// One supplier-product validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRecord {
    /// Position in the loaded input.
    pub row: RowId,
    pub supplier: String,
    pub product_id: i64,
    /// Opaque reference, carried through unchanged.
    pub reference_no: String,
    pub start_date: DateValue,
    pub end_date: DateValue,
    /// Remaining columns, aligned with [`ContractTable::payload_columns`].
    pub payload: Vec<Option<String>>,
}

impl ContractRecord {
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(&self.supplier, self.product_id)
    }

    /// Both endpoints parsed and the end strictly before the start.
    pub fn is_reversed(&self) -> bool {
        self.end_date.is_before(&self.start_date)
    }

    /// Both endpoints are parsed dates.
    pub fn has_interval(&self) -> bool {
        self.start_date.is_valid() && self.end_date.is_valid()
    }
}

/// An ordered, in-memory table of contract records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractTable {
    /// Names of the columns carried in [`ContractRecord::payload`].
    pub payload_columns: Vec<String>,
    pub records: Vec<ContractRecord>,
}

impl ContractTable {
    pub fn new(payload_columns: Vec<String>) -> Self {
        Self {
            payload_columns,
            records: Vec::new(),
        }
    }

    /// Appends a record, assigning it the next [`RowId`].
    pub fn push(
        &mut self,
        supplier: impl Into<String>,
        product_id: i64,
        reference_no: impl Into<String>,
        start_date: DateValue,
        end_date: DateValue,
        payload: Vec<Option<String>>,
    ) -> RowId {
        let row = RowId::new(self.records.len());
        self.records.push(ContractRecord {
            row,
            supplier: supplier.into(),
            product_id,
            reference_no: reference_no.into(),
            start_date,
            end_date,
            payload,
        });
        row
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: RowId) -> Option<&ContractRecord> {
        self.records.iter().find(|record| record.row == row)
    }

    pub fn get_mut(&mut self, row: RowId) -> Option<&mut ContractRecord> {
        self.records.iter_mut().find(|record| record.row == row)
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.records.iter().map(|record| record.row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> DateValue {
        DateValue::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn push_assigns_sequential_row_ids() {
        let mut table = ContractTable::new(vec!["QtyFct".to_string()]);
        let first = table.push("C", 1, "-1", DateValue::Missing, DateValue::Missing, vec![None]);
        let second = table.push("C", 2, "-2", DateValue::Missing, DateValue::Missing, vec![None]);
        assert_eq!(first, RowId::new(0));
        assert_eq!(second, RowId::new(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn lookup_by_row_survives_reordering() {
        let mut table = ContractTable::default();
        table.push("A", 1, "r0", DateValue::Missing, DateValue::Missing, vec![]);
        table.push("B", 2, "r1", DateValue::Missing, DateValue::Missing, vec![]);
        table.records.reverse();
        assert_eq!(table.row_ids(), vec![RowId::new(1), RowId::new(0)]);
        assert_eq!(table.get(RowId::new(0)).map(|r| r.supplier.as_str()), Some("A"));
        assert_eq!(table.get(RowId::new(1)).map(|r| r.reference_no.as_str()), Some("r1"));
    }

    #[test]
    fn reversed_requires_both_dates() {
        let mut table = ContractTable::default();
        table.push("C", 1, "r", date(2021, 3, 21), date(2021, 3, 20), vec![]);
        table.push("C", 1, "r", DateValue::Missing, date(2021, 3, 20), vec![]);
        assert!(table.records[0].is_reversed());
        assert!(!table.records[1].is_reversed());
        assert!(table.records[0].has_interval());
        assert!(!table.records[1].has_interval());
    }
}
