//! Overlap detection over key-grouped intervals.
//!
//! Each group runs a two-state machine. Before its first record a group has
//! no prior interval; the first record is kept and its end date becomes the
//! reference. A later record whose start is on or before the reference is
//! flagged and leaves the reference untouched; any other record is kept and
//! replaces it.
//!
//! Records without two parsed endpoints have no interval to compare. They
//! are kept and never enter the state machine.

use std::collections::{BTreeMap, BTreeSet};

use contract_model::{ContractRecord, ContractTable, DateValue, GroupKey, RowId};
use tracing::debug;

/// A row found to overlap the last kept interval of its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapFlag {
    /// The overlapping row.
    pub row: RowId,
    /// The kept row whose interval it overlaps.
    pub anchor: RowId,
    pub group: GroupKey,
}

/// Flagged rows in scan order, possibly spanning several groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapScan {
    pub flagged: Vec<OverlapFlag>,
}

impl OverlapScan {
    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = RowId> + '_ {
        self.flagged.iter().map(|flag| flag.row)
    }

    /// Distinct groups that contain at least one flagged row.
    pub fn groups(&self) -> BTreeSet<&GroupKey> {
        self.flagged.iter().map(|flag| &flag.group).collect()
    }
}

/// Per-group scan state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GroupState {
    NoPriorInterval,
    HasPriorInterval { anchor: RowId, end: DateValue },
}

enum Step {
    Keep,
    Flag { anchor: RowId },
}

impl GroupState {
    fn advance(&mut self, record: &ContractRecord) -> Step {
        if let GroupState::HasPriorInterval { anchor, end } = self
            && record.start_date.on_or_before(end)
        {
            return Step::Flag { anchor: *anchor };
        }
        *self = GroupState::HasPriorInterval {
            anchor: record.row,
            end: record.end_date.clone(),
        };
        Step::Keep
    }
}

/// Scan records in the given order and flag overlapping rows.
///
/// State is tracked per group key, so records of different groups may be
/// interleaved; within a group the records are expected in start-date order
/// (see [`sort_by_group`]).
pub fn scan_overlaps(records: &[ContractRecord]) -> OverlapScan {
    let mut groups: BTreeMap<GroupKey, GroupState> = BTreeMap::new();
    let mut flagged = Vec::new();
    for record in records {
        if !record.has_interval() {
            debug!(row = %record.row, "passing through record without a complete interval");
            continue;
        }
        let key = record.group_key();
        let state = groups
            .entry(key.clone())
            .or_insert(GroupState::NoPriorInterval);
        if let Step::Flag { anchor } = state.advance(record) {
            debug!(row = %record.row, anchor = %anchor, "overlapping interval");
            flagged.push(OverlapFlag {
                row: record.row,
                anchor,
                group: key,
            });
        }
    }
    OverlapScan { flagged }
}

/// Stable sort of the table by `(group_key, start_date)`.
///
/// Group keys are computed once per record. Rows without a parsed start date
/// sort after the dated rows of their group.
pub fn sort_by_group(table: &mut ContractTable) {
    let mut keyed: Vec<(GroupKey, ContractRecord)> = table
        .records
        .drain(..)
        .map(|record| (record.group_key(), record))
        .collect();
    keyed.sort_by(|(left_key, left), (right_key, right)| {
        left_key
            .cmp(right_key)
            .then_with(|| left.start_date.sort_cmp(&right.start_date))
    });
    table.records = keyed.into_iter().map(|(_, record)| record).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> DateValue {
        DateValue::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn state_machine_keeps_first_record() {
        let mut table = ContractTable::default();
        table.push("C", 1, "a", ymd(2020, 1, 1), ymd(2020, 12, 31), vec![]);
        let mut state = GroupState::NoPriorInterval;

        assert!(matches!(state.advance(&table.records[0]), Step::Keep));
        assert_eq!(
            state,
            GroupState::HasPriorInterval {
                anchor: RowId::new(0),
                end: ymd(2020, 12, 31)
            }
        );
    }

    #[test]
    fn flagged_record_does_not_move_reference() {
        let mut table = ContractTable::default();
        table.push("C", 1, "a", ymd(2020, 1, 1), ymd(2020, 6, 30), vec![]);
        table.push("C", 1, "b", ymd(2020, 6, 30), ymd(2021, 6, 30), vec![]);
        table.push("C", 1, "c", ymd(2020, 7, 1), ymd(2020, 8, 1), vec![]);

        let scan = scan_overlaps(&table.records);

        // "b" starts on the kept end date; "c" is compared against "a", not "b".
        assert_eq!(scan.rows().collect::<Vec<_>>(), vec![RowId::new(1)]);
        assert_eq!(scan.flagged[0].anchor, RowId::new(0));
    }

    #[test]
    fn sort_is_stable_for_equal_starts() {
        let mut table = ContractTable::default();
        table.push("C", 2, "x", ymd(2020, 1, 1), ymd(2020, 2, 1), vec![]);
        table.push("C", 1, "y", ymd(2020, 1, 1), ymd(2020, 3, 1), vec![]);
        table.push("C", 1, "z", ymd(2020, 1, 1), ymd(2020, 4, 1), vec![]);
        table.push("C", 1, "w", DateValue::Missing, ymd(2020, 4, 1), vec![]);
        table.push("C", 1, "v", ymd(2019, 1, 1), ymd(2019, 4, 1), vec![]);

        sort_by_group(&mut table);

        let refs: Vec<&str> = table
            .records
            .iter()
            .map(|r| r.reference_no.as_str())
            .collect();
        assert_eq!(refs, vec!["v", "y", "z", "w", "x"]);
    }
}
