//! Resolution policies for flagged overlaps.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use contract_model::{ContractTable, DateValue, ResolutionPolicy, RowId};
use tracing::{debug, info, info_span, warn};

use super::scan::{OverlapScan, scan_overlaps, sort_by_group};
use crate::normalization::coerce_dates;

/// An end date written to a kept row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub row: RowId,
    pub previous_end: DateValue,
    pub new_end: NaiveDate,
}

/// Changes applied by a resolution policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Removed rows, in scan order.
    pub dropped: Vec<RowId>,
    pub extended: Vec<Extension>,
}

impl Resolution {
    fn absorb(&mut self, other: Resolution) {
        self.dropped.extend(other.dropped);
        self.extended.extend(other.extended);
    }
}

/// Outcome of [`resolve_overlaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapReport {
    pub policy: ResolutionPolicy,
    /// Date cells that failed to parse when the resolver coerced them.
    pub invalid_dates: usize,
    /// Flagged rows of every pass, in scan order.
    pub scan: OverlapScan,
    pub resolution: Resolution,
    /// Scan/resolve passes that found overlaps.
    pub passes: usize,
}

fn drop_flagged(table: &mut ContractTable, scan: &OverlapScan) -> Vec<RowId> {
    let flagged: HashSet<RowId> = scan.rows().collect();
    table.records.retain(|record| !flagged.contains(&record.row));
    scan.rows().collect()
}

/// Writes `max(current end, candidates)` to `row`, if that changes it.
fn extend_end_date(
    table: &mut ContractTable,
    row: RowId,
    candidates: impl IntoIterator<Item = NaiveDate>,
) -> Option<Extension> {
    let record = table.get_mut(row)?;
    let new_end = candidates
        .into_iter()
        .chain(record.end_date.date())
        .max()?;
    if record.end_date.date() == Some(new_end) {
        return None;
    }
    let previous_end = std::mem::replace(&mut record.end_date, DateValue::Valid(new_end));
    debug!(row = %row, from = %previous_end, to = %new_end, "extending end date");
    Some(Extension {
        row,
        previous_end,
        new_end,
    })
}

fn flagged_end_dates<'a>(
    table: &'a ContractTable,
    rows: impl IntoIterator<Item = RowId> + 'a,
) -> impl Iterator<Item = NaiveDate> + 'a {
    rows.into_iter()
        .filter_map(|row| table.get(row))
        .filter_map(|record| record.end_date.date())
}

/// Remove every flagged row; kept rows are left as they are.
pub fn drop_extras(table: &mut ContractTable, scan: &OverlapScan) -> Resolution {
    Resolution {
        dropped: drop_flagged(table, scan),
        extended: Vec::new(),
    }
}

/// Extend the kept row preceding the first flagged row with the largest end
/// date of the whole flagged set, then remove the flagged rows.
///
/// The target is the anchor of the first flagged row: the last kept row of
/// its group in sort order. A single maximum is computed across all flagged
/// rows, so the result is only meaningful when every overlap belongs to one
/// group; with several groups the rows of later groups extend the first
/// group's row. Use [`extend_per_group`] for per-group maxima.
pub fn extend_and_drop(table: &mut ContractTable, scan: &OverlapScan) -> Resolution {
    let Some(first) = scan.flagged.first() else {
        return Resolution::default();
    };
    let groups = scan.groups();
    if groups.len() > 1 {
        warn!(
            groups = groups.len(),
            "flagged rows span several groups; extend-and-drop applies a single maximum end date"
        );
    }
    let candidates: Vec<NaiveDate> = flagged_end_dates(table, scan.rows()).collect();
    let extended = extend_end_date(table, first.anchor, candidates)
        .into_iter()
        .collect();
    Resolution {
        dropped: drop_flagged(table, scan),
        extended,
    }
}

/// Extend each anchor row with the largest end date among the rows flagged
/// against it, then remove the flagged rows.
pub fn extend_per_group(table: &mut ContractTable, scan: &OverlapScan) -> Resolution {
    let mut anchors: Vec<RowId> = Vec::new();
    let mut by_anchor: BTreeMap<RowId, Vec<RowId>> = BTreeMap::new();
    for flag in &scan.flagged {
        let rows = by_anchor.entry(flag.anchor).or_default();
        if rows.is_empty() {
            anchors.push(flag.anchor);
        }
        rows.push(flag.row);
    }

    let mut extended = Vec::new();
    for anchor in anchors {
        let rows = by_anchor.remove(&anchor).unwrap_or_default();
        let candidates: Vec<NaiveDate> = flagged_end_dates(table, rows).collect();
        extended.extend(extend_end_date(table, anchor, candidates));
    }
    Resolution {
        dropped: drop_flagged(table, scan),
        extended,
    }
}

fn apply_policy(
    table: &mut ContractTable,
    scan: &OverlapScan,
    policy: ResolutionPolicy,
) -> Resolution {
    match policy {
        ResolutionPolicy::DropExtras => drop_extras(table, scan),
        ResolutionPolicy::ExtendAndDrop => extend_and_drop(table, scan),
        ResolutionPolicy::ExtendPerGroup => extend_per_group(table, scan),
    }
}

/// Only [`ResolutionPolicy::ExtendPerGroup`] resolves again after extending.
fn rescans_after_extension(policy: ResolutionPolicy) -> bool {
    matches!(policy, ResolutionPolicy::ExtendPerGroup)
}

/// Sort the table by group and start date, flag overlaps, and apply `policy`.
///
/// Any date still held as text is parsed first, so the resolver can run
/// without a prior normalization pass.
///
/// `DropExtras` and `ExtendAndDrop` scan the sorted table once and drop
/// exactly the rows that scan flagged; an extension written by
/// `ExtendAndDrop` may therefore reach past a later kept row. With
/// `ExtendPerGroup` a pass that extended a row is followed by another scan of
/// the sorted table, until a pass extends nothing or finds no flags, so its
/// output never overlaps within a group.
pub fn resolve_overlaps(table: &mut ContractTable, policy: ResolutionPolicy) -> OverlapReport {
    let span = info_span!("resolve_overlaps", ?policy, rows = table.len());
    let _guard = span.enter();

    let invalid_dates = coerce_dates(table);
    sort_by_group(table);

    let mut flagged = Vec::new();
    let mut resolution = Resolution::default();
    let mut passes = 0;
    loop {
        let scan = scan_overlaps(&table.records);
        if scan.is_empty() {
            break;
        }
        passes += 1;
        let pass = apply_policy(table, &scan, policy);
        let extended = !pass.extended.is_empty();
        debug!(
            pass = passes,
            flagged = scan.len(),
            extended = pass.extended.len(),
            "resolution pass"
        );
        resolution.absorb(pass);
        flagged.extend(scan.flagged);
        if !(extended && rescans_after_extension(policy)) {
            break;
        }
    }
    let scan = OverlapScan { flagged };

    info!(
        flagged = scan.len(),
        groups = scan.groups().len(),
        dropped = resolution.dropped.len(),
        extended = resolution.extended.len(),
        passes,
        remaining = table.len(),
        "overlap resolution complete"
    );
    OverlapReport {
        policy,
        invalid_dates,
        scan,
        resolution,
        passes,
    }
}
