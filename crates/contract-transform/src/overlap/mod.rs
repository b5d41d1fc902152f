//! Overlap detection and resolution for intervals sharing a group key.

pub mod resolve;
pub mod scan;

pub use resolve::{
    Extension, OverlapReport, Resolution, drop_extras, extend_and_drop, extend_per_group,
    resolve_overlaps,
};
pub use scan::{OverlapFlag, OverlapScan, scan_overlaps, sort_by_group};
