//! Polars value conversion helpers.

use polars::prelude::{AnyValue, Column};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        other => other.to_string(),
    }
}

/// Cell text at `idx`, or `None` for null and blank cells.
pub fn cell_text(column: &Column, idx: usize) -> Option<String> {
    let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parses an integer-like cell, ignoring surrounding whitespace.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}
