//! Configuration options for contract cleaning.

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, Result};

/// How overlapping rows are resolved once flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Remove every flagged row; kept rows are not modified.
    #[default]
    DropExtras,
    /// Write the largest end date of the whole flagged set to the kept row
    /// preceding the first flagged row, then remove the flagged rows.
    ///
    /// Only correct when every overlap belongs to a single group.
    ExtendAndDrop,
    /// Extend each kept row with the largest end date of the rows that
    /// overlapped it, then remove the flagged rows.
    ExtendPerGroup,
}

/// Input column names for the fields the cleaner understands.
///
/// Every other column is carried through as payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub supplier: String,
    pub product_id: String,
    pub reference_no: String,
    pub start_date: String,
    pub end_date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            supplier: "Supplier".to_string(),
            product_id: "Supplier_Product".to_string(),
            reference_no: "Ref_No".to_string(),
            start_date: "start_date".to_string(),
            end_date: "end_date".to_string(),
        }
    }
}

impl ColumnNames {
    /// Role/name pairs in output column order.
    pub fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("supplier", self.supplier.as_str()),
            ("product_id", self.product_id.as_str()),
            ("reference_no", self.reference_no.as_str()),
            ("start_date", self.start_date.as_str()),
            ("end_date", self.end_date.as_str()),
        ]
    }

    /// Returns true if `column` names one of the known fields.
    pub fn is_known(&self, column: &str) -> bool {
        self.roles().iter().any(|(_, name)| *name == column)
    }

    /// Rejects empty names and a column assigned to two roles.
    pub fn validate(&self) -> Result<()> {
        let roles = self.roles();
        for (idx, &(role, name)) in roles.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ContractError::EmptyColumnName { role });
            }
            if let Some(&(first, _)) = roles[..idx].iter().find(|&&(_, other)| other == name) {
                return Err(ContractError::DuplicateColumn {
                    column: name.to_string(),
                    first,
                    second: role,
                });
            }
        }
        Ok(())
    }
}

/// Options controlling a cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Policy applied to overlapping rows.
    pub policy: ResolutionPolicy,
    /// Run the overlap resolver after interval normalization.
    pub resolve_overlaps: bool,
    /// Input column names.
    pub columns: ColumnNames,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            policy: ResolutionPolicy::default(),
            resolve_overlaps: true,
            columns: ColumnNames::default(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_resolve_overlaps(mut self, enable: bool) -> Self {
        self.resolve_overlaps = enable;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.columns = columns;
        self
    }
}
