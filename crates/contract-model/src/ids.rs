#![deny(unsafe_code)]

use std::fmt;

/// Position of a record in the table as it was loaded.
///
/// Row ids are labels, not offsets: they survive sorting and row removal
/// unchanged and are only ever compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(usize);

impl RowId {
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Separator placed between supplier and product id in a [`GroupKey`].
pub const GROUP_KEY_SEPARATOR: char = '-';

/// Composite supplier/product key that defines which intervals are compared.
///
/// Ordering is lexicographic on the composed text, so `C-10` sorts before
/// `C-9`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(supplier: &str, product_id: i64) -> Self {
        Self(format!("{supplier}{GROUP_KEY_SEPARATOR}{product_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
