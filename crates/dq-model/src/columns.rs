//! Column groups and their canonical keys.

use std::collections::BTreeSet;

/// Token joining column names inside a column-group key.
pub const GROUP_KEY_SEPARATOR: &str = ",";

/// An ordered list of column names a rule is bound to.
///
/// Order is significant and preserved as given by the user; equality as an
/// unordered set is a separate, explicit operation so the store's key
/// canonicalization and the codec's duplicate check share one definition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnGroup(Vec<String>);

impl ColumnGroup {
    pub fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    pub fn single(column: impl Into<String>) -> Self {
        Self(vec![column.into()])
    }

    /// Rebuild a group from a persisted group key.
    pub fn from_key(key: &str) -> Self {
        Self(key.split(GROUP_KEY_SEPARATOR).map(str::to_string).collect())
    }

    /// Separator-joined key used in rule-set documents.
    pub fn key(&self) -> String {
        self.0.join(GROUP_KEY_SEPARATOR)
    }

    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Order-insensitive view of the group.
    pub fn as_set(&self) -> BTreeSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    /// True when both groups name the same columns, regardless of order.
    pub fn set_eq(&self, other: &ColumnGroup) -> bool {
        self.as_set() == other.as_set()
    }
}

impl std::fmt::Display for ColumnGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<Vec<String>> for ColumnGroup {
    fn from(columns: Vec<String>) -> Self {
        Self::new(columns)
    }
}
