//! Store of decoded integer field values.

use alloc::{collections::BTreeMap, string::String};

/// Values of previously decoded integer fields, keyed by field path.
///
/// Entries are only ever added or overwritten during a decode, so a field may
/// reference any integer decoded before it, including fields of sibling or
/// ancestor records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldTable(BTreeMap<String, u64>);

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value most recently recorded at a path.
    pub fn get(&self, path: &str) -> Option<u64> {
        self.0.get(path).copied()
    }

    /// Record a value, replacing any earlier value at the same path.
    pub fn insert(&mut self, path: impl Into<String>, value: u64) {
        self.0.insert(path.into(), value);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over recorded paths and values, ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
