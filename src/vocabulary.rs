//! Insertion-ordered name registries shared by the resolver and the record builder.
//!
//! Two vocabularies are accumulated during an import:
//!
//! - [`ModificationVocabulary`]: every distinct modification name seen in the
//!   `modification` column, in first-seen order. It only ever grows.
//! - [`ExtraColumnRegistry`]: every header token that is not one of the fixed
//!   column roles, each bound to a stable storage position in the match table.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Number of fixed columns at the front of the match table.
pub const FIXED_COLUMN_COUNT: usize = 8;

/// Storage position (1-based) of the first extra column.
pub const FIRST_EXTRA_POSITION: usize = FIXED_COLUMN_COUNT + 1;

/// Distinct modification names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationVocabulary {
    names: IndexSet<String>,
}

impl ModificationVocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modification name, returning `true` if it was not known yet.
    pub fn register(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Whether the name has been seen
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no modification has been seen
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate names in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Copy the names out in first-seen order
    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

/// Extra (non fixed-role) column names bound to storage positions.
///
/// Fixed-role columns occupy positions `1..=8` of the match table, so the
/// first registered extra lands on [`FIRST_EXTRA_POSITION`]. Positions never
/// change once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraColumnRegistry {
    names: IndexSet<String>,
}

impl ExtraColumnRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a column name and return its storage position.
    ///
    /// Registering a name twice returns the position of the first registration.
    pub fn register(&mut self, name: &str) -> usize {
        let (index, _) = self.names.insert_full(name.to_string());
        index + FIRST_EXTRA_POSITION
    }

    /// Storage position of a registered name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names
            .get_index_of(name)
            .map(|index| index + FIRST_EXTRA_POSITION)
    }

    /// Number of extra columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the header had no extra columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(position, name)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| (index + FIRST_EXTRA_POSITION, name.as_str()))
    }

    /// Iterate names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
