//! Schema catalog.
//!
//! An explicit registry of partitioned table schemas keyed by qualified name
//! (`<app>.<table>`). The caller populates it from whatever source of truth
//! it has (model definitions, a serialized schema file); the generator only
//! ever reads from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShardError};
use crate::key::ShardKeySpec;
use crate::schema::TableSchema;

/// A table registered for horizontal partitioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardedTable {
    /// The logical parent schema children are derived from.
    pub schema: TableSchema,
    /// The column(s) that decide a row's partition.
    pub shard_key: ShardKeySpec,
}

/// Registry of sharded table schemas, keyed by qualified name.
///
/// Backed by an ordered map so iteration order is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaCatalog {
    tables: BTreeMap<String, ShardedTable>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table under a qualified name (builder style).
    #[must_use]
    pub fn table(mut self, qualified_name: impl Into<String>, table: ShardedTable) -> Self {
        self.tables.insert(qualified_name.into(), table);
        self
    }

    /// Registers a table under a qualified name.
    pub fn insert(&mut self, qualified_name: impl Into<String>, table: ShardedTable) {
        self.tables.insert(qualified_name.into(), table);
    }

    /// Looks up a table schema by qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError::UnknownTable`] if the name is not registered.
    pub fn lookup(&self, qualified_name: &str) -> Result<&ShardedTable> {
        self.tables
            .get(qualified_name)
            .ok_or_else(|| ShardError::UnknownTable(qualified_name.to_string()))
    }

    /// Returns the registered qualified names, in order.
    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no tables are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
