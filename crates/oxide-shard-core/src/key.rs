//! Shard key resolution.
//!
//! The shard key is the column (or ordered set of columns) whose value
//! decides which partition a row lands in. Resolution produces the SQL
//! expression used by the generated CHECK constraints.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShardError};
use crate::schema::TableSchema;

/// Shard key attached to a table: one column or an ordered composite.
///
/// Serialized form is a bare string for the single-column case and a list of
/// strings for the composite case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShardKeySpec {
    /// A single shard key column.
    Column(String),
    /// An ordered, non-empty list of shard key columns.
    Composite(Vec<String>),
}

/// Strategy for collapsing a composite shard key into one SQL expression.
///
/// Whatever strategy is chosen here must match the key derivation the
/// application layer applies when routing reads and writes to shards; if the
/// two computations diverge, rows are checked against the wrong partition.
/// Callers using composite keys are responsible for keeping them in sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCombination {
    /// Sum the column values.
    ///
    /// This is a deliberate simplification, not a general-purpose hashing
    /// scheme: distinct column tuples can collapse to the same sum.
    #[default]
    Sum,
}

impl KeyCombination {
    /// Builds the combined SQL expression over the given columns.
    #[must_use]
    pub fn combine(self, columns: &[String]) -> String {
        match self {
            Self::Sum => {
                let quoted: Vec<String> = columns.iter().map(|c| format!("\"{c}\"")).collect();
                format!("({})", quoted.join(" + "))
            }
        }
    }
}

/// A shard key resolved into its SQL and naming forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShardKey {
    /// Name fragment used in constraint identifiers (columns joined by `_`).
    pub display_name: String,
    /// SQL expression evaluated by the CHECK constraint.
    pub constraint_expr: String,
}

impl ShardKeySpec {
    /// Returns the key columns in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        match self {
            Self::Column(column) => std::slice::from_ref(column),
            Self::Composite(columns) => columns,
        }
    }

    /// Checks that every key column exists on the given table.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError::EmptyShardKey`] for an empty specification and
    /// [`ShardError::UnknownKeyColumn`] for a column the table lacks.
    pub fn validate_against(&self, schema: &TableSchema) -> Result<()> {
        let columns = self.columns();
        if columns.is_empty() || columns.iter().any(String::is_empty) {
            return Err(ShardError::EmptyShardKey);
        }
        for column in columns {
            if schema.get_column(column).is_none() {
                return Err(ShardError::UnknownKeyColumn {
                    table: schema.name.clone(),
                    column: column.clone(),
                });
            }
        }
        Ok(())
    }

    /// Resolves the key into its constraint expression and display name.
    ///
    /// # Errors
    ///
    /// Returns [`ShardError::EmptyShardKey`] if the specification names no
    /// columns.
    pub fn resolve(&self, combination: KeyCombination) -> Result<ResolvedShardKey> {
        match self {
            Self::Column(column) if column.is_empty() => Err(ShardError::EmptyShardKey),
            Self::Column(column) => Ok(ResolvedShardKey {
                display_name: column.clone(),
                constraint_expr: format!("\"{column}\""),
            }),
            Self::Composite(columns) if columns.is_empty() => Err(ShardError::EmptyShardKey),
            Self::Composite(columns) => Ok(ResolvedShardKey {
                display_name: columns.join("_"),
                constraint_expr: combination.combine(columns),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSchema, SqlType};

    #[test]
    fn single_column_key() {
        let key = ShardKeySpec::Column("forum_id".to_string());
        let resolved = key.resolve(KeyCombination::Sum).expect("valid key");
        assert_eq!(resolved.display_name, "forum_id");
        assert_eq!(resolved.constraint_expr, "\"forum_id\"");
    }

    #[test]
    fn composite_key_sums_columns() {
        let key = ShardKeySpec::Composite(vec!["a".to_string(), "b".to_string()]);
        let resolved = key.resolve(KeyCombination::Sum).expect("valid key");
        assert_eq!(resolved.display_name, "a_b");
        assert_eq!(resolved.constraint_expr, "(\"a\" + \"b\")");
    }

    #[test]
    fn empty_key_is_rejected() {
        let key = ShardKeySpec::Composite(Vec::new());
        assert!(matches!(
            key.resolve(KeyCombination::Sum),
            Err(ShardError::EmptyShardKey)
        ));

        let key = ShardKeySpec::Column(String::new());
        assert!(matches!(
            key.resolve(KeyCombination::Sum),
            Err(ShardError::EmptyShardKey)
        ));
    }

    #[test]
    fn validate_against_requires_existing_columns() {
        let schema = TableSchema::new("forum_post")
            .column(ColumnSchema::new("forum_id", SqlType::BigInt).not_null());

        let key = ShardKeySpec::Column("forum_id".to_string());
        key.validate_against(&schema).expect("column exists");

        let key = ShardKeySpec::Composite(vec!["forum_id".to_string(), "author_id".to_string()]);
        match key.validate_against(&schema) {
            Err(ShardError::UnknownKeyColumn { table, column }) => {
                assert_eq!(table, "forum_post");
                assert_eq!(column, "author_id");
            }
            other => panic!("expected UnknownKeyColumn, got {other:?}"),
        }
    }

    #[test]
    fn serde_accepts_string_or_list() {
        let single: ShardKeySpec = serde_json::from_str("\"forum_id\"").expect("string form");
        assert_eq!(single, ShardKeySpec::Column("forum_id".to_string()));

        let composite: ShardKeySpec = serde_json::from_str("[\"a\", \"b\"]").expect("list form");
        assert_eq!(
            composite,
            ShardKeySpec::Composite(vec!["a".to_string(), "b".to_string()])
        );
    }
}
