//! Partition DDL generation tool.
//!
//! `oxide-shard` wraps [`oxide_shard_core`] for command-line use: it loads a
//! schema catalog from a JSON file, looks up the requested table, computes
//! the partition plan for one physical shard, and prints the resulting SQL.
//!
//! The catalog file maps qualified table names to their schema and shard
//! key:
//!
//! ```json
//! {
//!     "forums.post": {
//!         "schema": {
//!             "name": "forum_post",
//!             "columns": [
//!                 {"name": "id", "sql_type": "BigInt",
//!                  "primary_key": true, "auto_increment": true},
//!                 {"name": "forum_id", "sql_type": "BigInt", "nullable": false}
//!             ],
//!             "indexes": [
//!                 {"name": "forum_post_forum_id", "columns": ["forum_id"]}
//!             ]
//!         },
//!         "shard_key": "forum_id"
//!     }
//! }
//! ```
//!
//! The shard key may be a single column name or a list of column names for a
//! composite key.

use std::fs;
use std::path::{Path, PathBuf};

use oxide_shard_core::catalog::SchemaCatalog;

/// Errors raised while loading a schema catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogFileError {
    /// The file could not be read.
    #[error("failed to read catalog file '{path}'")]
    Io {
        /// Path to the catalog file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid catalog document.
    #[error("failed to parse catalog file '{path}': {source}")]
    Parse {
        /// Path to the catalog file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Loads a schema catalog from a JSON file.
///
/// # Errors
///
/// Returns [`CatalogFileError`] if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<SchemaCatalog, CatalogFileError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use oxide_shard_core::prelude::*;

    const CATALOG_JSON: &str = r#"{
        "forums.post": {
            "schema": {
                "name": "forum_post",
                "columns": [
                    {"name": "id", "sql_type": "BigInt",
                     "primary_key": true, "auto_increment": true},
                    {"name": "forum_id", "sql_type": "BigInt", "nullable": false}
                ],
                "indexes": [
                    {"name": "forum_post_forum_id", "columns": ["forum_id"]}
                ]
            },
            "shard_key": "forum_id"
        }
    }"#;

    #[test]
    fn loads_catalog_and_generates_ddl() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(CATALOG_JSON.as_bytes()).expect("write");

        let catalog = load_catalog(file.path()).expect("valid catalog");
        let table = catalog.lookup("forums.post").expect("registered table");
        assert_eq!(table.schema.name, "forum_post");
        assert_eq!(table.shard_key, ShardKeySpec::Column("forum_id".to_string()));

        let plan = PartitionPlan::strided(4, 0, 1).expect("valid plan");
        let sql = PartitionDdlGenerator::new()
            .sql(table, &plan)
            .expect("valid inputs");
        assert!(sql.contains("CREATE TABLE \"forum_post_0\""));
        assert!(sql.contains("next_sharded_id('forum_post_3_id_seq', 3)"));
    }

    #[test]
    fn composite_shard_key_parses_from_list() {
        let json = r#"{
            "metrics.sample": {
                "schema": {
                    "name": "metric_sample",
                    "columns": [
                        {"name": "id", "sql_type": "BigInt", "primary_key": true},
                        {"name": "a", "sql_type": "BigInt", "nullable": false},
                        {"name": "b", "sql_type": "BigInt", "nullable": false}
                    ]
                },
                "shard_key": ["a", "b"]
            }
        }"#;
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(json.as_bytes()).expect("write");

        let catalog = load_catalog(file.path()).expect("valid catalog");
        let table = catalog.lookup("metrics.sample").expect("registered table");
        assert_eq!(
            table.shard_key,
            ShardKeySpec::Composite(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_catalog(Path::new("/nonexistent/catalog.json"))
            .expect_err("missing file");
        assert!(matches!(err, CatalogFileError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ not json").expect("write");

        let err = load_catalog(file.path()).expect_err("bad JSON");
        assert!(matches!(err, CatalogFileError::Parse { .. }));
    }
}
