//! Horizontal partitioning DDL generation.
//!
//! `oxide-shard-core` computes partition plans for sharded tables and emits
//! the PostgreSQL DDL that realizes them: per-partition child tables
//! mirroring the parent schema, per-partition indexes, modulo CHECK
//! constraints tying each row's shard key to its partition, per-partition
//! sequences, and a server-side `next_sharded_id` function that packs
//! time, shard and sequence into 64-bit time-sortable primary keys.
//!
//! The crate is a pure function over its inputs: no I/O, no connections, no
//! shared state. Callers describe the logical table through a
//! [`catalog::SchemaCatalog`] and receive ordered SQL text; executing it is
//! their business.
//!
//! Partitioning limitations to be aware of:
//! - Indexes, `ALTER TABLE ... RENAME`, and INSERT do not behave as expected
//!   on a parent table; each child carries its own indexes and constraints,
//!   which the generated DDL covers.
//! - UPDATE does not move rows between partitions. Applications must handle
//!   cross-partition moves themselves.
//!
//! # Example
//!
//! ```rust
//! use oxide_shard_core::prelude::*;
//!
//! let table = ShardedTable {
//!     schema: TableSchema::new("forum_post")
//!         .column(
//!             ColumnSchema::new("id", SqlType::BigInt)
//!                 .primary_key()
//!                 .auto_increment(),
//!         )
//!         .column(ColumnSchema::new("forum_id", SqlType::BigInt).not_null()),
//!     shard_key: ShardKeySpec::Column("forum_id".to_string()),
//! };
//!
//! // Physical shard 0 of 2, with 8 logical partitions in total.
//! let plan = PartitionPlan::strided(8, 0, 2)?;
//! let sql = PartitionDdlGenerator::new().sql(&table, &plan)?;
//! assert!(sql.contains("CREATE TABLE \"forum_post_0\""));
//! # Ok::<(), oxide_shard_core::error::ShardError>(())
//! ```

pub mod catalog;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod idgen;
pub mod key;
pub mod plan;
pub mod schema;
pub mod sequence;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{SchemaCatalog, ShardedTable};
    pub use crate::dialect::PostgresDialect;
    pub use crate::error::{Result, ShardError};
    pub use crate::generator::PartitionDdlGenerator;
    pub use crate::idgen::{
        IdGeneratorSpec, DEFAULT_EPOCH_MILLIS, ID_FUNCTION_NAME, MAX_SHARD_COUNT, SEQUENCE_BITS,
        SEQUENCE_MODULUS, SHARD_BITS, TIMESTAMP_SHIFT,
    };
    pub use crate::key::{KeyCombination, ResolvedShardKey, ShardKeySpec};
    pub use crate::plan::PartitionPlan;
    pub use crate::schema::{ColumnSchema, DefaultValue, IndexSchema, SqlType, TableSchema};
    pub use crate::sequence::{create_sequence_statements, sharded_id_sequence_name};
}
