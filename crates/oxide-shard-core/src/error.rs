//! Error types for partition DDL generation.

/// Errors that can occur while planning partitions or emitting DDL.
///
/// Generation is all-or-nothing: every variant is raised before any SQL is
/// produced, so a caller never observes partial output.
#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    /// The shard key specification contains no columns.
    #[error("shard key specification is empty")]
    EmptyShardKey,

    /// The shard key references a column the table does not define.
    #[error("shard key column '{column}' does not exist on table '{table}'")]
    UnknownKeyColumn {
        /// Table the key was resolved against.
        table: String,
        /// The missing column.
        column: String,
    },

    /// The logical partition count must be positive.
    #[error("partition count must be positive")]
    InvalidPartitionCount,

    /// The physical shard count must be positive.
    #[error("physical shard count must be positive")]
    InvalidShardCount,

    /// The physical shard index is outside the physical shard count.
    #[error("physical shard {shard} is outside the shard count {shards}")]
    ShardOutOfRange {
        /// Requested 0-based physical shard.
        shard: u32,
        /// Total number of physical shards.
        shards: u32,
    },

    /// A partition index falls outside the logical partition range.
    #[error("partition index {index} is outside the partition range 0..{count}")]
    PartitionIndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Total logical partition count.
        count: u32,
    },

    /// A partition index does not fit the ID generator's shard bit allocation.
    #[error("partition index {index} exceeds the {max} shards representable by the ID generator")]
    ShardRangeOverflow {
        /// The offending index.
        index: u32,
        /// Exclusive upper bound imposed by the bit layout.
        max: i64,
    },

    /// The qualified name is not registered in the schema catalog.
    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// The table does not have exactly one primary key column.
    ///
    /// The generated ID default is bound to a single column, so composite or
    /// missing primary keys cannot be partitioned.
    #[error("table '{table}' must have exactly one primary key column, found {count}")]
    PrimaryKeyShape {
        /// The offending table.
        table: String,
        /// Number of primary key columns found.
        count: usize,
    },
}

/// Result type for partition generation operations.
pub type Result<T> = std::result::Result<T, ShardError>;
