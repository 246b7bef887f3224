//! Sharded ID generator codegen.
//!
//! Emits the server-side PL/pgSQL function that assigns primary keys on the
//! partitioned children. Each ID packs three components into a signed 64-bit
//! integer:
//!
//! ```text
//! | timestamp (millis since epoch)  | shard id (13 bits) | sequence (10 bits) |
//! ```
//!
//! The high timestamp bits make IDs time-sortable; the shard bits make them
//! unique across shards without coordination. IDs can collide only if more
//! than 1024 are requested within the same millisecond on one shard, which
//! the sequence wraparound does not guard against.

use serde::{Deserialize, Serialize};

/// Number of low bits reserved for the per-partition sequence counter.
pub const SEQUENCE_BITS: u32 = 10;

/// Number of bits reserved for the shard identifier.
pub const SHARD_BITS: u32 = 13;

/// Left shift applied to the timestamp component.
pub const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + SHARD_BITS;

/// Sequence values wrap at this modulus.
pub const SEQUENCE_MODULUS: i64 = 1 << SEQUENCE_BITS;

/// Exclusive upper bound on shard identifiers the bit layout can encode.
pub const MAX_SHARD_COUNT: i64 = 1 << SHARD_BITS;

/// 2012-11-01T00:00:00Z in milliseconds since the Unix epoch.
///
/// The epoch must never change once any ID has been generated: moving it
/// reorders the timestamp component relative to already-issued IDs and risks
/// collisions with them.
pub const DEFAULT_EPOCH_MILLIS: i64 = 1_351_728_000_000;

/// Name of the emitted generator function.
pub const ID_FUNCTION_NAME: &str = "next_sharded_id";

/// Parameters of the server-side ID generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGeneratorSpec {
    epoch_millis: i64,
}

impl Default for IdGeneratorSpec {
    fn default() -> Self {
        Self {
            epoch_millis: DEFAULT_EPOCH_MILLIS,
        }
    }
}

impl IdGeneratorSpec {
    /// Creates a generator spec with a custom epoch.
    #[must_use]
    pub const fn new(epoch_millis: i64) -> Self {
        Self { epoch_millis }
    }

    /// The epoch subtracted from wall-clock time, in milliseconds.
    #[must_use]
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Packs the three components the way the emitted SQL does.
    ///
    /// Mirrors the PL/pgSQL arithmetic exactly so the composition can be
    /// checked without a database or a clock.
    #[must_use]
    pub const fn compose(&self, now_millis: i64, shard_id: i64, seq_id: i64) -> i64 {
        ((now_millis - self.epoch_millis) << TIMESTAMP_SHIFT)
            | (shard_id << SEQUENCE_BITS)
            | (seq_id % SEQUENCE_MODULUS)
    }

    /// Extracts the wall-clock milliseconds an ID was generated at.
    #[must_use]
    pub const fn timestamp_millis(&self, id: i64) -> i64 {
        (id >> TIMESTAMP_SHIFT) + self.epoch_millis
    }

    /// Extracts the shard identifier from an ID.
    #[must_use]
    pub const fn shard_id(id: i64) -> i64 {
        (id >> SEQUENCE_BITS) & (MAX_SHARD_COUNT - 1)
    }

    /// Extracts the sequence component from an ID.
    #[must_use]
    pub const fn sequence_id(id: i64) -> i64 {
        id & (SEQUENCE_MODULUS - 1)
    }

    /// Emits the `CREATE OR REPLACE FUNCTION` statement for the generator.
    ///
    /// The function takes the child table's sequence name and shard id at
    /// call time, so one definition serves every partition. Re-creatable:
    /// replacing the function with the same epoch is a no-op.
    #[must_use]
    pub fn create_function_sql(&self) -> String {
        format!(
            r"CREATE OR REPLACE FUNCTION {name}(varchar, int, OUT result bigint) AS $$
DECLARE
    sequence_name ALIAS FOR $1;
    shard_id ALIAS FOR $2;

    seq_id bigint;
    now_millis bigint;
BEGIN
    SELECT nextval(sequence_name::regclass) % {modulus} INTO seq_id;

    SELECT FLOOR(EXTRACT(EPOCH FROM clock_timestamp()) * 1000) INTO now_millis;
    result := (now_millis - {epoch}) << {timestamp_shift};
    result := result | (shard_id << {sequence_bits});
    result := result | (seq_id);
END;
$$ LANGUAGE PLPGSQL;",
            name = ID_FUNCTION_NAME,
            modulus = SEQUENCE_MODULUS,
            epoch = self.epoch_millis,
            timestamp_shift = TIMESTAMP_SHIFT,
            sequence_bits = SEQUENCE_BITS,
        )
    }
}
