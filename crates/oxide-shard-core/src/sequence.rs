//! Sequence naming and provisioning.
//!
//! Each child partition owns one sequence feeding the ID generator function.
//! Naming is deterministic so the default-binding ALTER statements can refer
//! to the sequence without further coordination.

use crate::dialect::PostgresDialect;
use crate::plan::PartitionPlan;
use crate::schema::TableSchema;

/// Name of the backing sequence for a table's generated IDs.
#[must_use]
pub fn sharded_id_sequence_name(table_name: &str) -> String {
    format!("{table_name}_id_seq")
}

/// CREATE SEQUENCE statements for every partition slot in the plan,
/// in ascending shard-index order.
#[must_use]
pub fn create_sequence_statements(
    schema: &TableSchema,
    plan: &PartitionPlan,
    dialect: &PostgresDialect,
) -> Vec<String> {
    plan.shard_indexes()
        .iter()
        .map(|&index| {
            let child = schema.child_partition(index);
            format!(
                "{};",
                dialect.create_sequence(&sharded_id_sequence_name(&child.name))
            )
        })
        .collect()
}
