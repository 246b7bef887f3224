//! Partition DDL generation.
//!
//! Orchestrates the whole emission pipeline: validates the inputs, then
//! produces the generator function, per-child sequences, tables, indexes,
//! CHECK constraints, and default-binding ALTERs in a fixed block order.
//! Generation is a pure single pass over the plan; identical inputs always
//! produce byte-identical output.

use crate::catalog::ShardedTable;
use crate::dialect::PostgresDialect;
use crate::error::{Result, ShardError};
use crate::idgen::{IdGeneratorSpec, ID_FUNCTION_NAME, MAX_SHARD_COUNT};
use crate::key::KeyCombination;
use crate::plan::PartitionPlan;
use crate::schema::{ColumnSchema, TableSchema};
use crate::sequence::{create_sequence_statements, sharded_id_sequence_name};

/// Generates the full DDL for a partitioned table.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionDdlGenerator {
    dialect: PostgresDialect,
    id_generator: IdGeneratorSpec,
    combination: KeyCombination,
}

impl PartitionDdlGenerator {
    /// Creates a generator with the default epoch and key combination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the ID generator parameters.
    #[must_use]
    pub const fn with_id_generator(mut self, spec: IdGeneratorSpec) -> Self {
        self.id_generator = spec;
        self
    }

    /// Overrides the composite key combination strategy.
    #[must_use]
    pub const fn with_key_combination(mut self, combination: KeyCombination) -> Self {
        self.combination = combination;
        self
    }

    /// Generates the ordered DDL statements for every partition in the plan.
    ///
    /// Statement order: generator function, CREATE SEQUENCEs, CREATE TABLEs,
    /// CREATE INDEXes, CHECK constraints, default-binding ALTERs — each block
    /// in ascending shard-index order. An empty plan yields the generator
    /// function alone.
    ///
    /// # Errors
    ///
    /// All validation happens before any statement is built, so an `Err`
    /// means no SQL was produced: the shard key must be non-empty and name
    /// only existing columns, the table must have exactly one primary key
    /// column, and every shard index must fit the ID generator's shard bit
    /// allocation.
    pub fn statements(&self, table: &ShardedTable, plan: &PartitionPlan) -> Result<Vec<String>> {
        let schema = &table.schema;
        table.shard_key.validate_against(schema)?;
        let key = table.shard_key.resolve(self.combination)?;
        let pk = primary_key_column(schema)?;
        if let Some(&index) = plan.shard_indexes().last() {
            if i64::from(index) >= MAX_SHARD_COUNT {
                return Err(ShardError::ShardRangeOverflow {
                    index,
                    max: MAX_SHARD_COUNT,
                });
            }
        }

        let mut statements = vec![self.id_generator.create_function_sql()];

        statements.extend(create_sequence_statements(schema, plan, &self.dialect));

        for &index in plan.shard_indexes() {
            let child = schema.child_partition(index);
            statements.push(format!("{};", self.dialect.create_table(&child)));
        }

        for &index in plan.shard_indexes() {
            let child = schema.child_partition(index);
            for child_index in &child.indexes {
                statements.push(format!(
                    "{};",
                    self.dialect.create_index(&child.name, child_index)
                ));
            }
        }

        for &index in plan.shard_indexes() {
            let child = schema.child_partition(index);
            let constraint = format!("{}_{}_check_modulo", child.name, key.display_name);
            statements.push(format!(
                "ALTER TABLE {} ADD CONSTRAINT {} CHECK ({} % {} = {index});",
                self.dialect.quote_identifier(&child.name),
                self.dialect.quote_identifier(&constraint),
                key.constraint_expr,
                plan.partition_count(),
            ));
        }

        // Bind each child's key default to the generator, using the child's
        // own sequence and shard index. Kept last so the function and the
        // sequences exist by the time these run.
        for &index in plan.shard_indexes() {
            let child = schema.child_partition(index);
            statements.push(format!(
                "ALTER TABLE {} ALTER COLUMN {} SET DEFAULT {ID_FUNCTION_NAME}('{}', {index});",
                self.dialect.quote_identifier(&child.name),
                self.dialect.quote_identifier(&pk.name),
                sharded_id_sequence_name(&child.name),
            ));
        }

        Ok(statements)
    }

    /// Generates the final SQL blob: statements separated by blank lines,
    /// terminated with a trailing newline.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::statements`].
    pub fn sql(&self, table: &ShardedTable, plan: &PartitionPlan) -> Result<String> {
        Ok(format!("{}\n", self.statements(table, plan)?.join("\n\n")))
    }
}

fn primary_key_column(schema: &TableSchema) -> Result<&ColumnSchema> {
    let mut columns = schema.primary_key_columns();
    match (columns.next(), columns.next()) {
        (Some(pk), None) => Ok(pk),
        _ => Err(ShardError::PrimaryKeyShape {
            table: schema.name.clone(),
            count: schema.primary_key_columns().count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::ShardKeySpec;
    use crate::schema::{IndexSchema, SqlType};

    fn post_table() -> ShardedTable {
        ShardedTable {
            schema: TableSchema::new("forum_post")
                .column(
                    ColumnSchema::new("id", SqlType::BigInt)
                        .primary_key()
                        .auto_increment(),
                )
                .column(ColumnSchema::new("forum_id", SqlType::BigInt).not_null())
                .column(ColumnSchema::new("body", SqlType::Text).not_null())
                .index(IndexSchema::new(
                    "forum_post_forum_id",
                    vec!["forum_id".to_string()],
                )),
            shard_key: ShardKeySpec::Column("forum_id".to_string()),
        }
    }

    #[test]
    fn statements_follow_block_order() {
        let table = post_table();
        let plan = PartitionPlan::strided(4, 0, 2).expect("valid plan");
        let statements = PartitionDdlGenerator::new()
            .statements(&table, &plan)
            .expect("valid inputs");

        // function + 2 sequences + 2 tables + 2 indexes + 2 checks + 2 alters
        assert_eq!(statements.len(), 11);
        assert!(statements[0].starts_with("CREATE OR REPLACE FUNCTION next_sharded_id"));
        assert_eq!(statements[1], "CREATE SEQUENCE \"forum_post_0_id_seq\";");
        assert_eq!(statements[2], "CREATE SEQUENCE \"forum_post_2_id_seq\";");
        assert!(statements[3].starts_with("CREATE TABLE \"forum_post_0\""));
        assert!(statements[4].starts_with("CREATE TABLE \"forum_post_2\""));
        assert_eq!(
            statements[5],
            "CREATE INDEX \"forum_post_0_forum_id\" ON \"forum_post_0\" (\"forum_id\");"
        );
        assert_eq!(
            statements[6],
            "CREATE INDEX \"forum_post_2_forum_id\" ON \"forum_post_2\" (\"forum_id\");"
        );
        assert_eq!(
            statements[7],
            "ALTER TABLE \"forum_post_0\" ADD CONSTRAINT \"forum_post_0_forum_id_check_modulo\" CHECK (\"forum_id\" % 4 = 0);"
        );
        assert_eq!(
            statements[8],
            "ALTER TABLE \"forum_post_2\" ADD CONSTRAINT \"forum_post_2_forum_id_check_modulo\" CHECK (\"forum_id\" % 4 = 2);"
        );
        assert_eq!(
            statements[9],
            "ALTER TABLE \"forum_post_0\" ALTER COLUMN \"id\" SET DEFAULT next_sharded_id('forum_post_0_id_seq', 0);"
        );
        assert_eq!(
            statements[10],
            "ALTER TABLE \"forum_post_2\" ALTER COLUMN \"id\" SET DEFAULT next_sharded_id('forum_post_2_id_seq', 2);"
        );
    }

    #[test]
    fn child_table_keeps_plain_bigint_key() {
        let table = post_table();
        let plan = PartitionPlan::new(1, [0]).expect("valid plan");
        let statements = PartitionDdlGenerator::new()
            .statements(&table, &plan)
            .expect("valid inputs");

        let create = statements
            .iter()
            .find(|s| s.starts_with("CREATE TABLE"))
            .expect("table statement");
        // The parent's BIGSERIAL collapses to a plain BIGINT on the child.
        assert!(create.contains("\"id\" BIGINT PRIMARY KEY"));
        assert!(!create.contains("BIGSERIAL"));
    }

    #[test]
    fn empty_plan_emits_only_the_function() {
        let table = post_table();
        let plan = PartitionPlan::strided(2, 3, 4).expect("valid plan");
        let statements = PartitionDdlGenerator::new()
            .statements(&table, &plan)
            .expect("valid inputs");

        assert_eq!(statements.len(), 1);
        assert!(statements[0].starts_with("CREATE OR REPLACE FUNCTION"));
    }

    #[test]
    fn unknown_key_column_fails_before_emission() {
        let mut table = post_table();
        table.shard_key = ShardKeySpec::Column("missing".to_string());
        let plan = PartitionPlan::new(4, [0]).expect("valid plan");

        assert!(matches!(
            PartitionDdlGenerator::new().statements(&table, &plan),
            Err(ShardError::UnknownKeyColumn { .. })
        ));
    }

    #[test]
    fn shard_index_must_fit_generator_bit_width() {
        let table = post_table();
        let plan = PartitionPlan::new(10_000, [0, 9_000]).expect("valid plan");

        assert!(matches!(
            PartitionDdlGenerator::new().statements(&table, &plan),
            Err(ShardError::ShardRangeOverflow { index: 9_000, .. })
        ));
    }

    #[test]
    fn composite_primary_key_is_rejected() {
        let mut table = post_table();
        table.schema = TableSchema::new("forum_post")
            .column(ColumnSchema::new("id", SqlType::BigInt).primary_key())
            .column(ColumnSchema::new("forum_id", SqlType::BigInt).primary_key());
        let plan = PartitionPlan::new(4, [0]).expect("valid plan");

        assert!(matches!(
            PartitionDdlGenerator::new().statements(&table, &plan),
            Err(ShardError::PrimaryKeyShape { count: 2, .. })
        ));
    }

    #[test]
    fn missing_primary_key_is_rejected() {
        let mut table = post_table();
        table.schema = TableSchema::new("forum_post")
            .column(ColumnSchema::new("forum_id", SqlType::BigInt).not_null());
        let plan = PartitionPlan::new(4, [0]).expect("valid plan");

        assert!(matches!(
            PartitionDdlGenerator::new().statements(&table, &plan),
            Err(ShardError::PrimaryKeyShape { count: 0, .. })
        ));
    }
}
