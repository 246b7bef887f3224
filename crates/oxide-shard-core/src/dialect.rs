//! PostgreSQL DDL rendering.
//!
//! The generator targets PostgreSQL only: the CHECK constraints rely on the
//! modulo operator and the ID generator on PL/pgSQL with bitwise shifts.

use crate::schema::{ColumnSchema, IndexSchema, SqlType, TableSchema};

/// Renders schema objects as PostgreSQL DDL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Quotes an identifier.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    /// Generates a column definition.
    ///
    /// Auto-incrementing primary keys map to SERIAL/BIGSERIAL; a child
    /// partition's flattened key therefore renders as a plain integer type.
    #[must_use]
    pub fn column_definition(&self, column: &ColumnSchema) -> String {
        let type_name = if column.primary_key && column.auto_increment {
            match column.sql_type {
                SqlType::Integer | SqlType::SmallInt => "SERIAL".to_string(),
                SqlType::BigInt => "BIGSERIAL".to_string(),
                _ => column.sql_type.postgres_name(),
            }
        } else {
            column.sql_type.postgres_name()
        };

        let mut parts = vec![self.quote_identifier(&column.name), type_name];

        if column.primary_key {
            parts.push("PRIMARY KEY".to_string());
        } else {
            if !column.nullable {
                parts.push("NOT NULL".to_string());
            }
            if column.unique {
                parts.push("UNIQUE".to_string());
            }
        }

        if let Some(default_sql) = column.default.to_sql() {
            parts.push(format!("DEFAULT {default_sql}"));
        }

        if let Some(ref check) = column.check {
            parts.push(format!("CHECK ({check})"));
        }

        parts.join(" ")
    }

    /// Generates a CREATE TABLE statement (without trailing semicolon).
    #[must_use]
    pub fn create_table(&self, table: &TableSchema) -> String {
        let mut sql = String::from("CREATE TABLE ");
        sql.push_str(&self.quote_identifier(&table.name));
        sql.push_str(" (\n");

        let column_defs: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("    {}", self.column_definition(c)))
            .collect();
        sql.push_str(&column_defs.join(",\n"));

        sql.push_str("\n)");
        sql
    }

    /// Generates a CREATE INDEX statement (without trailing semicolon).
    #[must_use]
    pub fn create_index(&self, table: &str, index: &IndexSchema) -> String {
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        sql.push_str(&self.quote_identifier(&index.name));
        sql.push_str(" ON ");
        sql.push_str(&self.quote_identifier(table));

        sql.push_str(" (");
        let columns: Vec<String> = index
            .columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect();
        sql.push_str(&columns.join(", "));
        sql.push(')');

        if let Some(ref condition) = index.condition {
            sql.push_str(" WHERE ");
            sql.push_str(condition);
        }

        sql
    }

    /// Generates a CREATE SEQUENCE statement (without trailing semicolon).
    #[must_use]
    pub fn create_sequence(&self, name: &str) -> String {
        format!("CREATE SEQUENCE {}", self.quote_identifier(name))
    }
}
