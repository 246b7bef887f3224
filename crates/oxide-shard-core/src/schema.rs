//! Schema representation types.
//!
//! These types describe the structure of a logical table as supplied by the
//! caller. The partition generator never mutates them; deriving a child
//! partition produces a renamed structural copy with value semantics, which
//! keeps concurrent generation over the same schema safe.

use serde::{Deserialize, Serialize};

/// SQL data types understood by the partition generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    /// Integer (32-bit).
    Integer,
    /// Big integer (64-bit). Generated IDs require this width.
    BigInt,
    /// Small integer (16-bit).
    SmallInt,
    /// Unbounded text.
    Text,
    /// Variable-length character string.
    Varchar(usize),
    /// Fixed-length character string.
    Char(usize),
    /// Boolean.
    Boolean,
    /// Date and time.
    DateTime,
    /// Date only.
    Date,
    /// Time only.
    Time,
    /// Timestamp (alias for DateTime).
    Timestamp,
    /// Floating point (single precision).
    Real,
    /// Floating point (double precision).
    Double,
    /// Decimal with precision and scale.
    Decimal(u8, u8),
    /// Numeric (alias for Decimal).
    Numeric(u8, u8),
    /// Binary data.
    Bytea,
    /// JSON document.
    Json,
    /// UUID.
    Uuid,
}

impl SqlType {
    /// Returns the PostgreSQL name for this type.
    #[must_use]
    pub fn postgres_name(&self) -> String {
        match self {
            Self::Integer => "INTEGER".to_string(),
            Self::BigInt => "BIGINT".to_string(),
            Self::SmallInt => "SMALLINT".to_string(),
            Self::Text => "TEXT".to_string(),
            Self::Varchar(len) => format!("VARCHAR({len})"),
            Self::Char(len) => format!("CHAR({len})"),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::DateTime | Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Date => "DATE".to_string(),
            Self::Time => "TIME".to_string(),
            Self::Real => "REAL".to_string(),
            Self::Double => "DOUBLE PRECISION".to_string(),
            Self::Decimal(p, s) => format!("DECIMAL({p}, {s})"),
            Self::Numeric(p, s) => format!("NUMERIC({p}, {s})"),
            Self::Bytea => "BYTEA".to_string(),
            Self::Json => "JSONB".to_string(),
            Self::Uuid => "UUID".to_string(),
        }
    }
}

/// Default value for a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// No default value.
    #[default]
    None,
    /// NULL default.
    Null,
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default.
    String(String),
    /// SQL expression (e.g., "CURRENT_TIMESTAMP").
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of this default value.
    #[must_use]
    pub fn to_sql(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Null => Some("NULL".to_string()),
            Self::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(format!("'{}'", s.replace('\'', "''"))),
            Self::Expression(expr) => Some(expr.clone()),
        }
    }
}

fn default_nullable() -> bool {
    true
}

/// Schema definition for a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// SQL data type.
    pub sql_type: SqlType,
    /// Whether the column allows NULL values.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Default value.
    #[serde(default)]
    pub default: DefaultValue,
    /// Whether this column is the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether this column auto-increments on the parent table.
    #[serde(default)]
    pub auto_increment: bool,
    /// Whether this column has a UNIQUE constraint.
    #[serde(default)]
    pub unique: bool,
    /// Check constraint expression (if any).
    #[serde(default)]
    pub check: Option<String>,
}

impl ColumnSchema {
    /// Creates a new column schema.
    #[must_use]
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            nullable: true,
            default: DefaultValue::None,
            primary_key: false,
            auto_increment: false,
            unique: false,
            check: None,
        }
    }

    /// Sets the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.default = value;
        self
    }

    /// Sets the column as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false; // Primary keys are always NOT NULL
        self
    }

    /// Sets the column to auto-increment.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the column as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets a check constraint.
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.check = Some(expr.into());
        self
    }
}

/// Schema definition for an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Index name.
    pub name: String,
    /// Columns included in the index.
    pub columns: Vec<String>,
    /// Whether this is a unique index.
    #[serde(default)]
    pub unique: bool,
    /// Partial index condition (WHERE clause).
    #[serde(default)]
    pub condition: Option<String>,
}

impl IndexSchema {
    /// Creates a new index schema.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
            condition: None,
        }
    }

    /// Marks the index as unique.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets a partial index condition.
    #[must_use]
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Derives the same index retargeted to a child table.
    ///
    /// Index names must be unique per database, so the child index swaps the
    /// parent-table prefix for the child name when the original follows the
    /// `<table>_<suffix>` convention, and prepends the child name otherwise.
    #[must_use]
    pub fn retargeted(&self, parent_table: &str, child_table: &str) -> Self {
        let name = self.name.strip_prefix(parent_table).map_or_else(
            || format!("{child_table}_{}", self.name),
            |suffix| format!("{child_table}{suffix}"),
        );
        Self {
            name,
            columns: self.columns.clone(),
            unique: self.unique,
            condition: self.condition.clone(),
        }
    }
}

/// Complete schema definition for a logical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub name: String,
    /// Column definitions, in declaration order.
    pub columns: Vec<ColumnSchema>,
    /// Index definitions.
    #[serde(default)]
    pub indexes: Vec<IndexSchema>,
}

impl TableSchema {
    /// Creates a new table schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds a column to the table.
    #[must_use]
    pub fn column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, index: IndexSchema) -> Self {
        self.indexes.push(index);
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the columns flagged as primary key.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// Derives the child table for one partition slot.
    ///
    /// The child is a structural copy named `<parent>_<shard_index>`. The
    /// primary key keeps its type but loses auto-increment and any default:
    /// ID assignment happens through the generator function, bound afterwards
    /// with an `ALTER TABLE ... SET DEFAULT`. Indexes are retargeted and
    /// renamed for the child.
    #[must_use]
    pub fn child_partition(&self, shard_index: u32) -> Self {
        let child_name = format!("{}_{shard_index}", self.name);
        let columns = self
            .columns
            .iter()
            .map(|c| {
                if c.primary_key {
                    let mut pk = c.clone();
                    pk.auto_increment = false;
                    pk.default = DefaultValue::None;
                    pk
                } else {
                    c.clone()
                }
            })
            .collect();
        let indexes = self
            .indexes
            .iter()
            .map(|ix| ix.retargeted(&self.name, &child_name))
            .collect();
        Self {
            name: child_name,
            columns,
            indexes,
        }
    }
}
