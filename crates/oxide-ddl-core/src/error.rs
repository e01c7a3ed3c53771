//! Error types for applying DDL to a schema.

use crate::parser::ParseError;

/// Errors raised while interpreting DDL or diffing schemas.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The statement could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A statement names a table that does not exist.
    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    /// A statement names a column that does not exist.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn {
        /// The table searched.
        table: String,
        /// The missing column.
        column: String,
    },

    /// A statement names a constraint that does not exist.
    #[error("Unknown constraint '{name}' in table '{table}'")]
    UnknownConstraint {
        /// The table searched.
        table: String,
        /// The missing constraint.
        name: String,
    },

    /// A statement names a type that does not exist.
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// An enum label used as a position or rename source does not exist.
    #[error("Unknown label '{label}' in type '{type_name}'")]
    UnknownLabel {
        /// The enum type searched.
        type_name: String,
        /// The missing label.
        label: String,
    },

    /// CREATE TABLE on an existing table.
    #[error("Table '{0}' already exists")]
    DuplicateTable(String),

    /// CREATE TYPE on an existing type, or a rename onto one.
    #[error("Type '{0}' already exists")]
    DuplicateType(String),

    /// A column name is already taken.
    #[error("Column '{column}' already exists in table '{table}'")]
    DuplicateColumn {
        /// The table.
        table: String,
        /// The duplicated column.
        column: String,
    },

    /// A constraint name is already taken on the table.
    #[error("Constraint '{name}' already exists on table '{table}'")]
    DuplicateConstraint {
        /// The table.
        table: String,
        /// The duplicated constraint name.
        name: String,
    },

    /// A label is already part of the enum type.
    #[error("Label '{label}' already exists in type '{type_name}'")]
    DuplicateLabel {
        /// The enum type.
        type_name: String,
        /// The duplicated label.
        label: String,
    },

    /// A second primary key on one table.
    #[error("Multiple primary keys for table '{table}' are not allowed")]
    MultiplePrimaryKeys {
        /// The table.
        table: String,
    },
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
