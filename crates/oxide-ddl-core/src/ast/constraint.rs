//! Column and constraint AST types.

use crate::schema::ForeignKeyAction;

/// A column definition inside CREATE TABLE or ADD COLUMN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Type text, whitespace collapsed.
    pub data_type: String,
    /// Inline constraints in textual order.
    pub constraints: Vec<ColumnConstraint>,
}

/// An inline column constraint, optionally named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConstraint {
    /// Name given with CONSTRAINT.
    pub name: Option<String>,
    /// The constraint.
    pub kind: ColumnConstraintKind,
}

/// The kinds of inline column constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConstraintKind {
    /// NOT NULL.
    NotNull,
    /// NULL.
    Null,
    /// DEFAULT expr.
    Default(String),
    /// CHECK (expr).
    Check(String),
    /// UNIQUE.
    Unique,
    /// PRIMARY KEY.
    PrimaryKey,
    /// REFERENCES table [(columns)] ...
    References(ForeignKeyTarget),
}

/// The REFERENCES part of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyTarget {
    /// Referenced table.
    pub table: String,
    /// Referenced columns. Empty means the primary key.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
}

/// A table-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConstraint {
    /// Name given with CONSTRAINT.
    pub name: Option<String>,
    /// The constraint.
    pub kind: TableConstraintKind,
}

/// The kinds of table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraintKind {
    /// PRIMARY KEY (columns).
    PrimaryKey(Vec<String>),
    /// UNIQUE (columns).
    Unique(Vec<String>),
    /// FOREIGN KEY (columns) REFERENCES ...
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// The referenced side.
        target: ForeignKeyTarget,
    },
    /// CHECK (expr).
    Check(String),
}
