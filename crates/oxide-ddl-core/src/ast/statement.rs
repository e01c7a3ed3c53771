//! DDL statement AST types.

use super::constraint::{ColumnSpec, TableConstraint};

/// A parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// CREATE TABLE.
    CreateTable(CreateTable),
    /// CREATE TYPE ... AS ENUM.
    CreateType(CreateType),
    /// ALTER TABLE.
    AlterTable(AlterTable),
    /// ALTER TYPE.
    AlterType(AlterType),
    /// DROP TABLE.
    DropTable(DropObjects),
    /// DROP TYPE.
    DropType(DropObjects),
    /// A statement that cannot change structure (SELECT, INSERT, ...).
    Ignored,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    /// Table name, as written.
    pub name: String,
    /// IF NOT EXISTS was given.
    pub if_not_exists: bool,
    /// Columns and table constraints, in textual order.
    pub elements: Vec<TableElement>,
}

/// One item between the parentheses of CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableElement {
    /// A column definition.
    Column(ColumnSpec),
    /// A table-level constraint.
    Constraint(TableConstraint),
}

/// A CREATE TYPE ... AS ENUM statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateType {
    /// Type name.
    pub name: String,
    /// Labels in declared order.
    pub labels: Vec<String>,
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTable {
    /// Table name.
    pub name: String,
    /// IF EXISTS was given.
    pub if_exists: bool,
    /// What to do.
    pub action: AlterTableAction,
}

/// The body of an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableAction {
    /// RENAME TO new_name.
    RenameTable(String),
    /// RENAME [COLUMN] a TO b.
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// RENAME CONSTRAINT a TO b.
    RenameConstraint {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// A comma-separated list of clauses, applied in order.
    Clauses(Vec<AlterTableClause>),
}

/// A single ALTER TABLE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTableClause {
    /// ADD [COLUMN] [IF NOT EXISTS] column.
    AddColumn {
        /// IF NOT EXISTS was given.
        if_not_exists: bool,
        /// The column.
        column: ColumnSpec,
    },
    /// ADD table_constraint.
    AddConstraint(TableConstraint),
    /// DROP [COLUMN] [IF EXISTS] name.
    DropColumn {
        /// Column name.
        name: String,
        /// IF EXISTS was given.
        if_exists: bool,
    },
    /// DROP CONSTRAINT [IF EXISTS] name.
    DropConstraint {
        /// Constraint name.
        name: String,
        /// IF EXISTS was given.
        if_exists: bool,
    },
    /// ALTER [COLUMN] name change.
    AlterColumn {
        /// Column name.
        column: String,
        /// The change.
        change: AlterColumnChange,
    },
}

/// A change made by ALTER COLUMN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterColumnChange {
    /// [SET DATA] TYPE t.
    SetDataType(String),
    /// SET DEFAULT expr.
    SetDefault(String),
    /// DROP DEFAULT.
    DropDefault,
    /// SET NOT NULL.
    SetNotNull,
    /// DROP NOT NULL.
    DropNotNull,
}

/// An ALTER TYPE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterType {
    /// Type name.
    pub name: String,
    /// What to do.
    pub action: AlterTypeAction,
}

/// The body of an ALTER TYPE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterTypeAction {
    /// ADD VALUE [IF NOT EXISTS] 'label' [BEFORE|AFTER 'existing'].
    AddValue {
        /// The new label.
        label: String,
        /// IF NOT EXISTS was given.
        if_not_exists: bool,
        /// Where to insert. `None` appends.
        position: Option<LabelPosition>,
    },
    /// RENAME VALUE 'a' TO 'b'.
    RenameValue {
        /// Current label.
        from: String,
        /// New label.
        to: String,
    },
    /// RENAME TO new_name.
    Rename(String),
}

/// Where ADD VALUE places a new label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPosition {
    /// BEFORE 'label'.
    Before(String),
    /// AFTER 'label'.
    After(String),
}

/// DROP TABLE / DROP TYPE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropObjects {
    /// Names to drop.
    pub names: Vec<String>,
    /// IF EXISTS was given.
    pub if_exists: bool,
    /// CASCADE was given.
    pub cascade: bool,
}
