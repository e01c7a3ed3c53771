//! Abstract Syntax Tree (AST) types for DDL statements.

mod constraint;
mod statement;

pub use constraint::{
    ColumnConstraint, ColumnConstraintKind, ColumnSpec, ForeignKeyTarget, TableConstraint,
    TableConstraintKind,
};
pub use statement::{
    AlterColumnChange, AlterTable, AlterTableAction, AlterTableClause, AlterType, AlterTypeAction,
    CreateTable, CreateType, DropObjects, LabelPosition, Statement, TableElement,
};
