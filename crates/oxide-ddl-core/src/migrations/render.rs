//! PostgreSQL rendering of migration operations.

use crate::ast::{AlterColumnChange, LabelPosition};
use crate::lexer::quote_literal;
use crate::schema::naming::{inline_constraint_name, table_constraint_name};
use crate::schema::{ColumnDef, ForeignKeyRef, IndexDef, IndexKind, TableDef};

use super::operation::Operation;

impl Operation {
    /// Renders the operation as a single PostgreSQL statement, without a
    /// trailing semicolon.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::CreateTable(table) => create_table_sql(table),
            Self::RenameTable { from, to } => format!("ALTER TABLE {from} RENAME TO {to}"),
            Self::DropTable(name) => format!("DROP TABLE {name}"),
            Self::AddColumn { table, column } => {
                format!("ALTER TABLE {table} ADD COLUMN {}", column_sql(column))
            }
            Self::RenameColumn { table, from, to } => {
                format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to}")
            }
            Self::AlterColumn {
                table,
                column,
                change,
            } => {
                let action = match change {
                    AlterColumnChange::SetDataType(data_type) => format!("TYPE {data_type}"),
                    AlterColumnChange::SetDefault(expr) => format!("SET DEFAULT {expr}"),
                    AlterColumnChange::DropDefault => String::from("DROP DEFAULT"),
                    AlterColumnChange::SetNotNull => String::from("SET NOT NULL"),
                    AlterColumnChange::DropNotNull => String::from("DROP NOT NULL"),
                };
                format!("ALTER TABLE {table} ALTER COLUMN {column} {action}")
            }
            Self::DropColumn { table, column } => {
                format!("ALTER TABLE {table} DROP COLUMN {column}")
            }
            Self::AddConstraint { table, index } => format!(
                "ALTER TABLE {table} ADD CONSTRAINT {} {}",
                index.name,
                table_constraint_body(index)
            ),
            Self::DropConstraint { table, name } => {
                format!("ALTER TABLE {table} DROP CONSTRAINT {name}")
            }
            Self::CreateType(enum_type) => {
                let labels: Vec<String> =
                    enum_type.labels.iter().map(|l| quote_literal(l)).collect();
                format!(
                    "CREATE TYPE {} AS ENUM ({})",
                    enum_type.name,
                    labels.join(", ")
                )
            }
            Self::AddEnumValue {
                type_name,
                label,
                position,
            } => {
                let mut sql = format!("ALTER TYPE {type_name} ADD VALUE {}", quote_literal(label));
                match position {
                    Some(LabelPosition::Before(existing)) => {
                        sql.push_str(&format!(" BEFORE {}", quote_literal(existing)));
                    }
                    Some(LabelPosition::After(existing)) => {
                        sql.push_str(&format!(" AFTER {}", quote_literal(existing)));
                    }
                    None => {}
                }
                sql
            }
            Self::DropType(name) => format!("DROP TYPE {name}"),
        }
    }
}

/// Renders a column's type, NOT NULL and DEFAULT.
fn column_sql(column: &ColumnDef) -> String {
    let mut sql = format!("{} {}", column.name, column.data_type);
    if column.modifiers.not_null {
        sql.push_str(" NOT NULL");
    }
    if let Some(ref default) = column.modifiers.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(default);
    }
    sql
}

fn references_sql(target: &ForeignKeyRef) -> String {
    let mut sql = format!("REFERENCES {}", target.table);
    if !target.columns.is_empty() {
        sql.push_str(&format!(" ({})", target.columns.join(", ")));
    }
    if let Some(action) = target.on_delete {
        sql.push_str(" ON DELETE ");
        sql.push_str(action.as_sql());
    }
    if let Some(action) = target.on_update {
        sql.push_str(" ON UPDATE ");
        sql.push_str(action.as_sql());
    }
    sql
}

/// Renders a constraint as written after its column.
fn inline_constraint_body(index: &IndexDef) -> String {
    match &index.kind {
        IndexKind::PrimaryKey => String::from("PRIMARY KEY"),
        IndexKind::Unique => String::from("UNIQUE"),
        IndexKind::ForeignKey(target) => references_sql(target),
        IndexKind::Check { expression } => format!("CHECK ({expression})"),
    }
}

/// Renders a constraint as written at table level.
fn table_constraint_body(index: &IndexDef) -> String {
    let columns = index.columns.join(", ");
    match &index.kind {
        IndexKind::PrimaryKey => format!("PRIMARY KEY ({columns})"),
        IndexKind::Unique => format!("UNIQUE ({columns})"),
        IndexKind::ForeignKey(target) => {
            format!("FOREIGN KEY ({columns}) {}", references_sql(target))
        }
        IndexKind::Check { expression } => format!("CHECK ({expression})"),
    }
}

/// Renders a full CREATE TABLE statement.
///
/// Single-column constraints are written inline on their column; the
/// others follow the columns. `CONSTRAINT name` is only spelled out when
/// the interpreter would not derive the same name on its own, and always
/// for table-level checks.
#[must_use]
pub fn create_table_sql(table: &TableDef) -> String {
    let mut inline: Vec<(&str, String)> = Vec::new();
    let mut trailing: Vec<String> = Vec::new();

    for index in &table.indexes {
        match index.columns.as_slice() {
            [column] if table.columns.contains_key(column) => {
                let body = inline_constraint_body(index);
                let entry = if index.name == inline_constraint_name(&table.name, column, &index.kind)
                {
                    body
                } else {
                    format!("CONSTRAINT {} {body}", index.name)
                };
                inline.push((column.as_str(), entry));
            }
            _ => {
                let body = table_constraint_body(index);
                let derived = !matches!(index.kind, IndexKind::Check { .. })
                    && index.name == table_constraint_name(table, &index.columns, &index.kind);
                trailing.push(if derived {
                    body
                } else {
                    format!("CONSTRAINT {} {body}", index.name)
                });
            }
        }
    }

    let mut items: Vec<String> = table
        .columns
        .values()
        .map(|column| {
            let mut sql = column_sql(column);
            for (_, constraint) in inline.iter().filter(|(name, _)| *name == column.name) {
                sql.push(' ');
                sql.push_str(constraint);
            }
            sql
        })
        .collect();
    items.extend(trailing);

    if items.is_empty() {
        return format!("CREATE TABLE {} ()", table.name);
    }

    let body: Vec<String> = items.into_iter().map(|item| format!("  {item}")).collect();
    format!("CREATE TABLE {} (\n{}\n)", table.name, body.join(",\n"))
}
