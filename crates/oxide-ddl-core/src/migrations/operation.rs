//! Migration operations.
//!
//! Every statement the diff engine emits is first built as an [`Operation`],
//! then rendered with [`Operation::to_sql`] and named with
//! [`Operation::slug`].

use crate::ast::{AlterColumnChange, LabelPosition};
use crate::schema::{ColumnDef, EnumTypeDef, IndexDef, IndexKind, TableDef};

/// All operations the diff engine can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a table with its columns and constraints.
    CreateTable(TableDef),
    /// Rename a table.
    RenameTable {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// Drop a table.
    DropTable(String),
    /// Add a column (type, NOT NULL and DEFAULT only).
    AddColumn {
        /// Table name.
        table: String,
        /// The column.
        column: ColumnDef,
    },
    /// Rename a column.
    RenameColumn {
        /// Table name.
        table: String,
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// Change one attribute of a column.
    AlterColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
        /// The change.
        change: AlterColumnChange,
    },
    /// Drop a column.
    DropColumn {
        /// Table name.
        table: String,
        /// Column name.
        column: String,
    },
    /// Add a named constraint.
    AddConstraint {
        /// Table name.
        table: String,
        /// The constraint.
        index: IndexDef,
    },
    /// Drop a constraint by name.
    DropConstraint {
        /// Table name.
        table: String,
        /// Constraint name.
        name: String,
    },
    /// Create an enum type.
    CreateType(EnumTypeDef),
    /// Add a label to an enum type.
    AddEnumValue {
        /// Type name.
        type_name: String,
        /// The new label.
        label: String,
        /// Where the label goes; `None` appends.
        position: Option<LabelPosition>,
    },
    /// Drop an enum type.
    DropType(String),
}

impl Operation {
    /// Returns a short kebab-case name for the operation, used to build
    /// migration file names.
    #[must_use]
    pub fn slug(&self) -> String {
        let raw = match self {
            Self::CreateTable(table) => format!("create-{}", table.name),
            Self::RenameTable { from, to } | Self::RenameColumn { from, to, .. } => {
                format!("rename-{from}-to-{to}")
            }
            Self::DropTable(name) => format!("drop-table-{name}"),
            Self::AddColumn { table, column } => format!("add-{}-to-{table}", column.name),
            Self::AlterColumn { table, column, .. } => format!("alter-{column}-in-{table}"),
            Self::DropColumn { table, column } => format!("drop-{column}-in-{table}"),
            Self::AddConstraint { table, index } => {
                let columns = index.columns.join("-");
                match index.kind {
                    IndexKind::PrimaryKey => format!("add-primary-key-to-{columns}-in-{table}"),
                    IndexKind::Unique => format!("add-unique-to-{columns}-in-{table}"),
                    IndexKind::ForeignKey(_) => {
                        format!("add-foreign-key-to-{columns}-in-{table}")
                    }
                    IndexKind::Check { .. } => format!("add-check-in-{table}"),
                }
            }
            Self::DropConstraint { table, name } => format!("drop-constraint-{name}-in-{table}"),
            Self::CreateType(enum_type) => format!("create-{}", enum_type.name),
            Self::AddEnumValue {
                type_name, label, ..
            } => format!("add-{label}-to-{type_name}"),
            Self::DropType(name) => format!("drop-type-{name}"),
        };
        sanitize_slug(&raw)
    }
}

/// Lowercases a slug, drops identifier quotes and turns anything that is
/// not alphanumeric, `_` or `-` into `-`.
fn sanitize_slug(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars().filter(|c| !matches!(c, '"' | '`')) {
        if c.is_alphanumeric() || c == '_' || c == '-' {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}
