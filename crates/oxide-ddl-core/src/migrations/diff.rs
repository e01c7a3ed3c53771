//! Schema diff engine.
//!
//! Compares a `from` [`SchemaState`] with a desired `to` state and produces
//! the ordered DDL statements turning one into the other. Each statement is
//! applied to `from` as soon as it is emitted, so later steps always see
//! the effect of earlier ones and the output is known to be accepted by the
//! interpreter.
//!
//! The order is fixed:
//!
//! 1. every table of `to`: rename or create it if missing, then reconcile
//!    its columns and constraints;
//! 2. drop the tables `to` does not have;
//! 3. create enum types, or add their missing labels;
//! 4. drop the enum types `to` does not have.
//!
//! Renames are only inferred when exactly one candidate matches; otherwise
//! the diff falls back to create and drop.

use crate::ast::{AlterColumnChange, LabelPosition};
use crate::error::{Result, SchemaError};
use crate::schema::{ColumnDef, EnumTypeDef, SchemaState, TableDef};

use super::operation::Operation;

/// The statements produced by [`diff`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    /// The DDL statements, in application order.
    pub statements: Vec<String>,
    /// One slug per statement, empty unless names were requested.
    pub names: Vec<String>,
}

impl SchemaDiff {
    /// Returns `true` if there is nothing to migrate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns the number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Computes the statements migrating `from` to `to`.
///
/// `from` is mutated: on success it is equal to `to` (enum label removal
/// aside). Clone it first to keep the original. With `with_names`, each
/// statement is paired with a kebab-case slug in [`SchemaDiff::names`].
///
/// # Errors
///
/// Returns the interpreter error if an emitted statement cannot be applied
/// to `from`. The partially migrated `from` should then be discarded.
pub fn diff(from: &mut SchemaState, to: &SchemaState, with_names: bool) -> Result<SchemaDiff> {
    let mut differ = Differ {
        from,
        with_names,
        out: SchemaDiff::default(),
    };
    differ.diff_tables(to)?;
    differ.diff_types(to)?;
    Ok(differ.out)
}

struct Differ<'a> {
    from: &'a mut SchemaState,
    with_names: bool,
    out: SchemaDiff,
}

impl Differ<'_> {
    /// Renders an operation, applies it to `from` and records it.
    fn emit(&mut self, operation: Operation) -> Result<()> {
        let sql = operation.to_sql();
        tracing::debug!(statement = %sql, "emitting migration statement");
        self.from.apply(&sql)?;
        if self.with_names {
            self.out.names.push(operation.slug());
        }
        self.out.statements.push(sql);
        Ok(())
    }

    fn diff_tables(&mut self, to: &SchemaState) -> Result<()> {
        for (name, table) in &to.tables {
            if self.from.table(name).is_none() {
                match self.table_rename_candidate(to, table) {
                    Some(old) => self.emit(Operation::RenameTable {
                        from: old,
                        to: name.clone(),
                    })?,
                    None => self.emit(Operation::CreateTable(table.clone()))?,
                }
            }
            self.diff_columns(table)?;
            self.diff_indexes(table)?;
        }

        let dropped: Vec<String> = self
            .from
            .tables
            .keys()
            .filter(|name| !to.tables.contains_key(*name))
            .cloned()
            .collect();
        for name in dropped {
            self.emit(Operation::DropTable(name))?;
        }
        Ok(())
    }

    /// Returns the only `from` table missing from `to` with the same
    /// columns as `table`.
    fn table_rename_candidate(&self, to: &SchemaState, table: &TableDef) -> Option<String> {
        let candidates: Vec<&String> = self
            .from
            .tables
            .iter()
            .filter(|(name, old)| !to.tables.contains_key(*name) && old.same_structure(table))
            .map(|(name, _)| name)
            .collect();
        match candidates.as_slice() {
            [only] => Some((*only).clone()),
            _ => None,
        }
    }

    /// Returns the `from` table named like `table`, which must exist once
    /// the table itself has been created or renamed.
    fn current(&self, table: &TableDef) -> Result<TableDef> {
        self.from
            .table(&table.name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownTable(table.name.clone()))
    }

    fn diff_columns(&mut self, table: &TableDef) -> Result<()> {
        for column in table.columns.values() {
            let current = self.current(table)?;
            match current.column(&column.name) {
                Some(old) => self.alter_column(&table.name, old, column)?,
                None => {
                    let candidates: Vec<&ColumnDef> = current
                        .columns
                        .values()
                        .filter(|old| {
                            !table.columns.contains_key(&old.name) && old.same_structure(column)
                        })
                        .collect();
                    if let [old] = candidates.as_slice() {
                        self.emit(Operation::RenameColumn {
                            table: table.name.clone(),
                            from: old.name.clone(),
                            to: column.name.clone(),
                        })?;
                        // Same structure, but the default text may differ.
                        let renamed = ColumnDef {
                            name: column.name.clone(),
                            ..(*old).clone()
                        };
                        self.alter_column(&table.name, &renamed, column)?;
                    } else {
                        self.emit(Operation::AddColumn {
                            table: table.name.clone(),
                            column: column.clone(),
                        })?;
                    }
                }
            }
        }

        let vanished: Vec<String> = self
            .current(table)?
            .columns
            .keys()
            .filter(|name| !table.columns.contains_key(*name))
            .cloned()
            .collect();
        for column in vanished {
            self.emit(Operation::DropColumn {
                table: table.name.clone(),
                column,
            })?;
        }
        Ok(())
    }

    /// Emits one ALTER COLUMN per differing attribute.
    fn alter_column(&mut self, table: &str, old: &ColumnDef, new: &ColumnDef) -> Result<()> {
        let mut changes = Vec::new();
        if old.data_type != new.data_type {
            changes.push(AlterColumnChange::SetDataType(new.data_type.clone()));
        }
        if old.modifiers.not_null != new.modifiers.not_null {
            changes.push(if new.modifiers.not_null {
                AlterColumnChange::SetNotNull
            } else {
                AlterColumnChange::DropNotNull
            });
        }
        if old.modifiers.default != new.modifiers.default {
            changes.push(match new.modifiers.default {
                Some(ref expr) => AlterColumnChange::SetDefault(expr.clone()),
                None => AlterColumnChange::DropDefault,
            });
        }

        for change in changes {
            self.emit(Operation::AlterColumn {
                table: table.to_string(),
                column: new.name.clone(),
                change,
            })?;
        }
        Ok(())
    }

    fn diff_indexes(&mut self, table: &TableDef) -> Result<()> {
        let current = self.current(table)?;

        for index in &current.indexes {
            if !table.indexes.contains(index) {
                self.emit(Operation::DropConstraint {
                    table: table.name.clone(),
                    name: index.name.clone(),
                })?;
            }
        }

        let current = self.current(table)?;
        for index in &table.indexes {
            if !current.indexes.contains(index) {
                self.emit(Operation::AddConstraint {
                    table: table.name.clone(),
                    index: index.clone(),
                })?;
            }
        }
        Ok(())
    }

    fn diff_types(&mut self, to: &SchemaState) -> Result<()> {
        for (name, enum_type) in &to.types {
            if self.from.enum_type(name).is_some() {
                self.add_labels(enum_type)?;
            } else {
                self.emit(Operation::CreateType(enum_type.clone()))?;
            }
        }

        let dropped: Vec<String> = self
            .from
            .types
            .keys()
            .filter(|name| !to.types.contains_key(*name))
            .cloned()
            .collect();
        for name in dropped {
            self.emit(Operation::DropType(name))?;
        }
        Ok(())
    }

    /// Adds the labels of `desired` that `from` lacks, each placed
    /// relative to its neighbour in `desired`. Labels only `from` has are
    /// left alone.
    fn add_labels(&mut self, desired: &EnumTypeDef) -> Result<()> {
        for (i, label) in desired.labels.iter().enumerate() {
            let Some(current) = self.from.enum_type(&desired.name) else {
                return Err(SchemaError::UnknownType(desired.name.clone()));
            };
            if current.position(label).is_some() {
                continue;
            }
            let position = if i == 0 {
                current.labels.first().cloned().map(LabelPosition::Before)
            } else {
                Some(LabelPosition::After(desired.labels[i - 1].clone()))
            };
            self.emit(Operation::AddEnumValue {
                type_name: desired.name.clone(),
                label: label.clone(),
                position,
            })?;
        }
        Ok(())
    }
}
