//! Structural model of a database schema.
//!
//! A [`SchemaState`] holds tables and enum types in insertion order, so
//! iterating it (and therefore diffing it) is deterministic. It only changes
//! through [`SchemaState::apply`], which interprets one DDL statement.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// The target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// The referenced table name.
    pub table: String,
    /// The referenced columns. Empty means the referenced primary key.
    pub columns: Vec<String>,
    /// Action on delete.
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyRef {
    /// Creates a reference to `table` with no explicit columns or actions.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            on_delete: None,
            on_update: None,
        }
    }
}

/// What an index enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// PRIMARY KEY.
    PrimaryKey,
    /// UNIQUE.
    Unique,
    /// FOREIGN KEY ... REFERENCES.
    ForeignKey(ForeignKeyRef),
    /// CHECK (expression).
    Check {
        /// The check expression, as written.
        expression: String,
    },
}

impl IndexKind {
    /// Returns the suffix PostgreSQL appends to generated constraint names.
    #[must_use]
    pub const fn name_suffix(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "pkey",
            Self::Unique => "key",
            Self::ForeignKey(_) => "fkey",
            Self::Check { .. } => "check",
        }
    }

    /// Returns true for a primary key.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKey)
    }
}

/// A named constraint on a table.
///
/// Check constraints declared on a column list that column; table-level
/// checks have no columns. The column list of a check is only used for
/// naming and dropping, so equality ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDef {
    /// Constraint name.
    pub name: String,
    /// Columns covered by the constraint.
    pub columns: Vec<String>,
    /// The kind of constraint.
    pub kind: IndexKind,
}

impl IndexDef {
    /// Creates a new index definition.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>, kind: IndexKind) -> Self {
        Self {
            name: name.into(),
            columns,
            kind,
        }
    }

    /// Returns true if the constraint lists `column`.
    #[must_use]
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

impl PartialEq for IndexDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && (matches!(self.kind, IndexKind::Check { .. }) || self.columns == other.columns)
    }
}

impl Eq for IndexDef {}

/// Column attributes besides name and type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModifiers {
    /// Whether the column is NOT NULL.
    pub not_null: bool,
    /// Default expression, as written.
    pub default: Option<String>,
}

/// A column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Type text, whitespace collapsed (e.g. `VARCHAR(255)`, `INTEGER[]`).
    pub data_type: String,
    /// Nullability and default.
    pub modifiers: ColumnModifiers,
}

impl ColumnDef {
    /// Creates a nullable column without default.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            modifiers: ColumnModifiers::default(),
        }
    }

    /// Returns true if both columns would be created by the same DDL,
    /// ignoring their names.
    ///
    /// Defaults are compared by presence only.
    #[must_use]
    pub fn same_structure(&self, other: &Self) -> bool {
        self.data_type == other.data_type
            && self.modifiers.not_null == other.modifiers.not_null
            && self.modifiers.default.is_some() == other.modifiers.default.is_some()
    }
}

/// A table: ordered columns and its constraints.
///
/// Equality ignores column order and constraint order: neither can be
/// changed by ALTER TABLE, so two tables reached through different DDL
/// histories still compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: IndexMap<String, ColumnDef>,
    /// Constraints. A primary key, when present, comes first.
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            indexes: Vec::new(),
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(name)
    }

    /// Looks up a column by name for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownColumn`] if the column does not exist.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut ColumnDef> {
        match self.columns.get_mut(name) {
            Some(column) => Ok(column),
            None => Err(SchemaError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            }),
        }
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateColumn`] if the name is taken.
    pub fn add_column(&mut self, column: ColumnDef) -> Result<()> {
        if self.columns.contains_key(&column.name) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: column.name,
            });
        }
        self.columns.insert(column.name.clone(), column);
        Ok(())
    }

    /// Removes a column along with every constraint that lists it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownColumn`] if the column does not exist.
    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        if self.columns.shift_remove(name).is_none() {
            return Err(SchemaError::UnknownColumn {
                table: self.name.clone(),
                column: name.to_string(),
            });
        }
        self.indexes.retain(|index| !index.covers(name));
        Ok(())
    }

    /// Renames a column, keeping its position. Constraints listing the
    /// column follow the rename; their names do not change.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownColumn`] if `from` does not exist and
    /// [`SchemaError::DuplicateColumn`] if `to` is taken.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        if from != to && self.columns.contains_key(to) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: to.to_string(),
            });
        }
        let Some((position, _, mut column)) = self.columns.shift_remove_full(from) else {
            return Err(SchemaError::UnknownColumn {
                table: self.name.clone(),
                column: from.to_string(),
            });
        };
        column.name = to.to_string();
        self.columns.shift_insert(position, to.to_string(), column);
        for index in &mut self.indexes {
            for listed in index.columns.iter_mut().filter(|c| *c == from) {
                *listed = to.to_string();
            }
        }
        Ok(())
    }

    /// Returns the primary key constraint, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&IndexDef> {
        self.indexes.first().filter(|index| index.kind.is_primary_key())
    }

    /// Looks up a constraint by name.
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&IndexDef> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Returns true if a constraint with this name exists.
    #[must_use]
    pub fn has_index(&self, name: &str) -> bool {
        self.index(name).is_some()
    }

    /// Adds a constraint. Primary keys are placed first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateConstraint`] when the name is taken
    /// and [`SchemaError::MultiplePrimaryKeys`] when adding a second
    /// primary key.
    pub fn add_index(&mut self, index: IndexDef) -> Result<()> {
        if self.has_index(&index.name) {
            return Err(SchemaError::DuplicateConstraint {
                table: self.name.clone(),
                name: index.name,
            });
        }
        if index.kind.is_primary_key() {
            if self.primary_key().is_some() {
                return Err(SchemaError::MultiplePrimaryKeys {
                    table: self.name.clone(),
                });
            }
            self.indexes.insert(0, index);
        } else {
            self.indexes.push(index);
        }
        Ok(())
    }

    /// Removes a constraint by name and returns it.
    pub fn remove_index(&mut self, name: &str) -> Option<IndexDef> {
        let position = self.indexes.iter().position(|index| index.name == name)?;
        Some(self.indexes.remove(position))
    }

    /// Returns true if both tables have the same columns, paired by name
    /// and compared structurally, ignoring the table names.
    #[must_use]
    pub fn same_structure(&self, other: &Self) -> bool {
        self.columns.len() == other.columns.len()
            && self.columns.iter().all(|(name, column)| {
                other
                    .column(name)
                    .is_some_and(|theirs| column.same_structure(theirs))
            })
    }
}

impl PartialEq for TableDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.columns == other.columns
            && self.indexes.len() == other.indexes.len()
            && self.indexes.iter().all(|index| other.indexes.contains(index))
    }
}

impl Eq for TableDef {}

/// A user-defined enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumTypeDef {
    /// Type name.
    pub name: String,
    /// Labels in sort order.
    pub labels: Vec<String>,
}

impl EnumTypeDef {
    /// Creates an enum type.
    #[must_use]
    pub fn new(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// Returns the position of a label.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// The whole structural state of a database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaState {
    /// Tables in creation order.
    pub tables: IndexMap<String, TableDef>,
    /// Enum types in creation order.
    pub types: IndexMap<String, EnumTypeDef>,
}

impl SchemaState {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema by applying each statement in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`SchemaState::apply`].
    pub fn from_statements<I, S>(statements: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::new();
        for sql in statements {
            state.apply(sql.as_ref())?;
        }
        Ok(state)
    }

    /// Returns true if the schema has no tables and no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.types.is_empty()
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.get(name)
    }

    /// Looks up a table by name for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownTable`] if the table does not exist.
    pub fn table_mut(&mut self, name: &str) -> Result<&mut TableDef> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// Looks up an enum type by name.
    #[must_use]
    pub fn enum_type(&self, name: &str) -> Option<&EnumTypeDef> {
        self.types.get(name)
    }

    /// Looks up an enum type by name for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownType`] if the type does not exist.
    pub fn enum_type_mut(&mut self, name: &str) -> Result<&mut EnumTypeDef> {
        self.types
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownType(name.to_string()))
    }
}
