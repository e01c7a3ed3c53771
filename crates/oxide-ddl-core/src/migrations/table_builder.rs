//! Typestate table builders for the create-table generator.
//!
//! `build()` is only available on a [`CreateTableBuilder`] once a name and
//! at least one column are set. A [`SchemaDefinition`] groups the built
//! tables and turns them into a [`SchemaState`] through the interpreter,
//! which makes it a `to` state for [`diff`](super::diff::diff).

use std::marker::PhantomData;

use crate::error::Result;
use crate::lexer::quote_literal;
use crate::schema::{ForeignKeyRef, SchemaState};

use super::column_builder::{ColumnDefinition, EnumSpec};

// =============================================================================
// Typestate Markers
// =============================================================================

/// Marker: table has no name set.
#[derive(Debug, Clone, Copy)]
pub struct NoName;

/// Marker: table has a name set.
#[derive(Debug, Clone, Copy)]
pub struct HasName;

/// Marker: table has no columns.
#[derive(Debug, Clone, Copy)]
pub struct NoColumns;

/// Marker: table has at least one column.
#[derive(Debug, Clone, Copy)]
pub struct HasColumns;

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraintDefinition {
    /// PRIMARY KEY over several columns.
    PrimaryKey {
        /// Explicit name.
        name: Option<String>,
        /// Key columns.
        columns: Vec<String>,
    },
    /// UNIQUE over several columns.
    Unique {
        /// Explicit name.
        name: Option<String>,
        /// Unique columns.
        columns: Vec<String>,
    },
    /// FOREIGN KEY over several columns.
    ForeignKey {
        /// Explicit name.
        name: Option<String>,
        /// Referencing columns.
        columns: Vec<String>,
        /// The referenced table and columns.
        references: ForeignKeyRef,
    },
    /// CHECK (expression).
    Check {
        /// Explicit name.
        name: Option<String>,
        /// The expression.
        expression: String,
    },
}

impl TableConstraintDefinition {
    /// Renders the constraint as it appears inside CREATE TABLE.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let (name, body) = match self {
            Self::PrimaryKey { name, columns } => {
                (name, format!("PRIMARY KEY ({})", columns.join(", ")))
            }
            Self::Unique { name, columns } => (name, format!("UNIQUE ({})", columns.join(", "))),
            Self::ForeignKey {
                name,
                columns,
                references,
            } => {
                let mut body = format!(
                    "FOREIGN KEY ({}) REFERENCES {}",
                    columns.join(", "),
                    references.table
                );
                if !references.columns.is_empty() {
                    body.push_str(&format!(" ({})", references.columns.join(", ")));
                }
                if let Some(action) = references.on_update {
                    body.push_str(&format!(" ON UPDATE {}", action.as_sql()));
                }
                if let Some(action) = references.on_delete {
                    body.push_str(&format!(" ON DELETE {}", action.as_sql()));
                }
                (name, body)
            }
            Self::Check { name, expression } => (name, format!("CHECK ({expression})")),
        };
        match name {
            Some(name) => format!("CONSTRAINT {name} {body}"),
            None => body,
        }
    }
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|&c| c.to_string()).collect()
}

// =============================================================================
// CreateTableBuilder
// =============================================================================

/// Type-safe CREATE TABLE builder.
///
/// # Example
///
/// ```rust
/// use oxide_ddl_core::migrations::{CreateTableBuilder, serial, text, timestamptz};
///
/// let table = CreateTableBuilder::new()
///     .name("users")
///     .column(serial("id").primary_key().build())
///     .column(text("email").not_null().unique().build())
///     .column(timestamptz("created_at").not_null().default_expr("now()").build())
///     .build();
///
/// assert_eq!(table.name, "users");
/// assert_eq!(table.columns.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CreateTableBuilder<Name, Cols> {
    name: String,
    columns: Vec<ColumnDefinition>,
    constraints: Vec<TableConstraintDefinition>,
    _state: PhantomData<(Name, Cols)>,
}

impl Default for CreateTableBuilder<NoName, NoColumns> {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateTableBuilder<NoName, NoColumns> {
    /// Creates a new `CreateTableBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            columns: Vec::new(),
            constraints: Vec::new(),
            _state: PhantomData,
        }
    }
}

impl<Cols> CreateTableBuilder<NoName, Cols> {
    /// Sets the table name.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> CreateTableBuilder<HasName, Cols> {
        CreateTableBuilder {
            name: name.into(),
            columns: self.columns,
            constraints: self.constraints,
            _state: PhantomData,
        }
    }
}

impl<Name> CreateTableBuilder<Name, NoColumns> {
    /// Adds the first column to the table.
    #[must_use]
    pub fn column(self, column: ColumnDefinition) -> CreateTableBuilder<Name, HasColumns> {
        CreateTableBuilder {
            name: self.name,
            columns: vec![column],
            constraints: self.constraints,
            _state: PhantomData,
        }
    }
}

impl<Name> CreateTableBuilder<Name, HasColumns> {
    /// Adds another column to the table.
    #[must_use]
    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }
}

impl<Name, Cols> CreateTableBuilder<Name, Cols> {
    /// Adds a table-level constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: TableConstraintDefinition) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a composite primary key.
    #[must_use]
    pub fn primary_key(self, columns: &[&str]) -> Self {
        self.constraint(TableConstraintDefinition::PrimaryKey {
            name: None,
            columns: owned(columns),
        })
    }

    /// Adds a unique constraint on several columns.
    #[must_use]
    pub fn unique_constraint(self, columns: &[&str]) -> Self {
        self.constraint(TableConstraintDefinition::Unique {
            name: None,
            columns: owned(columns),
        })
    }

    /// Adds a named unique constraint on several columns.
    #[must_use]
    pub fn unique_constraint_named(self, name: impl Into<String>, columns: &[&str]) -> Self {
        self.constraint(TableConstraintDefinition::Unique {
            name: Some(name.into()),
            columns: owned(columns),
        })
    }

    /// Adds a foreign key over several columns.
    #[must_use]
    pub fn foreign_key(self, columns: &[&str], references: ForeignKeyRef) -> Self {
        self.constraint(TableConstraintDefinition::ForeignKey {
            name: None,
            columns: owned(columns),
            references,
        })
    }

    /// Adds a check constraint.
    #[must_use]
    pub fn check_constraint(self, expression: impl Into<String>) -> Self {
        self.constraint(TableConstraintDefinition::Check {
            name: None,
            expression: expression.into(),
        })
    }

    /// Adds a named check constraint.
    #[must_use]
    pub fn check_constraint_named(
        self,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.constraint(TableConstraintDefinition::Check {
            name: Some(name.into()),
            expression: expression.into(),
        })
    }
}

impl CreateTableBuilder<HasName, HasColumns> {
    /// Builds the table definition.
    #[must_use]
    pub fn build(self) -> TableDefinition {
        TableDefinition {
            name: self.name,
            columns: self.columns,
            constraints: self.constraints,
        }
    }
}

/// A table described in code.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    /// Table name.
    pub name: String,
    /// Columns, in order.
    pub columns: Vec<ColumnDefinition>,
    /// Table-level constraints.
    pub constraints: Vec<TableConstraintDefinition>,
}

impl TableDefinition {
    /// Enum types used by the columns, first occurrence of each name.
    #[must_use]
    pub fn enum_types(&self) -> Vec<&EnumSpec> {
        let mut types: Vec<&EnumSpec> = Vec::new();
        for spec in self.columns.iter().filter_map(|c| c.enum_type.as_ref()) {
            if !types.iter().any(|t| t.name == spec.name) {
                types.push(spec);
            }
        }
        types
    }

    /// Renders the CREATE TABLE statement alone.
    #[must_use]
    pub fn create_table_sql(&self) -> String {
        let items: Vec<String> = self
            .columns
            .iter()
            .map(ColumnDefinition::to_sql)
            .chain(self.constraints.iter().map(TableConstraintDefinition::to_sql))
            .map(|item| format!("  {item}"))
            .collect();
        format!("CREATE TABLE {} (\n{}\n)", self.name, items.join(",\n"))
    }

    /// Renders `CREATE TYPE` for each enum the columns use, then the
    /// `CREATE TABLE` statement.
    #[must_use]
    pub fn to_sql(&self) -> Vec<String> {
        let mut statements: Vec<String> =
            self.enum_types().into_iter().map(create_type_sql).collect();
        statements.push(self.create_table_sql());
        statements
    }
}

fn create_type_sql(spec: &EnumSpec) -> String {
    let labels: Vec<String> = spec
        .labels
        .iter()
        .map(|l| quote_literal(l))
        .collect();
    format!("CREATE TYPE {} AS ENUM ({})", spec.name, labels.join(", "))
}

// =============================================================================
// SchemaDefinition
// =============================================================================

/// A whole schema described in code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDefinition {
    /// Tables, in creation order.
    pub tables: Vec<TableDefinition>,
}

impl SchemaDefinition {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table.
    #[must_use]
    pub fn table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Renders every statement of the schema. An enum type shared by
    /// several tables is created once, before the first table using it.
    #[must_use]
    pub fn to_statements(&self) -> Vec<String> {
        let mut created: Vec<&str> = Vec::new();
        let mut statements = Vec::new();
        for table in &self.tables {
            for spec in table.enum_types() {
                if !created.contains(&spec.name.as_str()) {
                    created.push(&spec.name);
                    statements.push(create_type_sql(spec));
                }
            }
            statements.push(table.create_table_sql());
        }
        statements
    }

    /// Builds the schema state by applying [`Self::to_statements`].
    ///
    /// # Errors
    ///
    /// Returns the interpreter error for the first statement that does not
    /// apply, e.g. a table defined twice.
    pub fn build(&self) -> Result<SchemaState> {
        SchemaState::from_statements(self.to_statements())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::column_builder::{
        bigint, boolean, enumeration, integer, serial, text, varchar,
    };
    use crate::schema::{ForeignKeyAction, IndexKind};

    #[test]
    fn test_create_table_builder() {
        let table = CreateTableBuilder::new()
            .name("users")
            .column(serial("id").primary_key().build())
            .column(varchar("username", 255).not_null().unique().build())
            .column(text("email").build())
            .build();

        assert_eq!(table.name, "users");
        assert_eq!(table.columns.len(), 3);
        assert_eq!(
            table.to_sql(),
            vec![
                "CREATE TABLE users (\n  id SERIAL PRIMARY KEY,\n  username VARCHAR(255) NOT NULL UNIQUE,\n  email TEXT\n)"
            ]
        );
    }

    #[test]
    fn test_create_table_with_constraints() {
        let table = CreateTableBuilder::new()
            .name("order_items")
            .column(bigint("order_id").not_null().build())
            .column(bigint("product_id").not_null().build())
            .column(integer("quantity").not_null().build())
            .primary_key(&["order_id", "product_id"])
            .unique_constraint_named("one_product", &["order_id", "product_id"])
            .check_constraint("quantity > 0")
            .foreign_key(&["order_id"], ForeignKeyRef::new("orders"))
            .build();

        assert_eq!(table.constraints.len(), 4);
        let sql = table.create_table_sql();
        assert!(sql.contains("  PRIMARY KEY (order_id, product_id),\n"));
        assert!(sql.contains("  CONSTRAINT one_product UNIQUE (order_id, product_id),\n"));
        assert!(sql.contains("  CHECK (quantity > 0),\n"));
        assert!(sql.ends_with("  FOREIGN KEY (order_id) REFERENCES orders\n)"));
    }

    #[test]
    fn test_fluent_api_order() {
        let a = CreateTableBuilder::new()
            .name("test")
            .column(boolean("flag").build())
            .check_constraint("flag")
            .build();
        let b = CreateTableBuilder::new()
            .check_constraint("flag")
            .column(boolean("flag").build())
            .name("test")
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_enum_types_come_first() {
        let table = CreateTableBuilder::new()
            .name("orders")
            .column(enumeration("status", "order_status", &["new", "paid"]).build())
            .column(enumeration("previous", "order_status", &["new", "paid"]).build())
            .build();
        assert_eq!(
            table.to_sql(),
            vec![
                "CREATE TYPE order_status AS ENUM ('new', 'paid')",
                "CREATE TABLE orders (\n  status order_status,\n  previous order_status\n)"
            ]
        );
    }

    #[test]
    fn test_schema_definition_builds_state() {
        let schema = SchemaDefinition::new()
            .table(
                CreateTableBuilder::new()
                    .name("users")
                    .column(serial("id").primary_key().build())
                    .column(enumeration("role", "role", &["admin", "member"]).build())
                    .build(),
            )
            .table(
                CreateTableBuilder::new()
                    .name("posts")
                    .column(serial("id").primary_key().build())
                    .column(
                        integer("author_id")
                            .not_null()
                            .references_on_delete("users", "id", ForeignKeyAction::Cascade)
                            .build(),
                    )
                    .column(enumeration("visible_to", "role", &["admin", "member"]).build())
                    .build(),
            );

        let statements = schema.to_statements();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TYPE role"));

        let state = schema.build().unwrap();
        assert_eq!(state.types["role"].labels, vec!["admin", "member"]);
        let posts = &state.tables["posts"];
        assert_eq!(posts.primary_key().map(|pk| pk.name.as_str()), Some("posts_pkey"));
        let fk = posts.index("posts_author_id_fkey").unwrap();
        assert!(matches!(fk.kind, IndexKind::ForeignKey(ref r) if r.table == "users"));
    }

    #[test]
    fn test_schema_definition_rejects_duplicate_tables() {
        let table = CreateTableBuilder::new()
            .name("t")
            .column(integer("a").build())
            .build();
        let schema = SchemaDefinition::new().table(table.clone()).table(table);
        assert!(schema.build().is_err());
    }
}
