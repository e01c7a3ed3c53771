//! Column definition builder for the create-table generator.
//!
//! Column types are kept as raw PostgreSQL type text, the same way the
//! interpreter stores them, so generated DDL and replayed DDL compare
//! equal.

use crate::lexer::quote_literal;
use crate::schema::{ForeignKeyAction, ForeignKeyRef};

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// NULL default.
    Null,
    /// Boolean default.
    Boolean(bool),
    /// Integer default.
    Integer(i64),
    /// Float default.
    Float(f64),
    /// String default, quoted on output.
    String(String),
    /// Raw SQL expression (e.g., `now()`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL representation of the default value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => quote_literal(s),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

/// An enum type a column is declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSpec {
    /// Type name.
    pub name: String,
    /// Labels, in order.
    pub labels: Vec<String>,
}

/// A complete column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Raw type text.
    pub data_type: String,
    /// Enum type to create before the table, if the column uses one.
    pub enum_type: Option<EnumSpec>,
    /// Whether the column is NOT NULL.
    pub not_null: bool,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Whether this is the primary key.
    pub primary_key: bool,
    /// Whether this column is unique.
    pub unique: bool,
    /// Foreign key reference, if any.
    pub references: Option<ForeignKeyRef>,
    /// Check constraint expression, if any.
    pub check: Option<String>,
}

impl ColumnDefinition {
    /// Creates a nullable column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            enum_type: None,
            not_null: false,
            default: None,
            primary_key: false,
            unique: false,
            references: None,
            check: None,
        }
    }

    /// Renders the column as it appears inside CREATE TABLE.
    ///
    /// Modifiers come in a fixed order: PRIMARY KEY, NOT NULL, DEFAULT,
    /// CHECK, UNIQUE, REFERENCES.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(ref default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if let Some(ref check) = self.check {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(ref fk) = self.references {
            sql.push_str(&format!(" REFERENCES {}", fk.table));
            if !fk.columns.is_empty() {
                sql.push_str(&format!(" ({})", fk.columns.join(", ")));
            }
            if let Some(action) = fk.on_update {
                sql.push_str(" ON UPDATE ");
                sql.push_str(action.as_sql());
            }
            if let Some(action) = fk.on_delete {
                sql.push_str(" ON DELETE ");
                sql.push_str(action.as_sql());
            }
        }
        sql
    }
}

/// Fluent builder for [`ColumnDefinition`].
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    column: ColumnDefinition,
}

impl ColumnBuilder {
    /// Creates a new column builder with name and raw type text.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            column: ColumnDefinition::new(name, data_type),
        }
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.column.not_null = true;
        self
    }

    /// Marks the column as nullable (default).
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.column.not_null = false;
        self
    }

    /// Marks the column as PRIMARY KEY. NOT NULL is not implied.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.column.primary_key = true;
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.column.unique = true;
        self
    }

    /// Sets a boolean default value.
    #[must_use]
    pub fn default_bool(self, value: bool) -> Self {
        self.default(DefaultValue::Boolean(value))
    }

    /// Sets an integer default value.
    #[must_use]
    pub fn default_int(self, value: i64) -> Self {
        self.default(DefaultValue::Integer(value))
    }

    /// Sets a float default value.
    #[must_use]
    pub fn default_float(self, value: f64) -> Self {
        self.default(DefaultValue::Float(value))
    }

    /// Sets a string default value.
    #[must_use]
    pub fn default_str(self, value: impl Into<String>) -> Self {
        self.default(DefaultValue::String(value.into()))
    }

    /// Sets a NULL default value.
    #[must_use]
    pub fn default_null(self) -> Self {
        self.default(DefaultValue::Null)
    }

    /// Sets a raw SQL expression as default.
    #[must_use]
    pub fn default_expr(self, expr: impl Into<String>) -> Self {
        self.default(DefaultValue::Expression(expr.into()))
    }

    /// Sets the default value.
    #[must_use]
    pub fn default(mut self, value: DefaultValue) -> Self {
        self.column.default = Some(value);
        self
    }

    /// References `column` of `table`.
    #[must_use]
    pub fn references(self, table: impl Into<String>, column: impl Into<String>) -> Self {
        let column: String = column.into();
        self.references_full(table, &[column.as_str()], None, None)
    }

    /// References `column` of `table` with an ON DELETE action.
    #[must_use]
    pub fn references_on_delete(
        self,
        table: impl Into<String>,
        column: impl Into<String>,
        on_delete: ForeignKeyAction,
    ) -> Self {
        let column: String = column.into();
        self.references_full(table, &[column.as_str()], Some(on_delete), None)
    }

    /// References `columns` of `table` (empty means its primary key) with
    /// both referential actions.
    #[must_use]
    pub fn references_full(
        mut self,
        table: impl Into<String>,
        columns: &[&str],
        on_delete: Option<ForeignKeyAction>,
        on_update: Option<ForeignKeyAction>,
    ) -> Self {
        self.column.references = Some(ForeignKeyRef {
            table: table.into(),
            columns: columns.iter().map(|&c| c.to_string()).collect(),
            on_delete,
            on_update,
        });
        self
    }

    /// Adds a CHECK constraint.
    #[must_use]
    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.column.check = Some(expr.into());
        self
    }

    /// Builds the column definition.
    #[must_use]
    pub fn build(self) -> ColumnDefinition {
        self.column
    }
}

// =============================================================================
// Shorthand Functions for Common Types
// =============================================================================

/// Creates an INTEGER column builder.
#[must_use]
pub fn integer(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "INTEGER")
}

/// Creates a SMALLINT column builder.
#[must_use]
pub fn smallint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "SMALLINT")
}

/// Creates a BIGINT column builder.
#[must_use]
pub fn bigint(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "BIGINT")
}

/// Creates a SERIAL column builder.
#[must_use]
pub fn serial(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "SERIAL")
}

/// Creates a BIGSERIAL column builder.
#[must_use]
pub fn bigserial(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "BIGSERIAL")
}

/// Creates a NUMERIC column builder.
#[must_use]
pub fn numeric(name: impl Into<String>, precision: u16, scale: u16) -> ColumnBuilder {
    ColumnBuilder::new(name, format!("NUMERIC({precision}, {scale})"))
}

/// Creates a VARCHAR column builder.
#[must_use]
pub fn varchar(name: impl Into<String>, len: u32) -> ColumnBuilder {
    ColumnBuilder::new(name, format!("VARCHAR({len})"))
}

/// Creates a TEXT column builder.
#[must_use]
pub fn text(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "TEXT")
}

/// Creates a BOOLEAN column builder.
#[must_use]
pub fn boolean(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "BOOLEAN")
}

/// Creates a DATE column builder.
#[must_use]
pub fn date(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "DATE")
}

/// Creates a TIMESTAMP column builder.
#[must_use]
pub fn timestamp(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "TIMESTAMP")
}

/// Creates a TIMESTAMPTZ column builder.
#[must_use]
pub fn timestamptz(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "TIMESTAMPTZ")
}

/// Creates a UUID column builder.
#[must_use]
pub fn uuid(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "UUID")
}

/// Creates a JSONB column builder.
#[must_use]
pub fn jsonb(name: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, "JSONB")
}

/// Creates a column with arbitrary type text.
#[must_use]
pub fn custom(name: impl Into<String>, data_type: impl Into<String>) -> ColumnBuilder {
    ColumnBuilder::new(name, data_type)
}

/// Creates a column of enum type `type_name`. The table generator emits
/// `CREATE TYPE type_name AS ENUM (...)` before the table.
#[must_use]
pub fn enumeration(
    name: impl Into<String>,
    type_name: impl Into<String>,
    labels: &[&str],
) -> ColumnBuilder {
    let type_name = type_name.into();
    let mut builder = ColumnBuilder::new(name, type_name.clone());
    builder.column.enum_type = Some(EnumSpec {
        name: type_name,
        labels: labels.iter().map(|&l| l.to_string()).collect(),
    });
    builder
}
