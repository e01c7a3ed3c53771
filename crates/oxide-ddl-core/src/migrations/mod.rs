//! Schema diffing and migration generation.
//!
//! [`diff`] compares two [`SchemaState`](crate::schema::SchemaState)s and
//! produces the PostgreSQL statements that turn one into the other. Each
//! statement is built as an [`Operation`], rendered, and fed back into the
//! interpreter before the next one is computed.
//!
//! The builders describe a desired schema in code:
//!
//! ```rust
//! use oxide_ddl_core::migrations::{CreateTableBuilder, SchemaDefinition, diff, serial, text};
//! use oxide_ddl_core::SchemaState;
//!
//! let desired = SchemaDefinition::new()
//!     .table(
//!         CreateTableBuilder::new()
//!             .name("users")
//!             .column(serial("id").primary_key().build())
//!             .column(text("email").not_null().build())
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut current = SchemaState::new();
//! let changes = diff(&mut current, &desired, true).unwrap();
//! assert_eq!(changes.names, vec!["create-users"]);
//! assert_eq!(current, desired);
//! ```

mod column_builder;
pub mod diff;
mod operation;
mod render;
mod table_builder;

pub use column_builder::{
    ColumnBuilder, ColumnDefinition, DefaultValue, EnumSpec, bigint, bigserial, boolean, custom,
    date, enumeration, integer, jsonb, numeric, serial, smallint, text, timestamp, timestamptz,
    uuid, varchar,
};
pub use diff::{SchemaDiff, diff};
pub use operation::Operation;
pub use render::create_table_sql;
pub use table_builder::{
    CreateTableBuilder, HasColumns, HasName, NoColumns, NoName, SchemaDefinition,
    TableConstraintDefinition, TableDefinition,
};
