//! Offline migration generation for PostgreSQL schemas.
//!
//! `oxide-ddl-migrate` keeps a directory of plain SQL migration files and a
//! desired schema script. It never talks to a database:
//!
//! - **Discovery** - [`file::discover_migrations`] reads
//!   `<YYYYMMDDHHMMSS>_<name>.sql` files in version order
//! - **Replay** - [`replay::replay`] rebuilds the current schema from their
//!   up sections
//! - **Generation** - [`generate::generate`] diffs current against desired,
//!   producing up and down statements
//! - **Writer** - [`writer::MigrationWriter`] stores the result as a new file
//!
//! # Example
//!
//! ```rust
//! use oxide_ddl_core::SchemaState;
//! use oxide_ddl_migrate::prelude::*;
//!
//! let current = SchemaState::new();
//! let desired = SchemaState::from_statements(["CREATE TABLE account (id INTEGER)"]).unwrap();
//!
//! let migration = generate(&current, &desired).unwrap();
//! assert_eq!(migration.up.names, vec!["create-account"]);
//! assert_eq!(migration.down.statements, vec!["DROP TABLE account"]);
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Write a migration bringing migrations/ up to schema.sql
//! oxide-ddl generate --schema schema.sql
//!
//! # Print the schema the migrations produce
//! oxide-ddl inspect
//!
//! # Print the statements between two scripts
//! oxide-ddl diff old.sql new.sql
//! ```

pub mod error;
pub mod file;
pub mod generate;
pub mod replay;
pub mod writer;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{MigrateError, Result};
    pub use crate::file::{MigrationFile, discover_migrations};
    pub use crate::generate::{GeneratedMigration, generate};
    pub use crate::replay::{dump, load_schema_file, replay};
    pub use crate::writer::{MigrationWriter, migration_file_name};
}
