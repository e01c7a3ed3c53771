//! Error types for the migration tool.

use std::path::PathBuf;

use oxide_ddl_core::SchemaError;

/// Errors that can occur while reading, replaying or writing migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// IO error (reading/writing migration files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A statement from a file failed to apply.
    #[error("{}: failed to apply `{statement}`: {source}", file.display())]
    Schema {
        /// The file the statement came from.
        file: PathBuf,
        /// The offending statement.
        statement: String,
        /// What the interpreter reported.
        source: SchemaError,
    },

    /// Diffing two replayed states failed.
    #[error("Diff error: {0}")]
    Diff(#[from] SchemaError),

    /// A file name does not follow `<14 digit timestamp>_<name>.sql`.
    #[error("Invalid migration file name '{0}'")]
    InvalidFileName(String),

    /// A migration file has no `-- migrate:up` marker.
    #[error("Migration file {} has no `-- migrate:up` section", .0.display())]
    MissingUpSection(PathBuf),

    /// A section marker appears twice in one file.
    #[error("Migration file {} declares `-- migrate:{section}` twice", file.display())]
    DuplicateSection {
        /// The migration file.
        file: PathBuf,
        /// `up` or `down`.
        section: &'static str,
    },

    /// Migration file already exists.
    #[error("Migration file already exists: {}", .0.display())]
    MigrationExists(PathBuf),

    /// No migrations directory found.
    #[error("Migrations directory not found: {}", .0.display())]
    MigrationsDirNotFound(PathBuf),

    /// The file name pattern failed to compile.
    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, MigrateError>;
