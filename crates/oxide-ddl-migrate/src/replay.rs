//! Rebuilding schema states from SQL on disk.

use std::fs;
use std::path::Path;

use oxide_ddl_core::migrations::{Operation, create_table_sql};
use oxide_ddl_core::{SchemaState, split_statements};
use tracing::debug;

use crate::error::{MigrateError, Result};
use crate::file::MigrationFile;

/// Applies `statements` in order, attributing failures to `file`.
///
/// # Errors
///
/// Returns [`MigrateError::Schema`] for the first statement that fails.
pub fn apply_statements<S: AsRef<str>>(
    state: &mut SchemaState,
    file: &Path,
    statements: &[S],
) -> Result<()> {
    for statement in statements {
        let statement = statement.as_ref();
        state
            .apply(statement)
            .map_err(|source| MigrateError::Schema {
                file: file.to_path_buf(),
                statement: statement.to_string(),
                source,
            })?;
    }
    Ok(())
}

/// Replays the up sections of `migrations` onto an empty state.
///
/// # Errors
///
/// Returns the first statement failure, tagged with its file.
pub fn replay(migrations: &[MigrationFile]) -> Result<SchemaState> {
    let mut state = SchemaState::new();
    for migration in migrations {
        debug!(
            file = %migration.path.display(),
            statements = migration.up.len(),
            "replaying migration"
        );
        apply_statements(&mut state, &migration.path, &migration.up)?;
    }
    Ok(state)
}

/// Reads a plain SQL script and replays it onto an empty state.
///
/// # Errors
///
/// Fails if the file cannot be read or a statement does not apply.
pub fn load_schema_file(path: &Path) -> Result<SchemaState> {
    let content = fs::read_to_string(path)?;
    let statements = split_statements(&content);
    debug!(file = %path.display(), statements = statements.len(), "loading schema file");

    let mut state = SchemaState::new();
    apply_statements(&mut state, path, &statements)?;
    Ok(state)
}

/// Renders `state` as the DDL that would recreate it, types first.
#[must_use]
pub fn dump(state: &SchemaState) -> Vec<String> {
    state
        .types
        .values()
        .map(|enum_type| Operation::CreateType(enum_type.clone()).to_sql())
        .chain(state.tables.values().map(create_table_sql))
        .collect()
}
