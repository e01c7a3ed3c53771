//! Computing the up and down halves of a new migration.

use oxide_ddl_core::{SchemaDiff, SchemaState, diff};
use tracing::debug;

use crate::error::Result;

/// The statements of a migration that has not been written yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedMigration {
    /// Statements moving the current state to the desired one, with slugs.
    pub up: SchemaDiff,
    /// Statements moving back. Names are not collected.
    pub down: SchemaDiff,
}

impl GeneratedMigration {
    /// True when the current state already matches the desired one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }
}

/// Diffs `current` against `desired` in both directions.
///
/// Neither input is modified.
///
/// # Errors
///
/// Propagates failures from the diff engine.
pub fn generate(current: &SchemaState, desired: &SchemaState) -> Result<GeneratedMigration> {
    let up = diff(&mut current.clone(), desired, true)?;
    let down = diff(&mut desired.clone(), current, false)?;
    debug!(up = up.len(), down = down.len(), "generated migration");
    Ok(GeneratedMigration { up, down })
}
