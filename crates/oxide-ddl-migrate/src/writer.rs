//! Writing generated migrations to the migrations directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{MigrateError, Result};
use crate::file::render_sections;
use crate::generate::GeneratedMigration;

/// Number of statement slugs used in a file name.
const NAME_SLUGS: usize = 3;

/// Longest slug kept before `_and-more`, in bytes. Keeps file names well
/// under the usual 255 byte limit.
const MAX_SLUG_LEN: usize = 200;

/// Builds the file name `<YYYYMMDDHHMMSS>_<slug>_<slug>_<slug>[_and-more].sql`.
///
/// Slugs longer than 200 bytes are cut on a character
/// boundary and marked with `_and-more`.
#[must_use]
pub fn migration_file_name(timestamp: DateTime<Utc>, names: &[String]) -> String {
    let mut slug = names
        .iter()
        .take(NAME_SLUGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("_");
    let mut more = names.len() > NAME_SLUGS;
    if slug.len() > MAX_SLUG_LEN {
        let mut end = MAX_SLUG_LEN;
        while !slug.is_char_boundary(end) {
            end -= 1;
        }
        slug.truncate(end);
        let kept = slug.trim_end_matches(['_', '-']).len();
        slug.truncate(kept);
        more = true;
    }
    if more {
        slug.push_str("_and-more");
    }
    if slug.is_empty() {
        slug.push_str("empty");
    }
    format!("{}_{slug}.sql", timestamp.format("%Y%m%d%H%M%S"))
}

/// Writes migration files into one directory.
#[derive(Debug, Clone)]
pub struct MigrationWriter {
    dir: PathBuf,
}

impl MigrationWriter {
    /// Creates a writer for `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the path and content `migration` would be written with.
    #[must_use]
    pub fn prepare(
        &self,
        migration: &GeneratedMigration,
        timestamp: DateTime<Utc>,
    ) -> (PathBuf, String) {
        let path = self
            .dir
            .join(migration_file_name(timestamp, &migration.up.names));
        let content = render_sections(&migration.up.statements, &migration.down.statements);
        (path, content)
    }

    /// Writes `migration`, creating the directory if needed.
    ///
    /// Returns `None` without touching the disk when the migration is empty.
    ///
    /// # Errors
    ///
    /// Returns [`MigrateError::MigrationExists`] rather than overwrite a
    /// file, or an IO error.
    pub fn write(
        &self,
        migration: &GeneratedMigration,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<PathBuf>> {
        if migration.is_empty() {
            info!("Schema is up to date, no migration written.");
            return Ok(None);
        }

        let (path, content) = self.prepare(migration, timestamp);
        fs::create_dir_all(&self.dir)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(MigrateError::MigrationExists(path));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(content.as_bytes())?;

        info!("Created migration: {}", path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use oxide_ddl_core::SchemaState;

    use crate::file::MigrationFile;
    use crate::generate::generate;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn migration() -> GeneratedMigration {
        let current = SchemaState::new();
        let desired = SchemaState::from_statements(["CREATE TABLE account (id INTEGER)"]).unwrap();
        generate(&current, &desired).unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(
            migration_file_name(at(), &names(&["create-account"])),
            "20240309140507_create-account.sql"
        );
        assert_eq!(
            migration_file_name(at(), &names(&["a", "b", "c"])),
            "20240309140507_a_b_c.sql"
        );
        assert_eq!(
            migration_file_name(at(), &names(&["a", "b", "c", "d"])),
            "20240309140507_a_b_c_and-more.sql"
        );
    }

    #[test]
    fn test_long_names_are_cut() {
        let long = format!("create-{}", "é".repeat(150));
        let name = migration_file_name(at(), &names(&[long.as_str(); 3]));
        assert!(name.len() <= 255, "{} bytes", name.len());
        assert!(name.starts_with("20240309140507_create-é"));
        assert!(name.ends_with("_and-more.sql"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&name);
        fs::write(&path, "-- migrate:up\n").unwrap();
        assert!(MigrationFile::load(&path).is_ok());
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MigrationWriter::new(dir.path().join("migrations"));

        let path = writer.write(&migration(), at()).unwrap().unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("20240309140507_create-account.sql")
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "-- migrate:up\nCREATE TABLE account (\n  id INTEGER\n);\n\n-- migrate:down\nDROP TABLE account;\n"
        );

        let loaded = MigrationFile::load(&path).unwrap();
        assert_eq!(loaded.up, vec!["CREATE TABLE account (\n  id INTEGER\n)"]);
        assert_eq!(loaded.down, vec!["DROP TABLE account"]);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MigrationWriter::new(dir.path());
        writer.write(&migration(), at()).unwrap();
        assert!(matches!(
            writer.write(&migration(), at()),
            Err(MigrateError::MigrationExists(_))
        ));
    }

    #[test]
    fn test_empty_migration_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MigrationWriter::new(dir.path().join("migrations"));
        assert_eq!(writer.write(&GeneratedMigration::default(), at()).unwrap(), None);
        assert!(!writer.dir().exists());
    }
}
