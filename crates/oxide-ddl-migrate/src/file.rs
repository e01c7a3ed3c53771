//! Migration files on disk.
//!
//! A migration is a plain SQL file named `<YYYYMMDDHHMMSS>_<name>.sql`
//! holding an up section and an optional down section:
//!
//! ```sql
//! -- migrate:up
//! CREATE TABLE account (
//!   id INTEGER
//! );
//!
//! -- migrate:down
//! DROP TABLE account;
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use oxide_ddl_core::split_statements;
use regex::Regex;
use tracing::debug;

use crate::error::{MigrateError, Result};

/// Pattern every migration file name must match.
pub const FILE_NAME_PATTERN: &str = r"^(\d{14})_(.+)\.sql$";

const UP_MARKER: &str = "-- migrate:up";
const DOWN_MARKER: &str = "-- migrate:down";

/// A parsed migration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// Where the file lives.
    pub path: PathBuf,
    /// The 14 digit timestamp prefix.
    pub version: i64,
    /// Everything between the timestamp and `.sql`.
    pub name: String,
    /// Statements of the up section.
    pub up: Vec<String>,
    /// Statements of the down section.
    pub down: Vec<String>,
}

impl MigrationFile {
    /// Reads and parses a migration file.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, names that do not match
    /// [`FILE_NAME_PATTERN`] and malformed sections.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MigrateError::InvalidFileName(path.display().to_string()))?;
        let (version, name) = parse_file_name(&file_name_pattern()?, file_name)
            .ok_or_else(|| MigrateError::InvalidFileName(file_name.to_string()))?;

        let content = fs::read_to_string(path)?;
        let (up, down) = parse_sections(&content, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            version,
            name,
            up,
            down,
        })
    }

    /// The file name without its directory.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{:014}_{}.sql", self.version, self.name)
    }
}

fn file_name_pattern() -> Result<Regex> {
    Ok(Regex::new(FILE_NAME_PATTERN)?)
}

/// Splits a migration file name into its version and name.
fn parse_file_name(pattern: &Regex, file_name: &str) -> Option<(i64, String)> {
    let captures = pattern.captures(file_name)?;
    let version = captures.get(1)?.as_str().parse().ok()?;
    let name = captures.get(2)?.as_str().to_string();
    Some((version, name))
}

/// Splits file content into up and down statements.
///
/// Text before the first marker is ignored.
///
/// # Errors
///
/// Returns [`MigrateError::MissingUpSection`] when there is no up marker and
/// [`MigrateError::DuplicateSection`] when a marker repeats.
pub fn parse_sections(content: &str, path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    #[derive(Clone, Copy, PartialEq)]
    enum Section {
        Preamble,
        Up,
        Down,
    }

    let mut section = Section::Preamble;
    let mut up: Option<String> = None;
    let mut down: Option<String> = None;

    for line in content.lines() {
        let marker = line.trim().to_ascii_lowercase();
        if marker == UP_MARKER || marker == DOWN_MARKER {
            let (next, slot, name) = if marker == UP_MARKER {
                (Section::Up, &mut up, "up")
            } else {
                (Section::Down, &mut down, "down")
            };
            if slot.is_some() {
                return Err(MigrateError::DuplicateSection {
                    file: path.to_path_buf(),
                    section: name,
                });
            }
            *slot = Some(String::new());
            section = next;
            continue;
        }

        let target = match section {
            Section::Preamble => continue,
            Section::Up => &mut up,
            Section::Down => &mut down,
        };
        if let Some(text) = target {
            text.push_str(line);
            text.push('\n');
        }
    }

    let up = up.ok_or_else(|| MigrateError::MissingUpSection(path.to_path_buf()))?;
    let down = down.unwrap_or_default();
    Ok((statements(&up), statements(&down)))
}

fn statements(section: &str) -> Vec<String> {
    split_statements(section)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Renders up and down statements in the on-disk format.
#[must_use]
pub fn render_sections(up: &[String], down: &[String]) -> String {
    let mut out = String::new();
    out.push_str(UP_MARKER);
    out.push('\n');
    for statement in up {
        out.push_str(statement);
        out.push_str(";\n\n");
    }
    out.push_str(DOWN_MARKER);
    out.push('\n');
    for statement in down {
        out.push_str(statement);
        out.push_str(";\n\n");
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// Finds every migration in `dir`, oldest first.
///
/// Files whose names do not match [`FILE_NAME_PATTERN`] are skipped.
///
/// # Errors
///
/// Returns [`MigrateError::MigrationsDirNotFound`] if `dir` does not exist,
/// or the first error raised while loading a file.
pub fn discover_migrations(dir: &Path) -> Result<Vec<MigrationFile>> {
    if !dir.is_dir() {
        return Err(MigrateError::MigrationsDirNotFound(dir.to_path_buf()));
    }

    let pattern = file_name_pattern()?;
    let mut migrations = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some((version, name)) = parse_file_name(&pattern, file_name) else {
            debug!(file = %path.display(), "skipping non-migration file");
            continue;
        };

        let content = fs::read_to_string(&path)?;
        let (up, down) = parse_sections(&content, &path)?;
        migrations.push(MigrationFile {
            path,
            version,
            name,
            up,
            down,
        });
    }

    migrations.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));
    Ok(migrations)
}
