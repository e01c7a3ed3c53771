#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

/// A scratch project with a migrations directory and a schema file.
pub struct Project {
    pub root: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.root.path().join("migrations")
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.path().join("schema.sql")
    }

    pub fn write_schema(&self, sql: &str) -> PathBuf {
        let path = self.schema_path();
        fs::write(&path, sql).expect("Failed to write schema");
        path
    }

    pub fn write_migration(&self, file_name: &str, content: &str) -> PathBuf {
        fs::create_dir_all(self.migrations_dir()).expect("Failed to create migrations dir");
        let path = self.migrations_dir().join(file_name);
        fs::write(&path, content).expect("Failed to write migration");
        path
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Fixed generation timestamps, one second apart.
pub fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
}
