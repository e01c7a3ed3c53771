//! End-to-end tests for the generate / replay cycle on a real directory.

mod common;
use common::*;

use oxide_ddl_core::SchemaState;
use oxide_ddl_migrate::prelude::*;
use oxide_ddl_migrate::replay::apply_statements;

const SCHEMA_V1: &str = r"
CREATE TYPE status AS ENUM ('active', 'banned');

CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    status status NOT NULL DEFAULT 'active'
);
";

const SCHEMA_V2: &str = r"
CREATE TYPE status AS ENUM ('pending', 'active', 'banned');

CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    status status NOT NULL DEFAULT 'pending',
    display_name VARCHAR(80)
);

CREATE TABLE sessions (
    token UUID PRIMARY KEY,
    user_id INT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
    expires_at TIMESTAMPTZ NOT NULL
);
";

fn generate_into(project: &Project, schema: &str, second: u32) -> Option<std::path::PathBuf> {
    let desired = load_schema_file(&project.write_schema(schema)).unwrap();
    let current = match discover_migrations(&project.migrations_dir()) {
        Ok(migrations) => replay(&migrations).unwrap(),
        Err(MigrateError::MigrationsDirNotFound(_)) => SchemaState::new(),
        Err(e) => panic!("{e}"),
    };
    let migration = generate(&current, &desired).unwrap();
    MigrationWriter::new(project.migrations_dir())
        .write(&migration, at(second))
        .unwrap()
}

#[test]
fn initial_generation_from_empty_directory() {
    let project = Project::new();
    let path = generate_into(&project, SCHEMA_V1, 0).unwrap();

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("20240501120000_create-users_create-status.sql")
    );
    let content = read(&path);
    assert!(content.starts_with("-- migrate:up\nCREATE TABLE users (\n"));
    assert!(content.contains("-- migrate:down\nDROP TABLE users;\n\nDROP TYPE status;\n"));

    let replayed = replay(&discover_migrations(&project.migrations_dir()).unwrap()).unwrap();
    assert_eq!(replayed, load_schema_file(&project.schema_path()).unwrap());
}

#[test]
fn second_generation_is_incremental_and_third_is_empty() {
    let project = Project::new();
    generate_into(&project, SCHEMA_V1, 0).unwrap();
    let second = generate_into(&project, SCHEMA_V2, 1).unwrap();

    assert_eq!(
        second.file_name().and_then(|n| n.to_str()),
        Some("20240501120001_alter-status-in-users_add-display_name-to-users_create-sessions_and-more.sql")
    );
    let up = MigrationFile::load(&second).unwrap().up;
    assert!(up.contains(&"ALTER TYPE status ADD VALUE 'pending' BEFORE 'active'".to_string()));
    assert!(!up.iter().any(|s| s.starts_with("CREATE TABLE users")));

    let migrations = discover_migrations(&project.migrations_dir()).unwrap();
    assert_eq!(migrations.len(), 2);
    assert_eq!(
        replay(&migrations).unwrap(),
        load_schema_file(&project.schema_path()).unwrap()
    );

    assert_eq!(generate_into(&project, SCHEMA_V2, 2), None);
    assert_eq!(discover_migrations(&project.migrations_dir()).unwrap().len(), 2);
}

#[test]
fn down_section_reverts_table_changes() {
    let project = Project::new();
    generate_into(&project, SCHEMA_V1, 0).unwrap();
    generate_into(&project, SCHEMA_V2, 1).unwrap();

    let migrations = discover_migrations(&project.migrations_dir()).unwrap();
    let mut state = replay(&migrations).unwrap();
    let last = &migrations[1];
    apply_statements(&mut state, &last.path, &last.down).unwrap();

    let v1 = replay(&migrations[..1]).unwrap();
    assert_eq!(state.tables, v1.tables);
    // Enum labels cannot be removed, so the type keeps 'pending'.
    assert_eq!(state.types["status"].labels, vec!["pending", "active", "banned"]);
}

#[test]
fn hand_written_migrations_are_replayed() {
    let project = Project::new();
    project.write_migration(
        "20230101000000_init.sql",
        "-- written by hand\n-- migrate:up\nCREATE TABLE users (id SERIAL PRIMARY KEY, email TEXT NOT NULL UNIQUE);\n-- migrate:down\nDROP TABLE users;\n",
    );
    project.write_migration(
        "20230102000000_status.sql",
        "-- migrate:up\nCREATE TYPE status AS ENUM ('active', 'banned');\nALTER TABLE users ADD COLUMN status status NOT NULL DEFAULT 'active';\n",
    );
    project.write_migration("README.md", "ignored");

    let path = generate_into(&project, SCHEMA_V1, 0);
    assert_eq!(path, None);
}

#[test]
fn broken_history_names_the_file() {
    let project = Project::new();
    let bad = project.write_migration(
        "20230101000000_bad.sql",
        "-- migrate:up\nALTER TABLE missing ADD COLUMN a INT;\n",
    );
    let migrations = discover_migrations(&project.migrations_dir()).unwrap();
    match replay(&migrations) {
        Err(MigrateError::Schema { file, statement, .. }) => {
            assert_eq!(file, bad);
            assert_eq!(statement, "ALTER TABLE missing ADD COLUMN a INT");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}
