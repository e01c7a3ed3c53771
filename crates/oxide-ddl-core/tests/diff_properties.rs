//! Integration tests for the schema diff engine.
//!
//! Every case goes through `common::migrate`, which also checks that the
//! emitted statements replay from `from` to exactly `to`.

mod common;
use common::*;

use oxide_ddl_core::{SchemaState, diff};

const V1: &[&str] = &[
    "CREATE TYPE role AS ENUM ('member', 'admin')",
    "CREATE TABLE users (id SERIAL PRIMARY KEY, email TEXT NOT NULL UNIQUE, role role NOT NULL DEFAULT 'member')",
    "CREATE TABLE posts (id SERIAL PRIMARY KEY, author INT REFERENCES users (id), title TEXT NOT NULL, body TEXT)",
    "CREATE TABLE legacy_audit (id INT, payload JSONB)",
];

const V2: &[&str] = &[
    "CREATE TYPE role AS ENUM ('guest', 'member', 'moderator', 'admin')",
    "CREATE TYPE visibility AS ENUM ('public', 'private')",
    "CREATE TABLE accounts (id SERIAL PRIMARY KEY, email TEXT NOT NULL UNIQUE, role role NOT NULL DEFAULT 'guest')",
    "CREATE TABLE posts (id SERIAL PRIMARY KEY, author_id INT REFERENCES accounts (id) ON DELETE CASCADE, title VARCHAR(200) NOT NULL, body TEXT NOT NULL DEFAULT '', visibility visibility, CHECK (length(title) > 0))",
];

#[test]
fn identical_schemas_are_up_to_date() {
    for statements in [V1, V2] {
        let mut from = schema(statements);
        let to = from.clone();
        assert!(diff(&mut from, &to, true).unwrap().is_empty());
    }
    let mut empty = SchemaState::new();
    assert!(diff(&mut empty, &SchemaState::new(), true).unwrap().is_empty());
}

#[test]
fn create_from_nothing() {
    let changes = migrate(&[], &["CREATE TABLE account (id INTEGER)"]);
    assert_eq!(changes.statements, vec!["CREATE TABLE account (\n  id INTEGER\n)"]);
    assert_eq!(changes.names, vec!["create-account"]);
}

#[test]
fn structurally_equal_table_is_renamed() {
    let changes = migrate(
        &["CREATE TABLE test (id INTEGER)"],
        &["CREATE TABLE account (id INTEGER)"],
    );
    assert_eq!(changes.statements, vec!["ALTER TABLE test RENAME TO account"]);
}

#[test]
fn renamed_table_gets_its_constraints_renamed() {
    let changes = migrate(
        &["CREATE TABLE test (id INTEGER PRIMARY KEY)"],
        &["CREATE TABLE account (id INTEGER PRIMARY KEY)"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TABLE test RENAME TO account",
            "ALTER TABLE account DROP CONSTRAINT test_pkey",
            "ALTER TABLE account ADD CONSTRAINT account_pkey PRIMARY KEY (id)",
        ]
    );
}

#[test]
fn enum_labels_are_inserted_in_place() {
    let changes = migrate(
        &["CREATE TYPE t AS ENUM ('a', 'b', 'c')"],
        &["CREATE TYPE t AS ENUM ('d', 'a', 'e', 'b', 'c', 'f')"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TYPE t ADD VALUE 'd' BEFORE 'a'",
            "ALTER TYPE t ADD VALUE 'e' AFTER 'a'",
            "ALTER TYPE t ADD VALUE 'f' AFTER 'c'",
        ]
    );
    assert_eq!(
        changes.names,
        vec!["add-d-to-t", "add-e-to-t", "add-f-to-t"]
    );
}

#[test]
fn enum_labels_with_backslashes_replay() {
    let changes = migrate(&[], &[r"CREATE TYPE path AS ENUM ('C:\\', 'it''s')"]);
    assert_eq!(
        changes.statements,
        vec![r"CREATE TYPE path AS ENUM ('C:\\', 'it''s')"]
    );

    let changes = migrate(
        &[r"CREATE TYPE path AS ENUM ('C:\\')"],
        &[r"CREATE TYPE path AS ENUM ('\\', 'C:\\', 'x\\y')"],
    );
    assert_eq!(
        changes.statements,
        vec![
            r"ALTER TYPE path ADD VALUE '\\' BEFORE 'C:\\'",
            r"ALTER TYPE path ADD VALUE 'x\\y' AFTER 'C:\\'",
        ]
    );
}

#[test]
fn repeated_inline_checks_replay() {
    let changes = migrate(&[], &["CREATE TABLE t (a INT CHECK (a > 0) CHECK (a < 10))"]);
    assert_eq!(
        changes.statements,
        vec!["CREATE TABLE t (\n  a INT CHECK (a > 0) CONSTRAINT t_a_check1 CHECK (a < 10)\n)"]
    );

    migrate(
        &["CREATE TABLE t (a INT CHECK (a > 0))"],
        &["CREATE TABLE t (a INT CHECK (a > 0) CHECK (a < 10))"],
    );
}

#[test]
fn not_null_and_default_change_separately() {
    let changes = migrate(
        &["CREATE TABLE t (a TEXT)"],
        &["CREATE TABLE t (a TEXT NOT NULL DEFAULT 'x')"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TABLE t ALTER COLUMN a SET NOT NULL",
            "ALTER TABLE t ALTER COLUMN a SET DEFAULT 'x'",
        ]
    );
    assert_eq!(changes.names, vec!["alter-a-in-t", "alter-a-in-t"]);
}

#[test]
fn drop_table_comes_after_table_work_and_before_types() {
    let changes = migrate(V1, V2);
    let position = |prefix: &str| {
        changes
            .statements
            .iter()
            .position(|s| s.starts_with(prefix))
            .unwrap_or_else(|| panic!("no statement starting with {prefix}: {:?}", changes.statements))
    };

    let drop_table = position("DROP TABLE legacy_audit");
    assert!(position("ALTER TABLE posts") < drop_table);
    assert!(drop_table < position("CREATE TYPE visibility"));
    assert!(drop_table < position("ALTER TYPE role"));
}

#[test]
fn evolved_schema_round_trips_both_ways() {
    let up = migrate(V1, V2);
    assert!(up.statements.len() > 5);
    assert!(up.statements.contains(&"ALTER TABLE users RENAME TO accounts".to_string()));
    assert!(
        up.statements
            .contains(&"ALTER TABLE posts RENAME COLUMN author TO author_id".to_string())
    );

    // Label removal is not expressible, so going back keeps the new labels.
    let mut back = schema(V2);
    let down = diff(&mut back, &schema(V1), false).unwrap();
    assert!(down.names.is_empty());
    assert!(back.tables.contains_key("users"));
    assert!(back.tables.contains_key("legacy_audit"));
    assert!(!back.types.contains_key("visibility"));
    assert_eq!(back.tables, schema(V1).tables);
}

#[test]
fn ambiguous_column_rename_adds_and_drops() {
    let changes = migrate(
        &["CREATE TABLE t (a INT, b INT)"],
        &["CREATE TABLE t (c INT)"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TABLE t ADD COLUMN c INT",
            "ALTER TABLE t DROP COLUMN a",
            "ALTER TABLE t DROP COLUMN b",
        ]
    );
}

#[test]
fn renamed_column_with_new_default_text() {
    let changes = migrate(
        &["CREATE TABLE t (a INT DEFAULT 1)"],
        &["CREATE TABLE t (b INT DEFAULT 2)"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TABLE t RENAME COLUMN a TO b",
            "ALTER TABLE t ALTER COLUMN b SET DEFAULT 2",
        ]
    );
}

#[test]
fn constraint_changes() {
    let changes = migrate(
        &["CREATE TABLE t (a INT, b INT, c INT CHECK (c > 0), UNIQUE (a, b))"],
        &["CREATE TABLE t (a INT PRIMARY KEY, b INT, c INT CHECK (c >= 0), CONSTRAINT ab UNIQUE (a, b))"],
    );
    assert_eq!(
        changes.statements,
        vec![
            "ALTER TABLE t DROP CONSTRAINT t_c_check",
            "ALTER TABLE t DROP CONSTRAINT t_a_b_key",
            "ALTER TABLE t ADD CONSTRAINT t_pkey PRIMARY KEY (a)",
            "ALTER TABLE t ADD CONSTRAINT t_c_check CHECK (c >= 0)",
            "ALTER TABLE t ADD CONSTRAINT ab UNIQUE (a, b)",
        ]
    );
    assert_eq!(
        changes.names[2..],
        [
            "add-primary-key-to-a-in-t",
            "add-check-in-t",
            "add-unique-to-a-b-in-t"
        ]
    );
}

#[test]
fn quoted_identifiers_survive() {
    let changes = migrate(
        &[],
        &["CREATE TABLE \"Order Items\" (\"Qty\" INT NOT NULL CHECK (\"Qty\" > 0), note TEXT DEFAULT 'it''s')"],
    );
    assert_eq!(changes.names, vec!["create-order-items"]);
}
