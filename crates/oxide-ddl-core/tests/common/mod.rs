#![allow(dead_code)]

use oxide_ddl_core::ast::{AlterTable, CreateTable, Statement};
use oxide_ddl_core::{ParseError, SchemaDiff, SchemaError, SchemaState, diff, parse};

pub fn parse_ok(sql: &str) -> Statement {
    parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_create(sql: &str) -> CreateTable {
    match parse_ok(sql) {
        Statement::CreateTable(c) => c,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

pub fn parse_alter(sql: &str) -> AlterTable {
    match parse_ok(sql) {
        Statement::AlterTable(a) => a,
        other => panic!("Expected ALTER TABLE, got {other:?}"),
    }
}

/// Replays `statements` into a fresh state.
pub fn schema(statements: &[&str]) -> SchemaState {
    SchemaState::from_statements(statements)
        .unwrap_or_else(|e| panic!("Failed to replay {statements:?}\nError: {e}"))
}

pub fn apply_err(state: &mut SchemaState, sql: &str) -> SchemaError {
    state
        .apply(sql)
        .expect_err(&format!("Expected schema error for: {sql}"))
}

/// Diffs `from` against `to` and checks that the emitted statements,
/// replayed on a fresh copy of `from`, reproduce `to`.
pub fn migrate(from: &[&str], to: &[&str]) -> SchemaDiff {
    let original = schema(from);
    let desired = schema(to);

    let mut working = original.clone();
    let changes = diff(&mut working, &desired, true)
        .unwrap_or_else(|e| panic!("Diff failed\n  from: {from:?}\n  to: {to:?}\nError: {e}"));
    assert_eq!(working, desired, "diff left `from` different from `to`");

    let mut replayed = original;
    for statement in &changes.statements {
        replayed
            .apply(statement)
            .unwrap_or_else(|e| panic!("Emitted statement does not apply: {statement}\n{e}"));
    }
    assert_eq!(replayed, desired, "replaying {:?} did not reach `to`", changes.statements);
    assert_eq!(changes.names.len(), changes.statements.len());
    changes
}
