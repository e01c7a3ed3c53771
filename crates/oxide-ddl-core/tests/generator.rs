//! Tests for describing a schema in code and migrating towards it.

mod common;
use common::*;

use oxide_ddl_core::migrations::{
    CreateTableBuilder, SchemaDefinition, bigint, boolean, enumeration, jsonb, numeric, serial,
    text, timestamptz, uuid, varchar,
};
use oxide_ddl_core::schema::{ForeignKeyAction, ForeignKeyRef};
use oxide_ddl_core::{SchemaState, diff};

fn shop() -> SchemaDefinition {
    SchemaDefinition::new()
        .table(
            CreateTableBuilder::new()
                .name("customers")
                .column(uuid("id").primary_key().default_expr("gen_random_uuid()").build())
                .column(varchar("email", 320).not_null().unique().build())
                .column(boolean("active").not_null().default_bool(true).build())
                .column(jsonb("preferences").build())
                .build(),
        )
        .table(
            CreateTableBuilder::new()
                .name("orders")
                .column(serial("id").primary_key().build())
                .column(
                    uuid("customer_id")
                        .not_null()
                        .references_on_delete("customers", "id", ForeignKeyAction::Restrict)
                        .build(),
                )
                .column(
                    enumeration("status", "order_status", &["new", "paid", "shipped"])
                        .not_null()
                        .default_str("new")
                        .build(),
                )
                .column(numeric("total", 12, 2).not_null().check("total >= 0").build())
                .column(timestamptz("placed_at").not_null().default_expr("now()").build())
                .build(),
        )
        .table(
            CreateTableBuilder::new()
                .name("order_lines")
                .column(bigint("order_id").not_null().build())
                .column(bigint("line_no").not_null().build())
                .column(text("sku").not_null().build())
                .primary_key(&["order_id", "line_no"])
                .foreign_key(
                    &["order_id"],
                    ForeignKeyRef {
                        on_delete: Some(ForeignKeyAction::Cascade),
                        ..ForeignKeyRef::new("orders")
                    },
                )
                .check_constraint("line_no > 0")
                .build(),
        )
}

#[test]
fn generated_statements_replay() {
    let statements = shop().to_statements();
    assert_eq!(statements.len(), 4);
    assert_eq!(
        statements[1],
        "CREATE TYPE order_status AS ENUM ('new', 'paid', 'shipped')"
    );
    assert!(
        statements[2]
            .contains("  status order_status NOT NULL DEFAULT 'new',\n  total NUMERIC(12, 2) NOT NULL CHECK (total >= 0),")
    );

    let state = shop().build().unwrap();
    let lines = &state.tables["order_lines"];
    let names: Vec<_> = lines.indexes.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "order_lines_order_id_line_no_pkey",
            "order_lines_order_id_fkey",
            "order_lines_check"
        ]
    );
}

#[test]
fn generated_schema_is_up_to_date_with_itself() {
    let desired = shop().build().unwrap();
    let mut current = desired.clone();
    assert!(diff(&mut current, &desired, true).unwrap().is_empty());
}

#[test]
fn generated_schema_from_scratch() {
    let desired = shop().build().unwrap();
    let mut current = SchemaState::new();
    let changes = diff(&mut current, &desired, true).unwrap();
    assert_eq!(current, desired);
    assert_eq!(
        changes.names,
        vec![
            "create-customers",
            "create-orders",
            "create-order_lines",
            "create-order_status"
        ]
    );
}

#[test]
fn generated_schema_against_replayed_history() {
    let history = [
        "CREATE TABLE customers (id UUID PRIMARY KEY DEFAULT gen_random_uuid(), email VARCHAR(320) NOT NULL UNIQUE, active BOOLEAN NOT NULL DEFAULT TRUE, preferences JSONB)",
        "CREATE TYPE order_status AS ENUM ('new', 'paid')",
    ];
    let desired = shop().build().unwrap();

    let mut current = schema(&history);
    let changes = diff(&mut current, &desired, true).unwrap();
    assert_eq!(current, desired);
    assert_eq!(
        changes.names,
        vec!["create-orders", "create-order_lines", "add-shipped-to-order_status"]
    );
    assert_eq!(
        changes.statements[2],
        "ALTER TYPE order_status ADD VALUE 'shipped' AFTER 'paid'"
    );
}

#[test]
fn generated_literals_with_backslashes_replay() {
    let definition = SchemaDefinition::new().table(
        CreateTableBuilder::new()
            .name("paths")
            .column(text("root").not_null().default_str(r"C:\").build())
            .column(enumeration("sep", "separator", &[r"\", "/"]).build())
            .build(),
    );
    let statements = definition.to_statements();
    assert_eq!(statements[0], r"CREATE TYPE separator AS ENUM ('\\', '/')");
    assert!(statements[1].contains(r"root TEXT NOT NULL DEFAULT 'C:\\'"));

    let state = definition.build().unwrap();
    assert_eq!(state.types["separator"].labels, vec![r"\", "/"]);
    assert_eq!(
        state.tables["paths"].columns["root"].modifiers.default.as_deref(),
        Some(r"'C:\\'")
    );
}
