//! # oxide-ddl-core
//!
//! A PostgreSQL DDL interpreter and schema diff engine.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for the DDL subset
//!   migrations are written in (`CREATE/ALTER/DROP TABLE`,
//!   `CREATE/ALTER/DROP TYPE ... AS ENUM`)
//! - A [`SchemaState`] model that replays those statements in memory
//! - A diff engine producing the ordered statements that migrate one
//!   state into another, with rename detection
//! - Typestate builders describing a desired schema in code
//!
//! ## Replaying DDL
//!
//! ```rust
//! use oxide_ddl_core::SchemaState;
//!
//! let mut schema = SchemaState::new();
//! schema.apply("CREATE TABLE users (id SERIAL PRIMARY KEY, email TEXT NOT NULL)").unwrap();
//! schema.apply("ALTER TABLE users ADD COLUMN name TEXT").unwrap();
//!
//! let users = schema.table("users").unwrap();
//! assert_eq!(users.columns.len(), 3);
//! assert_eq!(users.indexes[0].name, "users_pkey");
//! ```
//!
//! ## Diffing
//!
//! ```rust
//! use oxide_ddl_core::{SchemaState, diff};
//!
//! let mut from = SchemaState::from_statements(["CREATE TABLE test (id INTEGER)"]).unwrap();
//! let to = SchemaState::from_statements(["CREATE TABLE account (id INTEGER)"]).unwrap();
//!
//! let changes = diff(&mut from, &to, true).unwrap();
//! assert_eq!(changes.statements, vec!["ALTER TABLE test RENAME TO account"]);
//! assert_eq!(changes.names, vec!["rename-test-to-account"]);
//! assert_eq!(from, to);
//! ```

pub mod ast;
pub mod error;
mod interpreter;
pub mod lexer;
pub mod migrations;
pub mod parser;
pub mod schema;

pub use ast::Statement;
pub use error::{Result, SchemaError};
pub use lexer::{Lexer, Span, Token, TokenKind, split_statements};
pub use migrations::{Operation, SchemaDiff, diff};
pub use parser::{ParseError, Parser, parse};
pub use schema::{ColumnDef, EnumTypeDef, IndexDef, IndexKind, SchemaState, TableDef};
