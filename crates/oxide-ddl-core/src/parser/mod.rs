//! DDL Parser
//!
//! A hand-written recursive descent parser for the CREATE/ALTER/DROP TABLE
//! and CREATE/ALTER/DROP TYPE statements PostgreSQL migrations are made of.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::{Parser, parse};
