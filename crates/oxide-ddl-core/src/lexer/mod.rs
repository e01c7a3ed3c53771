//! DDL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for PostgreSQL DDL that produces
//! a stream of span-carrying tokens. Raw text such as column types, default
//! expressions and check expressions is later sliced from the source by span.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{Lexer, quote_literal, split_statements};
