//! Token types for the DDL lexer.

use super::Span;

/// Keywords the DDL parser dispatches on.
///
/// Words are only recognized as keywords when they form a whole word, so
/// `notes` never matches `NOT`. Any keyword may still be used as a name
/// (`type`, `key`, `value` are common column names).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Statements that cannot change structure
    Select,
    With,
    Insert,
    Update,
    Delete,

    // Statement heads
    Create,
    Alter,
    Drop,
    Table,
    Type,

    // CREATE TABLE prefixes
    Global,
    Local,
    Temporary,
    Temp,
    Unlogged,

    // Constraints
    Constraint,
    Primary,
    Key,
    Foreign,
    Unique,
    Check,
    References,
    Default,
    Null,
    Not,
    Match,
    On,
    No,
    Action,
    Cascade,
    Restrict,
    Collate,

    // ALTER clauses
    Add,
    Column,
    Rename,
    To,
    Set,
    Data,
    Using,
    Only,

    // Enum types
    As,
    Enum,
    Value,
    Before,
    After,

    // Misc
    If,
    Exists,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "WITH" => Some(Self::With),
            "INSERT" => Some(Self::Insert),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            "CREATE" => Some(Self::Create),
            "ALTER" => Some(Self::Alter),
            "DROP" => Some(Self::Drop),
            "TABLE" => Some(Self::Table),
            "TYPE" => Some(Self::Type),
            "GLOBAL" => Some(Self::Global),
            "LOCAL" => Some(Self::Local),
            "TEMPORARY" => Some(Self::Temporary),
            "TEMP" => Some(Self::Temp),
            "UNLOGGED" => Some(Self::Unlogged),
            "CONSTRAINT" => Some(Self::Constraint),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "FOREIGN" => Some(Self::Foreign),
            "UNIQUE" => Some(Self::Unique),
            "CHECK" => Some(Self::Check),
            "REFERENCES" => Some(Self::References),
            "DEFAULT" => Some(Self::Default),
            "NULL" => Some(Self::Null),
            "NOT" => Some(Self::Not),
            "MATCH" => Some(Self::Match),
            "ON" => Some(Self::On),
            "NO" => Some(Self::No),
            "ACTION" => Some(Self::Action),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "COLLATE" => Some(Self::Collate),
            "ADD" => Some(Self::Add),
            "COLUMN" => Some(Self::Column),
            "RENAME" => Some(Self::Rename),
            "TO" => Some(Self::To),
            "SET" => Some(Self::Set),
            "DATA" => Some(Self::Data),
            "USING" => Some(Self::Using),
            "ONLY" => Some(Self::Only),
            "AS" => Some(Self::As),
            "ENUM" => Some(Self::Enum),
            "VALUE" => Some(Self::Value),
            "BEFORE" => Some(Self::Before),
            "AFTER" => Some(Self::After),
            "IF" => Some(Self::If),
            "EXISTS" => Some(Self::Exists),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::With => "WITH",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Create => "CREATE",
            Self::Alter => "ALTER",
            Self::Drop => "DROP",
            Self::Table => "TABLE",
            Self::Type => "TYPE",
            Self::Global => "GLOBAL",
            Self::Local => "LOCAL",
            Self::Temporary => "TEMPORARY",
            Self::Temp => "TEMP",
            Self::Unlogged => "UNLOGGED",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::References => "REFERENCES",
            Self::Default => "DEFAULT",
            Self::Null => "NULL",
            Self::Not => "NOT",
            Self::Match => "MATCH",
            Self::On => "ON",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Collate => "COLLATE",
            Self::Add => "ADD",
            Self::Column => "COLUMN",
            Self::Rename => "RENAME",
            Self::To => "TO",
            Self::Set => "SET",
            Self::Data => "DATA",
            Self::Using => "USING",
            Self::Only => "ONLY",
            Self::As => "AS",
            Self::Enum => "ENUM",
            Self::Value => "VALUE",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::If => "IF",
            Self::Exists => "EXISTS",
        }
    }

    /// Returns true if this keyword opens a column constraint, which ends
    /// the raw type text of a column definition.
    #[must_use]
    pub const fn starts_column_constraint(self) -> bool {
        matches!(
            self,
            Self::Constraint
                | Self::Not
                | Self::Null
                | Self::Default
                | Self::Check
                | Self::Unique
                | Self::Primary
                | Self::References
                | Self::Collate
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal, kept as written (e.g., 42, 3.14, 1e10)
    Number,
    /// String literal with quotes removed and escapes resolved
    String(String),

    // Identifiers and keywords
    /// Bare identifier (e.g., column_name)
    Identifier(String),
    /// Quoted identifier, without its quotes (e.g., "User" or `User`)
    QuotedIdentifier(String),
    /// DDL keyword
    Keyword(Keyword),

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,

    /// A run of operator characters (e.g., >=, <>, ||, ~*)
    Operator,
    /// Any other single character (e.g., $)
    Other(char),

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token can stand for a name: identifiers, quoted
    /// identifiers, and keywords used as names.
    #[must_use]
    pub const fn is_name(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) | TokenKind::Keyword(_)
        )
    }
}
