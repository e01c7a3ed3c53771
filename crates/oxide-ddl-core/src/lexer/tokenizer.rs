//! DDL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// Characters that combine into a single operator token.
const OPERATOR_CHARS: &str = "+-*/<>=~!@#%^&|?";

/// A lexer that tokenizes DDL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns true if a comment starts at the current position.
    fn at_comment(&self) -> bool {
        matches!(
            (self.peek(), self.peek_next()),
            (Some('-'), Some('-')) | (Some('/'), Some('*'))
        )
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // Single-line comments (-- ...)
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // Multi-line comments (/* ... */)
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a quoted identifier (e.g., "column name" or `column name`).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        value.push(quote);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some(c) => value.push(c),
                None => {
                    return self.make_token(TokenKind::Error(String::from(
                        "Unterminated quoted identifier",
                    )));
                }
            }
        }

        self.make_token(TokenKind::QuotedIdentifier(value))
    }

    /// Scans a number, keeping its text in the source.
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E')
            && self
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans a single-quoted string literal.
    ///
    /// Both the SQL form (`''`) and the backslash form (`\'`) escape a quote.
    fn scan_string(&mut self) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('\'') => {
                    if self.peek() == Some('\'') {
                        value.push('\'');
                        self.advance();
                    } else {
                        break;
                    }
                }
                Some('\\') => match self.advance() {
                    Some(c @ ('\'' | '\\')) => value.push(c),
                    Some(c) => {
                        value.push('\\');
                        value.push(c);
                    }
                    None => return self.unterminated_string(),
                },
                Some(c) => value.push(c),
                None => return self.unterminated_string(),
            }
        }

        self.make_token(TokenKind::String(value))
    }

    fn unterminated_string(&self) -> Token {
        self.make_token(TokenKind::Error(String::from(
            "Unterminated string literal",
        )))
    }

    /// Scans a run of operator characters, stopping before a comment.
    fn scan_operator(&mut self) -> Token {
        while self.peek().is_some_and(|c| OPERATOR_CHARS.contains(c)) && !self.at_comment() {
            self.advance();
        }
        self.make_token(TokenKind::Operator)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ',' | ';' | '.' => {
                self.advance();
                let kind = match c {
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    _ => TokenKind::Dot,
                };
                self.make_token(kind)
            }
            ':' => {
                self.advance();
                if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '\'' => self.scan_string(),
            '"' | '`' => self.scan_quoted_identifier(c),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(),
            c if OPERATOR_CHARS.contains(c) => self.scan_operator(),
            c => {
                self.advance();
                self.make_token(TokenKind::Other(c))
            }
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

/// Renders `value` as a string literal the lexer reads back unchanged.
///
/// Quotes are doubled and backslashes escaped.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Splits a script into its statements on top-level semicolons.
///
/// Semicolons inside string literals, quoted identifiers and comments do not
/// split. Each returned slice starts at the statement's first token and ends
/// at its last one, so leading comments and the separator itself are
/// dropped. Statements made only of comments are skipped.
#[must_use]
pub fn split_statements(input: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut current: Option<Span> = None;

    for token in Lexer::new(input).tokenize() {
        match token.kind {
            TokenKind::Semicolon | TokenKind::Eof => {
                if let Some(span) = current.take() {
                    statements.push(span.text(input));
                }
            }
            _ => {
                current = Some(match current {
                    Some(span) => span.to(token.span),
                    None => token.span,
                });
            }
        }
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("CREATE -- comment\n/* block */ TABLE"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("create TABLE TyPe"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Keyword(Keyword::Type),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        assert_eq!(
            token_kinds("notes nullable"),
            vec![
                TokenKind::Identifier(String::from("notes")),
                TokenKind::Identifier(String::from("nullable")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("\"User Name\" `other` \"say \"\"hi\"\"\""),
            vec![
                TokenKind::QuotedIdentifier(String::from("User Name")),
                TokenKind::QuotedIdentifier(String::from("other")),
                TokenKind::QuotedIdentifier(String::from("say \"hi\"")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_with_escapes() {
        assert_eq!(
            token_kinds(r"'it''s' 'it\'s' 'a\\b'"),
            vec![
                TokenKind::String(String::from("it's")),
                TokenKind::String(String::from("it's")),
                TokenKind::String(String::from("a\\b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("'abc");
        assert!(matches!(&tokens[0].kind, TokenKind::Error(msg) if msg.contains("Unterminated")));
    }

    #[test]
    fn test_unterminated_string_after_backslash() {
        let tokens = tokenize(r"'abc\");
        assert!(matches!(&tokens[0].kind, TokenKind::Error(_)));
    }

    #[test]
    fn test_numbers_keep_their_text() {
        let input = "42 3.14 1e10";
        let tokens = tokenize(input);
        let texts: Vec<&str> = tokens[..3].iter().map(|t| t.span.text(input)).collect();
        assert_eq!(texts, vec!["42", "3.14", "1e10"]);
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("( ) [ ] { } , ; . : ::"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operator_runs() {
        let input = "a >= b <> c ~* d";
        let tokens = tokenize(input);
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.span.text(input))
            .collect();
        assert_eq!(ops, vec![">=", "<>", "~*"]);
    }

    #[test]
    fn test_operator_stops_before_comment() {
        assert_eq!(
            token_kinds("a =-- trailing\n b"),
            vec![
                TokenKind::Identifier(String::from("a")),
                TokenKind::Operator,
                TokenKind::Identifier(String::from("b")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("DROP users");
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 10));
    }

    #[test]
    fn test_split_statements() {
        let script = "CREATE TABLE a (id INTEGER);\n-- note\nDROP TABLE b;  ";
        assert_eq!(
            split_statements(script),
            vec!["CREATE TABLE a (id INTEGER)", "DROP TABLE b"]
        );
    }

    #[test]
    fn test_split_statements_ignores_quoted_semicolons() {
        let script = "ALTER TABLE a ALTER COLUMN b SET DEFAULT ';'; DROP TABLE \"x;y\"";
        assert_eq!(
            split_statements(script),
            vec![
                "ALTER TABLE a ALTER COLUMN b SET DEFAULT ';'",
                "DROP TABLE \"x;y\""
            ]
        );
    }

    #[test]
    fn test_quote_literal_reads_back() {
        for value in ["plain", "it's", r"C:\", r"x\\y", r"\'", "", "''"] {
            let quoted = quote_literal(value);
            assert_eq!(
                token_kinds(&quoted),
                vec![TokenKind::String(value.to_string()), TokenKind::Eof],
                "{quoted}"
            );
        }
        assert_eq!(quote_literal(r"a\b'c"), r"'a\\b''c'");
    }

    #[test]
    fn test_split_statements_skips_comment_only_chunks() {
        assert!(split_statements("-- nothing here\n;;").is_empty());
    }
}
