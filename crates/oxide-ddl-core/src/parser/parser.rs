//! DDL parser implementation.

use super::error::ParseError;
use crate::ast::{
    AlterColumnChange, AlterTable, AlterTableAction, AlterTableClause, AlterType,
    AlterTypeAction, ColumnConstraint, ColumnConstraintKind, ColumnSpec, CreateTable, CreateType,
    DropObjects, ForeignKeyTarget, LabelPosition, Statement, TableConstraint,
    TableConstraintKind, TableElement,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};
use crate::schema::ForeignKeyAction;

/// Parses a single DDL statement.
///
/// # Errors
///
/// Returns a `ParseError` if the input is not a supported statement.
pub fn parse(sql: &str) -> Result<Statement, ParseError> {
    Parser::new(sql).parse_statement()
}

/// DDL parser.
///
/// The whole input is tokenized up front; raw fragments (types, default and
/// check expressions, names) are sliced from the source by token span.
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Lexer::new(source).tokenize(),
            pos: 0,
        }
    }

    /// Parses exactly one statement. A single trailing `;` is allowed.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` carrying a snippet of the input remaining at
    /// the failure point.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.parse_complete_statement()
            .map_err(|err| err.with_source(self.source))
    }

    fn parse_complete_statement(&mut self) -> Result<Statement, ParseError> {
        if let Some(token) = self.tokens.iter().find(|t| matches!(t.kind, TokenKind::Error(_))) {
            let message = match &token.kind {
                TokenKind::Error(message) => message.clone(),
                _ => String::from("Invalid token"),
            };
            return Err(ParseError::new(message, token.span));
        }

        let statement = match self.current().as_keyword() {
            Some(
                Keyword::Select | Keyword::With | Keyword::Insert | Keyword::Update | Keyword::Delete,
            ) => return Ok(Statement::Ignored),
            Some(Keyword::Create) => self.parse_create()?,
            Some(Keyword::Alter) => self.parse_alter()?,
            Some(Keyword::Drop) => self.parse_drop()?,
            _ => {
                return Err(self.unexpected("CREATE, ALTER, DROP or a query"));
            }
        };

        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current().is_eof() {
            return Err(self.unexpected("end of statement"));
        }
        Ok(statement)
    }

    // --- Statements ---

    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;

        if self.consume_keyword(Keyword::Type) {
            return Ok(Statement::CreateType(self.parse_create_type()?));
        }

        // GLOBAL/LOCAL only make sense before TEMPORARY, but are accepted alone
        if !self.consume_keyword(Keyword::Global) {
            self.consume_keyword(Keyword::Local);
        }
        if !(self.consume_keyword(Keyword::Temporary) || self.consume_keyword(Keyword::Temp)) {
            self.consume_keyword(Keyword::Unlogged);
        }
        self.expect_keyword(Keyword::Table)?;
        Ok(Statement::CreateTable(self.parse_create_table()?))
    }

    fn parse_create_table(&mut self) -> Result<CreateTable, ParseError> {
        let if_not_exists = self.parse_if_not_exists()?;
        let name = self.expect_qualified_name()?;

        self.expect(&TokenKind::LeftParen)?;
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                let element = if self.at_table_constraint() {
                    TableElement::Constraint(self.parse_table_constraint()?)
                } else {
                    TableElement::Column(self.parse_column_spec()?)
                };
                elements.push(element);

                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(CreateTable {
            name,
            if_not_exists,
            elements,
        })
    }

    fn parse_create_type(&mut self) -> Result<CreateType, ParseError> {
        let name = self.expect_qualified_name()?;
        self.expect_keyword(Keyword::As)?;
        self.expect_keyword(Keyword::Enum)?;
        self.expect(&TokenKind::LeftParen)?;

        let mut labels = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                labels.push(self.expect_string()?);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(CreateType { name, labels })
    }

    fn parse_alter(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Alter)?;
        match self.current().as_keyword() {
            Some(Keyword::Table) => {
                self.advance();
                Ok(Statement::AlterTable(self.parse_alter_table()?))
            }
            Some(Keyword::Type) => {
                self.advance();
                Ok(Statement::AlterType(self.parse_alter_type()?))
            }
            _ => Err(self.unexpected("TABLE or TYPE")),
        }
    }

    fn parse_alter_table(&mut self) -> Result<AlterTable, ParseError> {
        let if_exists = self.parse_if_exists()?;
        self.consume_keyword(Keyword::Only);
        let name = self.expect_qualified_name()?;

        let action = if self.consume_keyword(Keyword::Rename) {
            if self.consume_keyword(Keyword::To) {
                AlterTableAction::RenameTable(self.expect_identifier()?)
            } else if self.consume_keyword(Keyword::Constraint) {
                let from = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let to = self.expect_identifier()?;
                AlterTableAction::RenameConstraint { from, to }
            } else {
                self.consume_keyword(Keyword::Column);
                let from = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let to = self.expect_identifier()?;
                AlterTableAction::RenameColumn { from, to }
            }
        } else {
            let mut clauses = vec![self.parse_alter_table_clause()?];
            while self.check(&TokenKind::Comma) {
                self.advance();
                clauses.push(self.parse_alter_table_clause()?);
            }
            AlterTableAction::Clauses(clauses)
        };

        Ok(AlterTable {
            name,
            if_exists,
            action,
        })
    }

    fn parse_alter_table_clause(&mut self) -> Result<AlterTableClause, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Add) => {
                self.advance();
                if self.consume_keyword(Keyword::Column) || !self.at_table_constraint() {
                    let if_not_exists = self.parse_if_not_exists()?;
                    let column = self.parse_column_spec()?;
                    Ok(AlterTableClause::AddColumn {
                        if_not_exists,
                        column,
                    })
                } else {
                    Ok(AlterTableClause::AddConstraint(
                        self.parse_table_constraint()?,
                    ))
                }
            }
            Some(Keyword::Drop) => {
                self.advance();
                let is_constraint = self.consume_keyword(Keyword::Constraint);
                if !is_constraint {
                    self.consume_keyword(Keyword::Column);
                }
                let if_exists = self.parse_if_exists()?;
                let name = self.expect_identifier()?;
                self.parse_drop_behavior();
                if is_constraint {
                    Ok(AlterTableClause::DropConstraint { name, if_exists })
                } else {
                    Ok(AlterTableClause::DropColumn { name, if_exists })
                }
            }
            Some(Keyword::Alter) => {
                self.advance();
                self.consume_keyword(Keyword::Column);
                let column = self.expect_identifier()?;
                let change = self.parse_alter_column_change()?;
                Ok(AlterTableClause::AlterColumn { column, change })
            }
            _ => Err(self.unexpected("ADD, DROP, ALTER or RENAME")),
        }
    }

    fn parse_alter_column_change(&mut self) -> Result<AlterColumnChange, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Set) => {
                self.advance();
                match self.current().as_keyword() {
                    Some(Keyword::Data) => {
                        self.advance();
                        self.expect_keyword(Keyword::Type)?;
                        self.parse_new_column_type()
                    }
                    Some(Keyword::Default) => {
                        self.advance();
                        Ok(AlterColumnChange::SetDefault(self.parse_default_expr()?))
                    }
                    Some(Keyword::Not) => {
                        self.advance();
                        self.expect_keyword(Keyword::Null)?;
                        Ok(AlterColumnChange::SetNotNull)
                    }
                    _ => Err(self.unexpected("DATA TYPE, DEFAULT or NOT NULL")),
                }
            }
            Some(Keyword::Type) => {
                self.advance();
                self.parse_new_column_type()
            }
            Some(Keyword::Drop) => {
                self.advance();
                match self.current().as_keyword() {
                    Some(Keyword::Default) => {
                        self.advance();
                        Ok(AlterColumnChange::DropDefault)
                    }
                    Some(Keyword::Not) => {
                        self.advance();
                        self.expect_keyword(Keyword::Null)?;
                        Ok(AlterColumnChange::DropNotNull)
                    }
                    _ => Err(self.unexpected("DEFAULT or NOT NULL")),
                }
            }
            _ => Err(self.unexpected("SET, TYPE or DROP")),
        }
    }

    /// Parses the type of `ALTER COLUMN ... TYPE t [COLLATE c] [USING expr]`.
    fn parse_new_column_type(&mut self) -> Result<AlterColumnChange, ParseError> {
        let data_type = self.parse_type_text(|kw| matches!(kw, Keyword::Using | Keyword::Collate))?;
        if self.consume_keyword(Keyword::Collate) {
            self.expect_qualified_name()?;
        }
        if self.consume_keyword(Keyword::Using) {
            self.scan_raw(true, |_| false)?;
        }
        Ok(AlterColumnChange::SetDataType(data_type))
    }

    fn parse_alter_type(&mut self) -> Result<AlterType, ParseError> {
        let name = self.expect_qualified_name()?;

        let action = match self.current().as_keyword() {
            Some(Keyword::Add) => {
                self.advance();
                self.expect_keyword(Keyword::Value)?;
                let if_not_exists = self.parse_if_not_exists()?;
                let label = self.expect_string()?;
                let position = if self.consume_keyword(Keyword::Before) {
                    Some(LabelPosition::Before(self.expect_string()?))
                } else if self.consume_keyword(Keyword::After) {
                    Some(LabelPosition::After(self.expect_string()?))
                } else {
                    None
                };
                AlterTypeAction::AddValue {
                    label,
                    if_not_exists,
                    position,
                }
            }
            Some(Keyword::Rename) => {
                self.advance();
                if self.consume_keyword(Keyword::Value) {
                    let from = self.expect_string()?;
                    self.expect_keyword(Keyword::To)?;
                    let to = self.expect_string()?;
                    AlterTypeAction::RenameValue { from, to }
                } else {
                    self.expect_keyword(Keyword::To)?;
                    AlterTypeAction::Rename(self.expect_identifier()?)
                }
            }
            _ => return Err(self.unexpected("ADD VALUE or RENAME")),
        };

        Ok(AlterType { name, action })
    }

    fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Drop)?;
        let is_table = match self.current().as_keyword() {
            Some(Keyword::Table) => true,
            Some(Keyword::Type) => false,
            _ => return Err(self.unexpected("TABLE or TYPE")),
        };
        self.advance();

        let if_exists = self.parse_if_exists()?;
        let mut names = vec![self.expect_qualified_name()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.expect_qualified_name()?);
        }
        let cascade = self.parse_drop_behavior();

        let objects = DropObjects {
            names,
            if_exists,
            cascade,
        };
        Ok(if is_table {
            Statement::DropTable(objects)
        } else {
            Statement::DropType(objects)
        })
    }

    // --- Columns and constraints ---

    fn parse_column_spec(&mut self) -> Result<ColumnSpec, ParseError> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_type_text(Keyword::starts_column_constraint)?;

        let mut constraints = Vec::new();
        while self
            .current()
            .as_keyword()
            .is_some_and(Keyword::starts_column_constraint)
        {
            let constraint_name = if self.consume_keyword(Keyword::Constraint) {
                Some(self.expect_identifier()?)
            } else {
                None
            };

            let kind = match self.current().as_keyword() {
                Some(Keyword::Not) => {
                    self.advance();
                    self.expect_keyword(Keyword::Null)?;
                    ColumnConstraintKind::NotNull
                }
                Some(Keyword::Null) => {
                    self.advance();
                    ColumnConstraintKind::Null
                }
                Some(Keyword::Default) => {
                    self.advance();
                    ColumnConstraintKind::Default(self.parse_default_expr()?)
                }
                Some(Keyword::Check) => {
                    self.advance();
                    ColumnConstraintKind::Check(self.parse_parenthesized_raw()?)
                }
                Some(Keyword::Unique) => {
                    self.advance();
                    self.skip_index_parameters()?;
                    ColumnConstraintKind::Unique
                }
                Some(Keyword::Primary) => {
                    self.advance();
                    self.expect_keyword(Keyword::Key)?;
                    self.skip_index_parameters()?;
                    ColumnConstraintKind::PrimaryKey
                }
                Some(Keyword::References) => {
                    ColumnConstraintKind::References(self.parse_references()?)
                }
                Some(Keyword::Collate) => {
                    self.advance();
                    self.expect_qualified_name()?;
                    continue;
                }
                _ => return Err(self.unexpected("column constraint")),
            };

            constraints.push(ColumnConstraint {
                name: constraint_name,
                kind,
            });
        }

        Ok(ColumnSpec {
            name,
            data_type,
            constraints,
        })
    }

    /// Returns true if the current token opens a table-level constraint.
    fn at_table_constraint(&self) -> bool {
        matches!(
            self.current().as_keyword(),
            Some(
                Keyword::Constraint
                    | Keyword::Primary
                    | Keyword::Unique
                    | Keyword::Foreign
                    | Keyword::Check
            )
        )
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        let name = if self.consume_keyword(Keyword::Constraint) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let kind = match self.current().as_keyword() {
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_name_list()?;
                self.skip_index_parameters()?;
                TableConstraintKind::PrimaryKey(columns)
            }
            Some(Keyword::Unique) => {
                self.advance();
                let columns = self.parse_name_list()?;
                self.skip_index_parameters()?;
                TableConstraintKind::Unique(columns)
            }
            Some(Keyword::Foreign) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                let columns = self.parse_name_list()?;
                let target = self.parse_references()?;
                TableConstraintKind::ForeignKey { columns, target }
            }
            Some(Keyword::Check) => {
                self.advance();
                TableConstraintKind::Check(self.parse_parenthesized_raw()?)
            }
            _ => return Err(self.unexpected("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK")),
        };

        Ok(TableConstraint { name, kind })
    }

    /// Parses `REFERENCES table [(cols)] [MATCH x] [ON DELETE a] [ON UPDATE a]`.
    fn parse_references(&mut self) -> Result<ForeignKeyTarget, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let table = self.expect_qualified_name()?;
        let columns = if self.check(&TokenKind::LeftParen) {
            self.parse_name_list()?
        } else {
            Vec::new()
        };

        let mut target = ForeignKeyTarget {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };

        loop {
            if self.consume_keyword(Keyword::Match) {
                self.expect_identifier()?;
            } else if self.consume_keyword(Keyword::On) {
                if self.consume_keyword(Keyword::Delete) {
                    target.on_delete = Some(self.parse_referential_action()?);
                } else if self.consume_keyword(Keyword::Update) {
                    target.on_update = Some(self.parse_referential_action()?);
                } else {
                    return Err(self.unexpected("DELETE or UPDATE"));
                }
            } else {
                break;
            }
        }

        Ok(target)
    }

    fn parse_referential_action(&mut self) -> Result<ForeignKeyAction, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::No) => {
                self.advance();
                self.expect_keyword(Keyword::Action)?;
                Ok(ForeignKeyAction::NoAction)
            }
            Some(Keyword::Restrict) => {
                self.advance();
                Ok(ForeignKeyAction::Restrict)
            }
            Some(Keyword::Cascade) => {
                self.advance();
                Ok(ForeignKeyAction::Cascade)
            }
            Some(Keyword::Set) => {
                self.advance();
                if self.consume_keyword(Keyword::Null) {
                    Ok(ForeignKeyAction::SetNull)
                } else if self.consume_keyword(Keyword::Default) {
                    Ok(ForeignKeyAction::SetDefault)
                } else {
                    Err(self.unexpected("NULL or DEFAULT"))
                }
            }
            _ => Err(self.unexpected("NO ACTION, RESTRICT, CASCADE, SET NULL or SET DEFAULT")),
        }
    }

    /// Skips `WITH (storage_parameter = value, ...)` after UNIQUE or PRIMARY KEY.
    fn skip_index_parameters(&mut self) -> Result<(), ParseError> {
        if self.check_keyword(Keyword::With) && self.peek(1).kind == TokenKind::LeftParen {
            self.advance();
            self.parse_parenthesized_raw()?;
        }
        Ok(())
    }

    // --- Raw fragments ---

    /// Parses type text up to a top-level `,`, `)`, `;`, the end of input, or
    /// a keyword accepted by `stop`. Whitespace runs are collapsed.
    fn parse_type_text(&mut self, stop: impl Fn(Keyword) -> bool) -> Result<String, ParseError> {
        let span = self.scan_raw(false, |token| token.as_keyword().is_some_and(&stop))?;
        match span {
            Some(span) => Ok(span.text(self.source).split_whitespace().collect::<Vec<_>>().join(" ")),
            None => Err(self.unexpected("data type")),
        }
    }

    /// Parses a DEFAULT expression. The first token always belongs to the
    /// expression, so `DEFAULT NULL` works.
    fn parse_default_expr(&mut self) -> Result<String, ParseError> {
        match self.scan_raw(true, |token| {
            token
                .as_keyword()
                .is_some_and(Keyword::starts_column_constraint)
        })? {
            Some(span) => Ok(span.text(self.source).to_string()),
            None => Err(self.unexpected("default expression")),
        }
    }

    /// Parses `( ... )` and returns the raw text between the parentheses.
    fn parse_parenthesized_raw(&mut self) -> Result<String, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let span = self.scan_raw(false, |_| false)?;
        self.expect(&TokenKind::RightParen)?;
        match span {
            Some(span) => Ok(span.text(self.source).to_string()),
            None => Err(ParseError::new(
                "Empty parenthesized expression",
                self.previous_span(),
            )),
        }
    }

    /// Consumes tokens of a raw fragment and returns the span they cover.
    ///
    /// Brackets are tracked so nested `()`, `[]` and `{}` groups are taken
    /// whole, and so are `CASE ... END` blocks. At depth zero the scan stops
    /// before `,`, `;`, the end of input, an unmatched closing bracket, or
    /// any token accepted by `stop`. With `take_first`, the first token is
    /// taken even if `stop` accepts it.
    fn scan_raw(
        &mut self,
        take_first: bool,
        stop: impl Fn(&Token) -> bool,
    ) -> Result<Option<Span>, ParseError> {
        let mut depth = 0usize;
        let mut cases = 0usize;
        let mut first: Option<Span> = None;
        let mut last: Option<Span> = None;

        loop {
            let token = self.current();
            let is_first = first.is_none();
            match token.kind {
                TokenKind::Eof if depth > 0 => {
                    return Err(ParseError::unexpected_eof(
                        "closing bracket",
                        token.span,
                    ));
                }
                TokenKind::Eof if cases > 0 => {
                    return Err(ParseError::unexpected_eof("END", token.span));
                }
                TokenKind::Eof => break,
                TokenKind::Identifier(ref word) if word.eq_ignore_ascii_case("case") => {
                    cases += 1;
                }
                TokenKind::Identifier(ref word) if cases > 0 && word.eq_ignore_ascii_case("end") => {
                    cases -= 1;
                }
                TokenKind::LeftParen | TokenKind::LeftBracket | TokenKind::LeftBrace => {
                    depth += 1;
                }
                TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenKind::Comma | TokenKind::Semicolon if depth == 0 => break,
                _ if depth == 0 && cases == 0 && !(take_first && is_first) && stop(token) => {
                    break;
                }
                _ => {}
            }

            let span = token.span;
            first.get_or_insert(span);
            last = Some(span);
            self.advance();
        }

        Ok(first.zip(last).map(|(first, last)| first.to(last)))
    }

    // --- Names and literals ---

    /// Parses `( name, name, ... )`.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut names = vec![self.expect_identifier()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.expect_identifier()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(names)
    }

    fn parse_if_exists(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::If) && self.peek(1).as_keyword() == Some(Keyword::Exists) {
            self.advance();
            self.expect_keyword(Keyword::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn parse_if_not_exists(&mut self) -> Result<bool, ParseError> {
        if self.check_keyword(Keyword::If) && self.peek(1).as_keyword() == Some(Keyword::Not) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes an optional `CASCADE` or `RESTRICT`; returns true for CASCADE.
    fn parse_drop_behavior(&mut self) -> bool {
        if self.consume_keyword(Keyword::Cascade) {
            return true;
        }
        self.consume_keyword(Keyword::Restrict);
        false
    }

    /// Expects a single name and returns it as written, quotes included.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if !self.current().is_name() {
            return Err(self.unexpected("identifier"));
        }
        let text = self.current().span.text(self.source).to_string();
        self.advance();
        Ok(text)
    }

    /// Expects a possibly qualified name (`schema.table`) and returns it as
    /// written.
    fn expect_qualified_name(&mut self) -> Result<String, ParseError> {
        if !self.current().is_name() {
            return Err(self.unexpected("name"));
        }
        let start = self.current().span;
        let mut end = start;
        self.advance();
        while self.check(&TokenKind::Dot) && self.peek(1).is_name() {
            self.advance();
            end = self.current().span;
            self.advance();
        }
        Ok(start.to(end).text(self.source).to_string())
    }

    /// Expects a string literal and returns its unescaped value.
    fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("string literal")),
        }
    }

    // --- Helper methods ---

    /// Returns the current token. The token list always ends with EOF.
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the token `offset` positions ahead.
    fn peek(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    fn previous_span(&self) -> Span {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or_else(Span::default, |t| t.span)
    }

    /// Advances to the next token, stopping at EOF.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Consumes the keyword if it is next.
    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(format!("{kind:?}")))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Builds an error for the current token.
    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        if token.is_eof() {
            ParseError::unexpected_eof(expected, token.span)
        } else {
            ParseError::unexpected(expected, token.kind.clone(), token.span)
        }
    }
}
