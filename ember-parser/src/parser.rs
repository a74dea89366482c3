use crate::ast::{BinaryOp, Expr, LiteralValue, LogicalOp, Program, Stmt, UnaryOp};
use crate::cursor::{ParseResult, TokenCursor};
use crate::lexer::{tokenize, Token, TokenKind, TokenValue};
use ember_source::{ErrorReporter, Source, SyntaxError, SyntaxErrorKind};
use log::{debug, info};
use std::mem;

mod expr;
mod stmt;

/// Parser settings.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Stop parsing once this many errors have been reported. `None` recovers and keeps going.
    /// Errors the lexer already reported to the same [`ErrorReporter`] count toward the limit.
    pub error_limit: Option<usize>,
}

pub struct Parser<'a> {
    cursor: TokenCursor,
    /// Accumulated errors are reported here.
    errors: &'a ErrorReporter,
    config: ParserConfig,
    /// Set while parsing the clauses of a `for` loop, where `and` separates clauses.
    in_for_clauses: bool,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source` and creates a parser reporting to `source.errors`.
    pub fn new(source: &'a Source<'a>) -> Self {
        Self::from_tokens(tokenize(source), &source.errors)
    }

    /// Creates a parser over tokens produced elsewhere.
    pub fn from_tokens(tokens: Vec<Token>, errors: &'a ErrorReporter) -> Self {
        info!("parser created with {} tokens", tokens.len());
        Self {
            cursor: TokenCursor::new(tokens),
            errors,
            config: ParserConfig::default(),
            in_for_clauses: false,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }
}

impl<'a> Parser<'a> {
    /// Parses declarations until end of input.
    /// A malformed top level declaration is reported and left out of the returned [`Program`]
    /// as a whole, nested statements included.
    pub fn parse_program(&mut self) -> Program {
        info!("beginning parse");
        let mut stmts = Vec::new();

        loop {
            self.skip_newlines();
            if self.cursor.is_at_end() || self.error_limit_reached() {
                break;
            }
            match self.parse_declaration() {
                Ok(stmt) => stmts.push(stmt),
                Err(error) => self.recover(error),
            }
        }

        info!(
            "parsed {} top level statements with {} errors",
            stmts.len(),
            self.errors.len()
        );
        Program { stmts }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Skips any number of blank lines.
    fn skip_newlines(&mut self) {
        while self.cursor.matches(TokenKind::Eol) {}
    }

    fn error_limit_reached(&self) -> bool {
        match self.config.error_limit {
            Some(limit) => self.errors.len() >= limit,
            None => false,
        }
    }

    /// Reports `error` and skips to the next statement boundary.
    fn recover(&mut self, error: SyntaxError) {
        debug!("syntax error on line {}: {}", error.line, error.kind);
        self.errors.add_error(error);
        self.synchronize();
    }

    /// Discards tokens until just after an end of line or just before a statement keyword.
    fn synchronize(&mut self) {
        while !self.cursor.is_at_end() {
            if self.cursor.matches(TokenKind::Eol) {
                break;
            }
            if self.cursor.peek().kind.starts_statement() {
                break;
            }
            self.cursor.advance();
        }
        debug!("synchronized at line {}", self.cursor.line());
    }

    /// Discards the rest of the block being parsed, up to and including its `end`.
    /// Nested `do ... end` pairs are skipped as a unit.
    fn skip_to_block_end(&mut self) {
        let mut depth = 1;
        while !self.cursor.is_at_end() {
            match self.cursor.advance().kind {
                TokenKind::Do => depth += 1,
                TokenKind::End => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        debug!("skipped to end of block at line {}", self.cursor.line());
    }

    /// Parses an identifier and returns its name.
    fn expect_ident(&mut self, message: &str) -> ParseResult<String> {
        Ok(self.cursor.expect(TokenKind::Identifier, message)?.lexeme)
    }

    /// Runs `f` with `and` treated as a `for` clause separator (or not).
    fn with_for_clauses<T>(
        &mut self,
        in_for_clauses: bool,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let prev = mem::replace(&mut self.in_for_clauses, in_for_clauses);
        let result = f(self);
        self.in_for_clauses = prev;
        result
    }
}
