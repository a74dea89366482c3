//! Forward-only view over a token sequence with one token of lookahead.

use ember_source::SyntaxError;
use log::trace;

use crate::lexer::{Token, TokenKind};

pub type ParseResult<T> = Result<T, SyntaxError>;

pub struct TokenCursor {
    tokens: Vec<Token>,
    /// Index of the current (not yet consumed) token.
    current: usize,
}

impl TokenCursor {
    /// Creates a cursor over `tokens`. A trailing [`TokenKind::Eof`] is appended if missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::eof(line));
        }
        Self { tokens, current: 0 }
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Consumes and returns the current token.
    /// At end of input the `Eof` token is returned and the position does not move.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !self.is_at_end() {
            trace!("consumed {:?} on line {}", token.kind, token.line);
            self.current += 1;
        }
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token only if it is of `kind`.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is of `kind`, otherwise fails with `message`.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind, message))
        }
    }

    /// Builds an unexpected token error for the current token, naming what was `expected` instead.
    pub fn unexpected(&self, expected: impl ToString, message: &str) -> SyntaxError {
        let token = self.peek();
        SyntaxError::unexpected(message, expected.to_string(), token, token.line)
    }

    /// Looks at the first token from the current position on that is not of `kind`.
    /// Nothing is consumed.
    pub fn peek_past(&self, kind: TokenKind) -> &Token {
        self.tokens[self.current..]
            .iter()
            .find(|token| token.kind != kind)
            .unwrap_or_else(|| self.peek())
    }

    pub fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Line of the current token.
    pub fn line(&self) -> usize {
        self.peek().line
    }
}
