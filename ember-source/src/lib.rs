//! Source code representation and error management.

use std::{cell::RefCell, fmt};

use thiserror::Error;

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// The different kinds of syntax errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxErrorKind {
    /// A specific token was expected but another one was found.
    #[error("{message}")]
    UnexpectedToken {
        message: String,
        /// What the grammar required at this point, e.g. `'('` or `end of line`.
        expected: String,
        found: String,
    },
    /// A `do` block reached end of input before its `end`.
    #[error("unterminated block")]
    UnterminatedBlock,
    /// The left side of `=` is not a bare name.
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    /// No expression can start with the current token.
    #[error("expected expression")]
    MissingExpression,
    /// Raised by the lexer for characters that do not start any token.
    #[error("unrecognized character sequence {text:?}")]
    UnrecognizedCharacter { text: String },
}

/// Represents a syntax error (compile time error).
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// 1-based source line the error was detected on.
    pub line: usize,
}

impl SyntaxError {
    /// Create a new syntax error of the specified `kind` at `line`.
    pub fn new(kind: SyntaxErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Shorthand for a [`SyntaxErrorKind::UnexpectedToken`] error.
    pub fn unexpected(
        message: impl ToString,
        expected: impl ToString,
        found: impl ToString,
        line: usize,
    ) -> Self {
        Self::new(
            SyntaxErrorKind::UnexpectedToken {
                message: message.to_string(),
                expected: expected.to_string(),
                found: found.to_string(),
            },
            line,
        )
    }

    /// The human readable diagnostic message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.kind, self.line)
    }
}

impl std::error::Error for SyntaxError {}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: SyntaxError) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    /// Number of errors reported so far.
    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of every error reported so far, in reporting order.
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.errors.borrow().clone()
    }

    /// The reported errors as `(line, message)` pairs, ordered by line.
    /// Errors on the same line keep their reporting order, so lexer errors come before
    /// parser errors of that line.
    pub fn diagnostics(&self) -> Vec<(usize, String)> {
        let mut diagnostics: Vec<_> = self
            .errors
            .borrow()
            .iter()
            .map(|error| (error.line, error.message()))
            .collect();
        diagnostics.sort_by_key(|(line, _)| *line);
        diagnostics
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(
                f,
                "ERROR: {message} at line {line}",
                message = error.kind,
                line = error.line
            )?;
        }

        Ok(())
    }
}
