//! Reference lexer producing the [`Token`] sequence consumed by the parser.

use std::fmt;

use ember_source::{Source, SyntaxError, SyntaxErrorKind};
use logos::Logos;

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""[^"]*""#)]
    String,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // unary operators
    #[token("!")]
    Bang,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("??")]
    QuestionQuestion,
    // - assignment
    #[token("=")]
    Equal,
    // - equality
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    // - ordering
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token(",")]
    Comma,
    /// Statements are terminated by line breaks.
    #[token("\n")]
    Eol,

    // keywords
    #[token("fn")]
    Fn,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("end")]
    End,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // misc
    #[regex(r"[ \t\r\f]+", logos::skip)]
    #[regex(r"#[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated after the last source token.
    Eof,
}

impl TokenKind {
    /// Returns `true` for the keywords a statement can start with.
    /// These are the resumption points used after a syntax error.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::If
                | TokenKind::For
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::While
                | TokenKind::Do
        )
    }
}

/// Describes the kind as it is named in diagnostics, e.g. `'('` or `identifier`.
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Nil => "'nil'",
            TokenKind::Identifier => "identifier",
            TokenKind::Bang => "'!'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::StarStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::QuestionQuestion => "'??'",
            TokenKind::Equal => "'='",
            TokenKind::EqualEqual => "'=='",
            TokenKind::BangEqual => "'!='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::Less => "'<'",
            TokenKind::LessEqual => "'<='",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Eol => "end of line",
            TokenKind::Fn => "'fn'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::While => "'while'",
            TokenKind::Do => "'do'",
            TokenKind::End => "'end'",
            TokenKind::Print => "'print'",
            TokenKind::Return => "'return'",
            TokenKind::And => "'and'",
            TokenKind::Or => "'or'",
            TokenKind::Error => "unrecognized input",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// Literal payload carried by number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    /// String contents without the surrounding quotes.
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    /// The source text of the token.
    pub lexeme: String,
    /// 1-based line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            value: None,
            lexeme: lexeme.into(),
            line,
        }
    }

    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::Eof, "", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eol => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "`{}`", self.lexeme),
        }
    }
}

/// Converts the content of `source` into tokens, always ending with [`TokenKind::Eof`].
/// Unrecognized input is reported to `source.errors` and skipped.
pub fn tokenize(source: &Source) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source.content);
    let mut tokens = Vec::new();
    let mut line = 1;

    while let Some(kind) = lexer.next() {
        let slice = lexer.slice();
        match kind {
            TokenKind::Error => source.errors.add_error(SyntaxError::new(
                SyntaxErrorKind::UnrecognizedCharacter {
                    text: slice.to_string(),
                },
                line,
            )),
            TokenKind::Number => match slice.parse() {
                Ok(number) => tokens
                    .push(Token::new(kind, slice, line).with_value(TokenValue::Number(number))),
                Err(_) => source.errors.add_error(SyntaxError::new(
                    SyntaxErrorKind::UnrecognizedCharacter {
                        text: slice.to_string(),
                    },
                    line,
                )),
            },
            TokenKind::String => {
                let contents = slice[1..slice.len() - 1].to_string();
                tokens.push(Token::new(kind, slice, line).with_value(TokenValue::String(contents)));
            }
            _ => tokens.push(Token::new(kind, slice, line)),
        }
        line += slice.matches('\n').count();
    }

    tokens.push(Token::eof(line));
    tokens
}
