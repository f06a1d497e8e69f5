use std::fmt;

use crate::interpreter::scanner::{Token, TokenKind};

/// Represents all errors that can occur during scanning or parsing.
///
/// Scanner errors carry only a line number; parser errors carry the offending
/// token so the rendered diagnostic can point at its lexeme (or at end of
/// input).
#[derive(Debug, Clone)]
pub enum ParseError {
    /// The scanner hit a character outside the language's alphabet.
    UnexpectedCharacter {
        /// The character encountered.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal ran to end of input without a closing quote.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The parser needed an expression and found something else.
    ExpectedExpression {
        /// The token that was found instead.
        token: Token,
    },
    /// A specific token was required but not found.
    ExpectedToken {
        /// The full diagnostic message, e.g. `Expect ';' after value.`
        message: &'static str,
        /// The token that was found instead.
        token:   Token,
    },
    /// A function declaration listed more than 255 parameters.
    TooManyParameters {
        /// The token at which the limit was crossed.
        token: Token,
    },
    /// A call expression listed more than 255 arguments.
    TooManyArguments {
        /// The token at which the limit was crossed.
        token: Token,
    },
    /// The left side of an `=` was not a plain variable.
    InvalidAssignmentTarget {
        /// The `=` token.
        token: Token,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "[line {line}] Error: Unexpected character: {character}")
            },
            Self::UnterminatedString { line } => {
                write!(f, "[line {line}] Error: Unterminated string.")
            },
            Self::ExpectedExpression { token } => write_at_token(f, token, "Expect expression."),
            Self::ExpectedToken { message, token } => write_at_token(f, token, message),
            Self::TooManyParameters { token } => {
                write_at_token(f, token, "Can't have more than 255 parameters.")
            },
            Self::TooManyArguments { token } => {
                write_at_token(f, token, "Can't have more than 255 arguments.")
            },
            Self::InvalidAssignmentTarget { token } => {
                write_at_token(f, token, "Invalid assignment target.")
            },
        }
    }
}

/// Renders the `[line N] Error at ...: message` shape shared by every parser
/// diagnostic. End of input reads ` at end` instead of quoting a lexeme.
fn write_at_token(f: &mut fmt::Formatter<'_>, token: &Token, message: &str) -> fmt::Result {
    if token.kind == TokenKind::Eof {
        write!(f, "[line {}] Error at end: {message}", token.line)
    } else {
        write!(f, "[line {}] Error at '{}': {message}", token.line, token.lexeme)
    }
}

impl std::error::Error for ParseError {}
