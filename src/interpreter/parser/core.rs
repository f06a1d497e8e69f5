use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::{ErrorReporter, ParseError},
    interpreter::{
        parser::{
            binary::parse_logical_or,
            utils::{advance, check},
        },
        scanner::{Token, TokenKind},
    },
};

/// Result type used by every parsing function.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token cursor.
/// - `reporter`: Sink for diagnostics that do not abort the parse.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>,
                               reporter: &mut ErrorReporter)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    parse_assignment(tokens, reporter)
}

/// Parses an assignment or anything of higher precedence.
///
/// Grammar: `assignment := IDENTIFIER "=" assignment | logic_or`
///
/// The left side is parsed first as an ordinary expression; only after seeing
/// `=` is it required to be a plain variable. Any other shape reports
/// `Invalid assignment target.` at the `=` token and the left side is
/// returned unmodified, so parsing continues.
///
/// # Errors
/// Propagates errors from sub-expression parsing. The invalid-target case is
/// latched through `reporter`, not returned.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>,
                               reporter: &mut ErrorReporter)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_logical_or(tokens, reporter)?;

    if check(tokens, &TokenKind::Equal) {
        let equals = advance(tokens).clone();
        let value = parse_assignment(tokens, reporter)?;

        return match expr {
            Expr::Variable { name, line } => Ok(Expr::Assign { name,
                                                               value: Box::new(value),
                                                               line }),
            other => {
                reporter.parse_error(&ParseError::InvalidAssignmentTarget { token: equals });
                Ok(other)
            },
        };
    }

    Ok(expr)
}
