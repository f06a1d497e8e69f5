use std::iter::Peekable;

use crate::{
    ast::Stmt,
    error::ErrorReporter,
    interpreter::{
        parser::{
            core::ParseResult,
            statement::parse_declaration,
            utils::{at_end, check, expect},
        },
        scanner::{Token, TokenKind},
    },
};

/// Parses the statements of a brace-delimited block.
///
/// Grammar: `block := "{" declaration* "}"`
///
/// The opening brace has already been consumed by the caller; this function
/// parses declarations until the closing brace and consumes it. Errors inside
/// the block propagate out to the statement boundary, where recovery happens.
///
/// # Parameters
/// - `tokens`: Token cursor positioned after the `{`.
/// - `reporter`: Sink for latched diagnostics.
///
/// # Returns
/// The statements of the block, without a wrapping node.
///
/// # Errors
/// - Any error from the contained declarations.
/// - A missing `}` at end of input.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                          reporter: &mut ErrorReporter)
                          -> ParseResult<Vec<Stmt>>
    where I: Iterator<Item = &'a Token>
{
    let mut statements = Vec::new();

    while !check(tokens, &TokenKind::RightBrace) && !at_end(tokens) {
        statements.push(parse_declaration(tokens, reporter)?);
    }

    expect(tokens, &TokenKind::RightBrace, "Expect '}' after block.")?;
    Ok(statements)
}
