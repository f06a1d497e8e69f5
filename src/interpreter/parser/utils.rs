use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        parser::core::ParseResult,
        scanner::{Token, TokenKind},
    },
};

/// Returns the token under the cursor without consuming it.
///
/// The scanner guarantees an `Eof` sentinel at the end of every token
/// sequence and no parsing rule consumes it, so the stream can never run dry
/// while a parse is in progress.
pub fn peek<'a, I>(tokens: &mut Peekable<I>) -> &'a Token
    where I: Iterator<Item = &'a Token>
{
    tokens.peek()
          .copied()
          .expect("token stream ends with an Eof sentinel")
}

/// Consumes and returns the token under the cursor.
///
/// Callers check the cursor first (via [`peek`], [`check`] or [`match_kind`]);
/// the `Eof` sentinel itself is never consumed.
pub fn advance<'a, I>(tokens: &mut Peekable<I>) -> &'a Token
    where I: Iterator<Item = &'a Token>
{
    tokens.next().expect("token stream ends with an Eof sentinel")
}

/// Tests whether the token under the cursor has the given kind.
pub fn check<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    peek(tokens).kind == *kind
}

/// Consumes the token under the cursor when it has the given kind.
///
/// # Returns
/// `true` when a token was consumed.
pub fn match_kind<'a, I>(tokens: &mut Peekable<I>, kind: &TokenKind) -> bool
    where I: Iterator<Item = &'a Token>
{
    if check(tokens, kind) {
        tokens.next();
        return true;
    }
    false
}

/// Consumes a token of the given kind or fails with the given message.
///
/// # Errors
/// Returns [`ParseError::ExpectedToken`] carrying the offending token when the
/// cursor holds anything else.
pub fn expect<'a, I>(tokens: &mut Peekable<I>,
                     kind: &TokenKind,
                     message: &'static str)
                     -> ParseResult<&'a Token>
    where I: Iterator<Item = &'a Token>
{
    if check(tokens, kind) {
        return Ok(advance(tokens));
    }
    Err(ParseError::ExpectedToken { message,
                                    token: peek(tokens).clone() })
}

/// Tests whether the cursor has reached the `Eof` sentinel.
pub fn at_end<'a, I>(tokens: &mut Peekable<I>) -> bool
    where I: Iterator<Item = &'a Token>
{
    peek(tokens).kind == TokenKind::Eof
}

/// Discards tokens until a statement boundary.
///
/// After a parse error the cursor may sit anywhere inside a broken statement.
/// Recovery consumes the offending token, then skips ahead until it has moved
/// past a `;` or stands before a keyword that begins a statement. Parsing
/// resumes there, so one broken statement yields one diagnostic.
pub fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a Token>
{
    while !at_end(tokens) {
        if advance(tokens).kind == TokenKind::Semicolon {
            return;
        }
        match peek(tokens).kind {
            TokenKind::Class
            | TokenKind::Fun
            | TokenKind::Var
            | TokenKind::For
            | TokenKind::If
            | TokenKind::While
            | TokenKind::Print
            | TokenKind::Return => return,
            _ => {},
        }
    }
}
