use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::{ErrorReporter, ParseError},
    interpreter::{
        parser::{
            core::{ParseResult, parse_expression},
            utils::{advance, check, expect, match_kind, peek},
        },
        scanner::{Token, TokenKind},
    },
};

/// The argument and parameter count past which a diagnostic is reported.
pub const MAX_CALL_ARGUMENTS: usize = 255;

/// Parses a unary expression.
///
/// Grammar: `unary := ("!" | "-") unary | call`
///
/// Unary operators nest, so `!!x` and `--x` parse as repeated applications.
///
/// # Parameters
/// - `tokens`: Token cursor.
/// - `reporter`: Sink for latched diagnostics.
///
/// # Returns
/// The parsed expression node.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>,
                          reporter: &mut ErrorReporter)
                          -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let op = match peek(tokens).kind {
        TokenKind::Bang => Some(UnaryOperator::Not),
        TokenKind::Minus => Some(UnaryOperator::Negate),
        _ => None,
    };

    if let Some(op) = op {
        let line = advance(tokens).line;
        let expr = parse_unary(tokens, reporter)?;
        return Ok(Expr::Unary { op,
                                expr: Box::new(expr),
                                line });
    }

    parse_call(tokens, reporter)
}

/// Parses a call chain.
///
/// Grammar: `call := primary ("(" arguments? ")")*`
///
/// Each `(` found after a primary begins another invocation, so `f(1)(2)`
/// calls the result of `f(1)`.
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                         reporter: &mut ErrorReporter)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_primary(tokens, reporter)?;

    while match_kind(tokens, &TokenKind::LeftParen) {
        expr = finish_call(tokens, reporter, expr)?;
    }

    Ok(expr)
}

/// Parses the argument list and closing parenthesis of one invocation.
///
/// Grammar: `arguments := expression ("," expression)*`
///
/// Lists longer than [`MAX_CALL_ARGUMENTS`] report a diagnostic at the first
/// excess argument but the call is still accepted.
///
/// # Errors
/// - Malformed argument expressions.
/// - A missing `)` after the arguments.
fn finish_call<'a, I>(tokens: &mut Peekable<I>,
                      reporter: &mut ErrorReporter,
                      callee: Expr)
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut arguments = Vec::new();

    if !check(tokens, &TokenKind::RightParen) {
        loop {
            if arguments.len() >= MAX_CALL_ARGUMENTS {
                reporter.parse_error(&ParseError::TooManyArguments { token: peek(tokens).clone() });
            }
            arguments.push(parse_expression(tokens, reporter)?);
            if !match_kind(tokens, &TokenKind::Comma) {
                break;
            }
        }
    }

    let paren = expect(tokens, &TokenKind::RightParen, "Expect ')' after arguments.")?;

    Ok(Expr::Call { callee: Box::new(callee),
                    arguments,
                    line: paren.line })
}

/// Parses a primary expression.
///
/// Grammar: `primary := "true" | "false" | "nil" | NUMBER | STRING |
/// "(" expression ")" | IDENTIFIER`
///
/// # Errors
/// - [`ParseError::ExpectedExpression`] when the cursor holds nothing that can
///   begin an expression (this is where stray keywords like `class` surface).
/// - A missing `)` after a parenthesized expression.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>,
                            reporter: &mut ErrorReporter)
                            -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let token = peek(tokens);
    match &token.kind {
        TokenKind::False => {
            let line = advance(tokens).line;
            Ok(Expr::Literal { value: LiteralValue::Bool(false),
                               line })
        },
        TokenKind::True => {
            let line = advance(tokens).line;
            Ok(Expr::Literal { value: LiteralValue::Bool(true),
                               line })
        },
        TokenKind::Nil => {
            let line = advance(tokens).line;
            Ok(Expr::Literal { value: LiteralValue::Nil,
                               line })
        },
        TokenKind::Number(value) => {
            let value = *value;
            let line = advance(tokens).line;
            Ok(Expr::Literal { value: LiteralValue::Number(value),
                               line })
        },
        TokenKind::Str(text) => {
            let text = text.clone();
            let line = advance(tokens).line;
            Ok(Expr::Literal { value: LiteralValue::Text(text),
                               line })
        },
        TokenKind::Identifier => {
            let token = advance(tokens);
            Ok(Expr::Variable { name: token.lexeme.clone(),
                                line: token.line })
        },
        TokenKind::LeftParen => {
            let line = advance(tokens).line;
            let expr = parse_expression(tokens, reporter)?;
            expect(tokens, &TokenKind::RightParen, "Expect ')' after expression.")?;
            Ok(Expr::Grouping { expr: Box::new(expr),
                                line })
        },
        _ => Err(ParseError::ExpectedExpression { token: token.clone() }),
    }
}
