use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LogicalOperator},
    error::ErrorReporter,
    interpreter::{
        parser::{core::ParseResult, unary::parse_unary, utils::{advance, check, peek}},
        scanner::{Token, TokenKind},
    },
};

/// Parses logical OR expressions.
///
/// Handles left-associative chains of `or`. Lowest binary precedence.
///
/// Grammar: `logic_or := logic_and ("or" logic_and)*`
///
/// # Parameters
/// - `tokens`: Token cursor.
/// - `reporter`: Sink for latched diagnostics.
///
/// # Returns
/// An expression tree with `Expr::Logical` nodes.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>,
                               reporter: &mut ErrorReporter)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_logical_and(tokens, reporter)?;

    while check(tokens, &TokenKind::Or) {
        let line = advance(tokens).line;
        let right = parse_logical_and(tokens, reporter)?;
        expr = Expr::Logical { left: Box::new(expr),
                               op: LogicalOperator::Or,
                               right: Box::new(right),
                               line };
    }

    Ok(expr)
}

/// Parses logical AND expressions.
///
/// Handles left-associative chains of `and`. Binds tighter than `or`, looser
/// than equality.
///
/// Grammar: `logic_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>,
                                reporter: &mut ErrorReporter)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_equality(tokens, reporter)?;

    while check(tokens, &TokenKind::And) {
        let line = advance(tokens).line;
        let right = parse_equality(tokens, reporter)?;
        expr = Expr::Logical { left: Box::new(expr),
                               op: LogicalOperator::And,
                               right: Box::new(right),
                               line };
    }

    Ok(expr)
}

/// Parses equality expressions.
///
/// Handles left-associative `==` and `!=`.
///
/// Grammar: `equality := comparison (("!=" | "==") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>,
                             reporter: &mut ErrorReporter)
                             -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_comparison(tokens, reporter)?;

    loop {
        if let Some(op) = binary_operator(&peek(tokens).kind)
           && matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual)
        {
            let line = advance(tokens).line;
            let right = parse_comparison(tokens, reporter)?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }

    Ok(expr)
}

/// Parses comparison expressions.
///
/// Handles left-associative `>`, `>=`, `<` and `<=`.
///
/// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>,
                               reporter: &mut ErrorReporter)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_term(tokens, reporter)?;

    loop {
        if let Some(op) = binary_operator(&peek(tokens).kind)
           && matches!(op,
                       BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual
                       | BinaryOperator::Less
                       | BinaryOperator::LessEqual)
        {
            let line = advance(tokens).line;
            let right = parse_term(tokens, reporter)?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }

    Ok(expr)
}

/// Parses addition and subtraction expressions.
///
/// Grammar: `term := factor (("-" | "+") factor)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>,
                         reporter: &mut ErrorReporter)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_factor(tokens, reporter)?;

    loop {
        if let Some(op) = binary_operator(&peek(tokens).kind)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            let line = advance(tokens).line;
            let right = parse_factor(tokens, reporter)?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }

    Ok(expr)
}

/// Parses multiplication and division expressions.
///
/// Grammar: `factor := unary (("/" | "*") unary)*`
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>,
                           reporter: &mut ErrorReporter)
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut expr = parse_unary(tokens, reporter)?;

    loop {
        if let Some(op) = binary_operator(&peek(tokens).kind)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            let line = advance(tokens).line;
            let right = parse_unary(tokens, reporter)?;
            expr = Expr::Binary { left: Box::new(expr),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }

    Ok(expr)
}

/// Maps a token kind to its corresponding binary operator.
///
/// Returns `None` for tokens that are not binary operators. The logical
/// keywords map to [`Expr::Logical`] nodes elsewhere and are not included.
///
/// # Example
/// ```
/// use loxide::{ast::BinaryOperator,
///              interpreter::{parser::binary::binary_operator, scanner::TokenKind}};
///
/// assert_eq!(binary_operator(&TokenKind::Plus), Some(BinaryOperator::Add));
/// assert_eq!(binary_operator(&TokenKind::Semicolon), None);
/// ```
#[must_use]
pub const fn binary_operator(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}
