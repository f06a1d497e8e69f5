use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, FunctionDecl, LiteralValue, Stmt},
    error::{ErrorReporter, ParseError},
    interpreter::{
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::MAX_CALL_ARGUMENTS,
            utils::{advance, at_end, check, expect, match_kind, peek, synchronize},
        },
        scanner::{Token, TokenKind},
    },
};

/// Parses a whole program.
///
/// Grammar: `program := declaration* EOF`
///
/// This is the only place errors are caught: a failed declaration is reported
/// through `reporter`, the cursor synchronizes to the next statement boundary,
/// and parsing resumes. Statements parsed before (and after) a broken one are
/// kept, so a single pass can surface several independent syntax errors.
///
/// # Parameters
/// - `tokens`: Token cursor over an `Eof`-terminated sequence.
/// - `reporter`: Sink for all diagnostics; `had_error` tells the driver
///   whether the program is runnable.
///
/// # Returns
/// The successfully parsed statements, in source order.
///
/// # Example
/// ```
/// use loxide::{error::ErrorReporter,
///              interpreter::{parser::statement::parse_program, scanner::scan}};
///
/// let mut reporter = ErrorReporter::new();
/// let tokens = scan("var x = 1; print x;", &mut reporter);
/// let program = parse_program(&mut tokens.iter().peekable(), &mut reporter);
///
/// assert_eq!(program.len(), 2);
/// assert!(!reporter.had_error());
/// ```
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>, reporter: &mut ErrorReporter) -> Vec<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let mut statements = Vec::new();

    while !at_end(tokens) {
        match parse_declaration(tokens, reporter) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                reporter.parse_error(&error);
                synchronize(tokens);
            },
        }
    }

    statements
}

/// Parses a declaration.
///
/// Grammar: `declaration := funDecl | varDecl | statement`
pub fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                                reporter: &mut ErrorReporter)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    if match_kind(tokens, &TokenKind::Fun) {
        return parse_function(tokens, reporter);
    }
    if match_kind(tokens, &TokenKind::Var) {
        return parse_var_declaration(tokens, reporter);
    }
    parse_statement(tokens, reporter)
}

/// Parses a variable declaration after its `var` keyword.
///
/// Grammar: `varDecl := "var" IDENTIFIER ("=" expression)? ";"`
///
/// Without an initializer the variable binds `nil` at execution.
fn parse_var_declaration<'a, I>(tokens: &mut Peekable<I>,
                                reporter: &mut ErrorReporter)
                                -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let name = expect(tokens, &TokenKind::Identifier, "Expect variable name.")?;
    let (name, line) = (name.lexeme.clone(), name.line);

    let initializer = if match_kind(tokens, &TokenKind::Equal) {
        Some(parse_expression(tokens, reporter)?)
    } else {
        None
    };

    expect(tokens,
           &TokenKind::Semicolon,
           "Expect ';' after variable declaration.")?;
    Ok(Stmt::VarDecl { name,
                       initializer,
                       line })
}

/// Parses a function declaration after its `fun` keyword.
///
/// Grammar: `funDecl := "fun" IDENTIFIER "(" params? ")" block`
///
/// Parameter lists longer than [`MAX_CALL_ARGUMENTS`] report a diagnostic at
/// the first excess parameter but the declaration is still accepted.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         reporter: &mut ErrorReporter)
                         -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let name = expect(tokens, &TokenKind::Identifier, "Expect function name.")?;
    let (name, line) = (name.lexeme.clone(), name.line);

    expect(tokens, &TokenKind::LeftParen, "Expect '(' after function name.")?;
    let mut params = Vec::new();
    if !check(tokens, &TokenKind::RightParen) {
        loop {
            if params.len() >= MAX_CALL_ARGUMENTS {
                let token = peek(tokens).clone();
                reporter.parse_error(&ParseError::TooManyParameters { token });
            }
            let param = expect(tokens, &TokenKind::Identifier, "Expect parameter name.")?;
            params.push(param.lexeme.clone());
            if !match_kind(tokens, &TokenKind::Comma) {
                break;
            }
        }
    }
    expect(tokens, &TokenKind::RightParen, "Expect ')' after parameters.")?;

    expect(tokens, &TokenKind::LeftBrace, "Expect '{' before function body.")?;
    let body = parse_block(tokens, reporter)?;

    Ok(Stmt::Function(Rc::new(FunctionDecl { name,
                                             params,
                                             body,
                                             line })))
}

/// Parses a statement.
///
/// Grammar: `statement := forStmt | ifStmt | printStmt | returnStmt |
/// whileStmt | block | exprStmt`
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              reporter: &mut ErrorReporter)
                              -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    match peek(tokens).kind {
        TokenKind::For => {
            let line = advance(tokens).line;
            parse_for(tokens, reporter, line)
        },
        TokenKind::If => {
            let line = advance(tokens).line;
            parse_if(tokens, reporter, line)
        },
        TokenKind::Print => {
            let line = advance(tokens).line;
            parse_print(tokens, reporter, line)
        },
        TokenKind::Return => {
            let line = advance(tokens).line;
            parse_return(tokens, reporter, line)
        },
        TokenKind::While => {
            let line = advance(tokens).line;
            parse_while(tokens, reporter, line)
        },
        TokenKind::LeftBrace => {
            let line = advance(tokens).line;
            Ok(Stmt::Block { statements: parse_block(tokens, reporter)?,
                             line })
        },
        _ => parse_expression_statement(tokens, reporter),
    }
}

/// Parses an `if` statement after its keyword.
///
/// Grammar: `ifStmt := "if" "(" expression ")" statement ("else" statement)?`
///
/// The `else` binds to the nearest `if`, which falls out of parsing it
/// greedily here.
fn parse_if<'a, I>(tokens: &mut Peekable<I>,
                   reporter: &mut ErrorReporter,
                   line: usize)
                   -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, &TokenKind::LeftParen, "Expect '(' after 'if'.")?;
    let condition = parse_expression(tokens, reporter)?;
    expect(tokens, &TokenKind::RightParen, "Expect ')' after if condition.")?;

    let then_branch = Box::new(parse_statement(tokens, reporter)?);
    let else_branch = if match_kind(tokens, &TokenKind::Else) {
        Some(Box::new(parse_statement(tokens, reporter)?))
    } else {
        None
    };

    Ok(Stmt::If { condition,
                  then_branch,
                  else_branch,
                  line })
}

/// Parses a `while` statement after its keyword.
///
/// Grammar: `whileStmt := "while" "(" expression ")" statement`
fn parse_while<'a, I>(tokens: &mut Peekable<I>,
                      reporter: &mut ErrorReporter,
                      line: usize)
                      -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, &TokenKind::LeftParen, "Expect '(' after 'while'.")?;
    let condition = parse_expression(tokens, reporter)?;
    expect(tokens, &TokenKind::RightParen, "Expect ')' after condition.")?;
    let body = parse_statement(tokens, reporter)?;

    Ok(Stmt::While { condition,
                     body: Box::new(body),
                     line })
}

/// Parses a `for` statement after its keyword, desugaring it.
///
/// Grammar: `forStmt := "for" "(" (varDecl | exprStmt | ";") expression? ";"
/// expression? ")" statement`
///
/// The produced AST contains no for-node:
///
/// ```text
/// for (init; cond; incr) body
///     =>
/// { init?; while (cond ?? true) { body; incr?; } }
/// ```
///
/// An absent condition becomes the literal `true`; an absent initializer or
/// increment simply drops its wrapping layer.
fn parse_for<'a, I>(tokens: &mut Peekable<I>,
                    reporter: &mut ErrorReporter,
                    line: usize)
                    -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    expect(tokens, &TokenKind::LeftParen, "Expect '(' after 'for'.")?;

    let initializer = if match_kind(tokens, &TokenKind::Semicolon) {
        None
    } else if match_kind(tokens, &TokenKind::Var) {
        Some(parse_var_declaration(tokens, reporter)?)
    } else {
        Some(parse_expression_statement(tokens, reporter)?)
    };

    let condition = if check(tokens, &TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens, reporter)?)
    };
    expect(tokens, &TokenKind::Semicolon, "Expect ';' after loop condition.")?;

    let increment = if check(tokens, &TokenKind::RightParen) {
        None
    } else {
        Some(parse_expression(tokens, reporter)?)
    };
    expect(tokens, &TokenKind::RightParen, "Expect ')' after for clauses.")?;

    let mut body = parse_statement(tokens, reporter)?;

    if let Some(increment) = increment {
        let increment_line = increment.line_number();
        body = Stmt::Block { statements: vec![body,
                                              Stmt::Expression { expr: increment,
                                                                 line: increment_line }],
                             line };
    }

    let condition = condition.unwrap_or(Expr::Literal { value: LiteralValue::Bool(true),
                                                        line });
    body = Stmt::While { condition,
                         body: Box::new(body),
                         line };

    if let Some(initializer) = initializer {
        body = Stmt::Block { statements: vec![initializer, body],
                             line };
    }

    Ok(body)
}

/// Parses a `print` statement after its keyword.
///
/// Grammar: `printStmt := "print" expression ";"`
fn parse_print<'a, I>(tokens: &mut Peekable<I>,
                      reporter: &mut ErrorReporter,
                      line: usize)
                      -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_expression(tokens, reporter)?;
    expect(tokens, &TokenKind::Semicolon, "Expect ';' after value.")?;
    Ok(Stmt::Print { expr, line })
}

/// Parses a `return` statement after its keyword.
///
/// Grammar: `returnStmt := "return" expression? ";"`
fn parse_return<'a, I>(tokens: &mut Peekable<I>,
                       reporter: &mut ErrorReporter,
                       line: usize)
                       -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let value = if check(tokens, &TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens, reporter)?)
    };
    expect(tokens, &TokenKind::Semicolon, "Expect ';' after return value.")?;
    Ok(Stmt::Return { value, line })
}

/// Parses an expression statement.
///
/// Grammar: `exprStmt := expression ";"`
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>,
                                     reporter: &mut ErrorReporter)
                                     -> ParseResult<Stmt>
    where I: Iterator<Item = &'a Token>
{
    let expr = parse_expression(tokens, reporter)?;
    let line = expr.line_number();
    expect(tokens, &TokenKind::Semicolon, "Expect ';' after expression.")?;
    Ok(Stmt::Expression { expr, line })
}
