//! # loxide
//!
//! loxide is a tree-walking interpreter for Lox, a small dynamically typed
//! scripting language with C-like syntax. It scans, parses and evaluates
//! source text, printing values and diagnostics along the way, with support
//! for variables, block scoping, control flow and first-class functions with
//! closures.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use crate::interpreter::{evaluator::core::Interpreter, parser::statement::parse_program, scanner,
                         value::core::Value};

pub use crate::error::ErrorReporter;

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Stmt` enums that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
/// - Renders parsed code back to readable text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during scanning, parsing
/// or evaluation, plus the latching reporter the driver consults for exit
/// codes. Diagnostic strings are produced verbatim by the `Display` impls.
///
/// # Responsibilities
/// - Defines error enums for every failure mode, with line numbers attached.
/// - Keeps syntax errors and runtime errors strictly separated.
/// - Latches what happened so the driver can pick an exit code.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together the scanner, parser, evaluator, value
/// representation and environment chain to provide a complete runtime for Lox
/// source.
///
/// # Responsibilities
/// - Coordinates all core components: scanner, parser, evaluator and values.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Scans and parses source text without executing it.
///
/// All syntax diagnostics are reported through `reporter`; the statements
/// that parsed successfully are returned either way.
///
/// # Parameters
/// - `source`: The source text.
/// - `reporter`: Sink for scanner and parser diagnostics.
///
/// # Returns
/// The parsed statements, in source order.
///
/// # Example
/// ```
/// use loxide::{error::ErrorReporter, parse_source};
///
/// let mut reporter = ErrorReporter::new();
/// let program = parse_source("var x = 1;", &mut reporter);
///
/// assert_eq!(program.len(), 1);
/// assert!(!reporter.had_error());
/// ```
pub fn parse_source(source: &str, reporter: &mut ErrorReporter) -> Vec<ast::Stmt> {
    let tokens = scanner::scan(source, reporter);
    parse_program(&mut tokens.iter().peekable(), reporter)
}

/// Runs source text through the full pipeline.
///
/// Scanning and parsing report their diagnostics through `reporter`; when any
/// syntax error was latched the evaluator does not run. A runtime error is
/// reported the same way and aborts the statement sequence.
///
/// # Parameters
/// - `source`: The source text, a file or one REPL line.
/// - `interpreter`: The evaluation state; kept across REPL lines.
/// - `reporter`: Diagnostics sink; consult its flags after the call.
///
/// # Returns
/// The final value of the program, when its last statement was an expression
/// statement and no error occurred.
///
/// # Example
/// ```
/// use loxide::{ErrorReporter, interpreter::evaluator::core::Interpreter, run};
///
/// let mut interpreter = Interpreter::new();
/// let mut reporter = ErrorReporter::new();
///
/// let value = run("1 + 2;", &mut interpreter, &mut reporter);
/// assert_eq!(value.map(|v| v.to_string()), Some("3".to_string()));
/// ```
pub fn run(source: &str,
           interpreter: &mut Interpreter,
           reporter: &mut ErrorReporter)
           -> Option<Value> {
    let statements = parse_source(source, reporter);

    if reporter.had_error() {
        return None;
    }

    match interpreter.interpret(&statements) {
        Ok(value) => value,
        Err(error) => {
            reporter.runtime_error(&error);
            None
        },
    }
}
