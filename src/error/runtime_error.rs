use std::fmt;

/// Represents all errors that can occur during evaluation.
///
/// Runtime diagnostics render as the message followed by a `[line N]` trailer,
/// matching what the driver writes to stderr. A `return` unwinding a function
/// is *not* one of these; control flow travels on a separate channel.
#[derive(Debug, Clone)]
pub enum RuntimeError {
    /// Unary `-` was applied to a non-number.
    OperandMustBeNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A comparison or arithmetic operator received a non-number.
    OperandsMustBeNumbers {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `+` received operands that are neither two numbers nor two strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variable was read or assigned without being defined.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call expression's callee was not a callable value.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// The number of parameters the callee declares.
        expected: usize,
        /// The number of arguments actually supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperandMustBeNumber { line } => {
                write!(f, "Operand must be a number.\n[line {line}]")
            },
            Self::OperandsMustBeNumbers { line } => {
                write!(f, "Operands must be numbers.\n[line {line}]")
            },
            Self::OperandsMustBeNumbersOrStrings { line } => {
                write!(f, "Operands must be two numbers or two strings.\n[line {line}]")
            },
            Self::UndefinedVariable { name, line } => {
                write!(f, "Undefined variable '{name}'.\n[line {line}]")
            },
            Self::NotCallable { line } => {
                write!(f, "Can only call functions and classes.\n[line {line}]")
            },
            Self::ArityMismatch { expected, found, line } => {
                write!(f, "Expected {expected} arguments but got {found}.\n[line {line}]")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
