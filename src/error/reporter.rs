use crate::error::{ParseError, RuntimeError};

/// Collects and prints diagnostics, latching what happened.
///
/// The two flags are monotonic within a run: once an error of either class is
/// reported it stays set until the driver calls [`reset`](Self::reset), which
/// the REPL does between lines. The driver consults `had_error` after parsing
/// (exit 65, evaluator does not run) and `had_runtime_error` after evaluation
/// (exit 70).
///
/// Diagnostics go to stderr; program output goes to stdout.
///
/// ## Example
/// ```
/// use loxide::error::{ErrorReporter, RuntimeError};
///
/// let mut reporter = ErrorReporter::new();
/// assert!(!reporter.had_runtime_error());
///
/// reporter.runtime_error(&RuntimeError::OperandsMustBeNumbers { line: 1 });
/// assert!(reporter.had_runtime_error());
///
/// reporter.reset();
/// assert!(!reporter.had_runtime_error());
/// ```
#[derive(Debug, Default)]
pub struct ErrorReporter {
    had_error:         bool,
    had_runtime_error: bool,
}

impl ErrorReporter {
    /// Creates a reporter with both flags clear.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints a scanner or parser diagnostic and latches `had_error`.
    pub fn parse_error(&mut self, error: &ParseError) {
        eprintln!("{error}");
        self.had_error = true;
    }

    /// Prints a runtime diagnostic and latches `had_runtime_error`.
    pub fn runtime_error(&mut self, error: &RuntimeError) {
        eprintln!("{error}");
        self.had_runtime_error = true;
    }

    /// True once any syntax error has been reported.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }

    /// True once any runtime error has been reported.
    #[must_use]
    pub const fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags. Called by the REPL between lines.
    pub fn reset(&mut self) {
        self.had_error = false;
        self.had_runtime_error = false;
    }
}
