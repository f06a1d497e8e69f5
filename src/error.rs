/// Errors raised while scanning or parsing source text.
pub mod parse_error;
/// The latching diagnostics sink shared by every phase.
pub mod reporter;
/// Errors raised while evaluating a program.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use reporter::ErrorReporter;
pub use runtime_error::RuntimeError;
