/// The runtime value tagged union.
pub mod core;
/// Callable values: user closures and native built-ins.
pub mod function;
