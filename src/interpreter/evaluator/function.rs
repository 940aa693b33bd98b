/// Built-in function implementations.
///
/// Contains the mathematical functions registered by
/// `Context::with_builtins`.
pub mod builtin;

/// Function values and their invocation.
///
/// A function is either a native callable or an expression body with named
/// parameters, checked against its arity on every call.
pub mod core;
