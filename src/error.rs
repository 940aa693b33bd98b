/// Parsing errors.
///
/// Defines the errors raised while turning an expression string into a tree:
/// unbalanced groups, input no grammar rule accepts, and inputs nested deeper
/// than the parser's depth limit.
pub mod parse_error;
/// Reduction errors.
///
/// Contains the errors raised while simplifying or evaluating a tree. Unknown
/// names are deliberately absent; they reduce to the undefined constant.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
