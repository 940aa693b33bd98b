/// The parser driver.
///
/// Owns the grammar and the result cache, walks the rules in order and hands
/// the first match to its builder.
pub mod core;

/// Grammar rules and their matching.
///
/// Defines the rule kinds, their search options and how pattern and operator
/// rules find their occurrences.
pub mod rule;

/// The ordered rule list.
///
/// Holds the rules, expands `{Name}` references between them and caches
/// compiled patterns. Also defines the default grammar.
pub mod grammar;

/// Binary operator builders.
///
/// Splits the input around an operator occurrence and parses both sides,
/// including assignment.
pub mod binary;

/// Unary operator and leaf builders.
///
/// Handles prefix and postfix operators as well as constants, variables and
/// number literals.
pub mod unary;

/// Group builders.
///
/// Matches and builds parentheses, tuples, vectors and function calls, and
/// re-dispatches input whose groups have to be hidden first.
pub mod utils;
