//! # exprule
//!
//! exprule is a rule-driven expression parser and evaluator written in Rust.
//! It turns mathematical and logical expressions into trees using an ordered,
//! editable list of grammar rules, and reduces those trees one rewrite at a
//! time or to a fixpoint, symbolically or against a context of variables and
//! functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Expr,
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator and constant types
/// that make up an expression tree, together with the display rules that turn
/// a tree back into text that parses to the same tree.
///
/// # Responsibilities
/// - Defines the closed set of node variants.
/// - Maps operator and constant spellings onto their variants.
/// - Prints trees with only the parentheses they need.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines the errors raised while parsing an expression or
/// reducing a tree. Unknown names are not errors; they reduce to the
/// undefined constant.
///
/// # Responsibilities
/// - Defines error enums for parsing and reduction failures.
/// - Carries the offending input or expression for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates parsing and reduction.
///
/// This module ties together the group lexer, the rule-driven parser and the
/// evaluator to turn text into trees and trees into values.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Provides the grammar, parser and context types hosts work with.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides conversions between integer and floating-point types
/// without silent data loss, used by the integral operators.
///
/// # Responsibilities
/// - Safely convert between `i64`, `u64` and `f64`.
/// - Provide general utility functions used in multiple modules.
pub mod util;

/// Parses and evaluates `source` with the default grammar and functions.
///
/// Every call starts from a fresh parser and context. Hosts that need
/// assignments to persist keep their own [`Parser`] and [`Context`].
///
/// # Errors
/// Returns an error if the source does not parse or does not settle within
/// the iteration budget.
///
/// # Examples
/// ```
/// use exprule::{ast::Expr, evaluate};
///
/// assert_eq!(evaluate("8 - 4 - 2").unwrap(), Expr::number(2.0));
/// assert_eq!(evaluate("[1, 2, 3] + 5").unwrap().to_string(), "[6, 7, 8]");
/// assert!(evaluate("sqrt(-1)").unwrap().is_undefined());
///
/// // Unbalanced input is rejected.
/// assert!(evaluate("(1 + 2").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Expr, Box<dyn std::error::Error>> {
    let mut parser = Parser::new();
    let mut context = Context::with_builtins();

    let tree = parser.parse(source)?;
    Ok(tree.evaluate(&mut context)?)
}
