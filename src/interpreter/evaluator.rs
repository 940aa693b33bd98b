/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons and logical operators on scalars, and
/// broadcasting of operators over collections.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements all unary operations, such as arithmetic negation, logical NOT,
/// and factorial.
pub mod unary;

/// Core evaluation state.
///
/// Contains the context of variable and function bindings, the evaluation
/// result type and the iteration budget.
pub mod core;

/// Step-wise and fixpoint reduction of expression trees.
///
/// Implements `step_simplify`, `simplify`, `step_evaluate` and `evaluate`.
pub mod reduce;

/// Utility functions for evaluation.
///
/// Provides truthiness and the factorial family shared by the operators.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;
