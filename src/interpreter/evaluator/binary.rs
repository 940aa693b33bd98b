/// Dispatch of binary operators and folding of binary nodes.
///
/// Decides, for a pair of reduced operands, whether the node folds to a
/// number, broadcasts over a collection or has to stay as it is.
pub mod core;

/// Arithmetic on two scalars.
pub mod scalar;

/// Relational and equality comparisons of two scalars.
pub mod comparison;

/// Logical operators on the truthiness of two scalars.
pub mod logic;

/// Element-wise operations, scalar broadcasting and whole-collection
/// equality.
pub mod collection;
