/// The evaluator module reduces expression trees.
///
/// The evaluator rewrites a tree one step at a time or until it settles,
/// folding operators, broadcasting over collections, resolving names against
/// a context and applying assignments.
///
/// # Responsibilities
/// - Folds unary and binary operators over numbers and collections.
/// - Resolves variables and calls functions stored in a context.
/// - Bounds fixpoint reductions by an iteration budget.
pub mod evaluator;
/// The lexer module hides bracketed groups from the rest of the input.
///
/// Top-level groups are replaced by numbered placeholders so that operator
/// patterns only ever see the outermost level of an expression. Offsets in
/// the hidden text can be mapped back to the original input.
///
/// # Responsibilities
/// - Detects unbalanced and mismatched delimiters.
/// - Escapes brackets that are not tracked as groups.
/// - Restores placeholders in fragments of the hidden text.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from text.
///
/// The parser tries an ordered list of rules against the input and hands the
/// first match to the rule's builder, which parses the pieces recursively.
///
/// # Responsibilities
/// - Resolves precedence and associativity from the order of the rules.
/// - Builds groups, function calls, collections and operators.
/// - Caches parse results by normalized input.
pub mod parser;
