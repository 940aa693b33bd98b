#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while reducing an expression tree.
///
/// Unresolved names are not errors: they reduce to the undefined constant so
/// that partially bound expressions stay representable.
pub enum RuntimeError {
    /// A fixpoint reduction did not settle within the iteration budget.
    IterationLimit {
        /// The number of steps that were attempted.
        limit:      usize,
        /// The expression reached when the budget ran out.
        expression: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IterationLimit { limit, expression } => write!(f,
                                                                 "Reduction did not settle after {limit} steps, last expression: {expression}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
