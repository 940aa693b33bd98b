#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing an expression string.
pub enum ParseError {
    /// A closing bracket had no open match, a bracket was closed by the wrong
    /// kind of delimiter, or a group was still open at the end of the input.
    UnbalancedParentheses {
        /// The input that contained the unbalanced group.
        input: String,
    },
    /// No grammar rule accepted the input.
    SyntaxError {
        /// The sub-expression that could not be parsed.
        input: String,
    },
    /// Parsing nested deeper than the parser allows.
    RecursionLimit {
        /// The depth limit that was reached.
        depth: usize,
        /// The sub-expression being parsed when the limit was reached.
        input: String,
    },
}

impl ParseError {
    /// Returns the input text the error refers to.
    ///
    /// ## Example
    /// ```
    /// use exprule::error::ParseError;
    ///
    /// let error = ParseError::SyntaxError { input: "1 +".to_string() };
    ///
    /// assert_eq!(error.input(), "1 +");
    /// ```
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::UnbalancedParentheses { input }
            | Self::SyntaxError { input }
            | Self::RecursionLimit { input, .. } => input,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnbalancedParentheses { input } => {
                write!(f, "Unbalanced parentheses in '{input}'.")
            },
            Self::SyntaxError { input } => {
                write!(f, "The input was not in the correct format: '{input}'.")
            },
            Self::RecursionLimit { depth, input } => write!(f,
                                                            "Expression nests deeper than {depth} levels near '{input}'."),
        }
    }
}

impl std::error::Error for ParseError {}
