use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::parser::{
        grammar::Grammar,
        rule::{BuildFn, Rule},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default limit on how deeply the parser may re-enter itself.
///
/// Every nested group and every operand split off an operator chain costs
/// one level, so `1+1+...+1` with more than `MAX_DEPTH` terms needs a larger
/// limit through [`Parser::with_max_depth`].
pub const MAX_DEPTH: usize = 256;

/// Drives a [`Grammar`] over input strings and caches the results.
///
/// Parsing tries every non-reference rule in order and builds from the first
/// one that matches. Builders call back into [`Parser::parse`] for the spans
/// they split off, so the loosest-binding rule that applies ends up at the
/// root.
///
/// Results are cached under the input with insignificant whitespace removed,
/// so `1 + 2` and `1+2` share an entry. The cache hands out clones; mutating
/// a returned tree never affects later parses.
///
/// ## Example
/// ```
/// use exprule::{ast::BinaryOperator, ast::Expr, interpreter::parser::core::Parser};
///
/// let mut parser = Parser::new();
/// let tree = parser.parse("2 + 3 * 4").unwrap();
///
/// assert!(matches!(tree, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
/// assert!(parser.contains_cache("2+3*4"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    grammar:   Grammar,
    cache:     HashMap<String, Expr>,
    depth:     usize,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser over the default grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grammar(Grammar::default())
    }

    /// Creates a parser over a custom grammar.
    #[must_use]
    pub fn with_grammar(grammar: Grammar) -> Self {
        Self { grammar,
               cache: HashMap::new(),
               depth: 0,
               max_depth: MAX_DEPTH }
    }

    /// Sets how deeply the parser may re-enter itself.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The re-entry limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The grammar being driven.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parses `input` into a tree.
    ///
    /// # Errors
    /// - `UnbalancedParentheses` if a group is not closed or closed twice.
    /// - `SyntaxError` if no rule matches some span of the input.
    /// - `RecursionLimit` if parsing nests deeper than the configured limit.
    ///
    /// ## Example
    /// ```
    /// use exprule::{error::ParseError, interpreter::parser::core::Parser};
    ///
    /// let mut parser = Parser::new();
    ///
    /// assert_eq!(parser.parse("(1 + 2) * x").unwrap().to_string(), "(1 + 2) * x");
    /// assert!(matches!(parser.parse("(1 + 2"), Err(ParseError::UnbalancedParentheses { .. })));
    /// assert!(matches!(parser.parse("1 +"), Err(ParseError::SyntaxError { .. })));
    /// ```
    pub fn parse(&mut self, input: &str) -> ParseResult<Expr> {
        let key = cache_key(input);

        if let Some(expr) = self.cache.get(&key) {
            debug!("cache hit for {key:?}");
            return Ok(expr.clone());
        }

        if self.depth >= self.max_depth {
            return Err(ParseError::RecursionLimit { depth: self.depth,
                                                    input: input.to_string() });
        }

        self.depth += 1;
        let result = self.dispatch(input);
        self.depth -= 1;

        let expr = result?;
        self.cache.insert(key, expr.clone());
        Ok(expr)
    }

    /// Builds from the first rule that matches `input`.
    fn dispatch(&mut self, input: &str) -> ParseResult<Expr> {
        let grammar = &self.grammar;
        let found: Option<(BuildFn, _)> = grammar.rules().iter().find_map(|rule| {
                                                                   let build = rule.builder()?;
                                                                   rule.find(input, grammar)
                                                                       .map(|token| (build, token))
                                                               });

        let Some((build, token)) = found else {
            trace!("no rule matches {input:?}");
            return Err(ParseError::SyntaxError { input: input.to_string() });
        };

        build(input, &token, self)
    }

    /// Inserts `rule` into the grammar.
    ///
    /// A negative `index` counts from the end: `-1` appends, `-2` inserts
    /// before the last rule. Indices past either end are clamped. A rule whose
    /// name is already taken is refused. Any change clears the cache.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::parser::{core::Parser, grammar::NUMBER, rule::Rule};
    ///
    /// let mut parser = Parser::new();
    /// let rule = Rule::reference("Digit", r"\d");
    ///
    /// assert!(parser.add_grammar_rule(rule.clone(), -1));
    /// assert!(!parser.add_grammar_rule(rule, 0));
    /// assert_eq!(parser.grammar().rules().last().unwrap().name, "Digit");
    /// assert!(parser.grammar_contains(NUMBER));
    /// ```
    pub fn add_grammar_rule(&mut self, rule: Rule, index: isize) -> bool {
        let len = self.grammar.len();
        let position = if index < 0 {
            len.saturating_sub(index.unsigned_abs() - 1)
        } else {
            index.unsigned_abs().min(len)
        };

        let added = self.grammar.insert(position, rule);
        if added {
            self.clear_cache();
        }
        added
    }

    /// Removes the rule called `name`. Clears the cache if it existed.
    pub fn remove_grammar_rule(&mut self, name: &str) -> bool {
        let removed = self.grammar.remove(name).is_some();
        if removed {
            self.clear_cache();
        }
        removed
    }

    /// Removes the rule at `index`. Clears the cache if it existed.
    pub fn remove_grammar_rule_at(&mut self, index: usize) -> bool {
        let removed = self.grammar.remove_at(index).is_some();
        if removed {
            self.clear_cache();
        }
        removed
    }

    /// Whether the grammar has a rule called `name`.
    #[must_use]
    pub fn grammar_contains(&self, name: &str) -> bool {
        self.grammar.contains(name)
    }

    /// Whether a result for `input` is cached.
    #[must_use]
    pub fn contains_cache(&self, input: &str) -> bool {
        self.cache.contains_key(&cache_key(input))
    }

    /// Caches `expr` as the result for `input`. Returns `false` if an entry
    /// already existed; it is replaced either way.
    pub fn add_cache(&mut self, input: &str, expr: Expr) -> bool {
        self.cache.insert(cache_key(input), expr).is_none()
    }

    /// Drops the cached result for `input`.
    pub fn remove_cache(&mut self, input: &str) -> bool {
        self.cache.remove(&cache_key(input)).is_some()
    }

    /// Drops every cached result.
    pub fn clear_cache(&mut self) {
        debug!("clearing {} cached parses", self.cache.len());
        self.cache.clear();
    }

    /// The cache keys, in no particular order.
    #[must_use]
    pub fn cache_keys(&self) -> Vec<&str> {
        self.cache.keys().map(String::as_str).collect()
    }
}

/// How a character joins with its neighbours when whitespace is removed.
#[derive(PartialEq, Eq)]
enum Class {
    Word,
    Symbol,
    Delimiter,
}

fn class(c: char) -> Class {
    if c.is_alphanumeric() || c == '_' || c == '.' {
        Class::Word
    } else if matches!(c, '(' | ')' | '[' | ']' | ',') {
        Class::Delimiter
    } else {
        Class::Symbol
    }
}

/// Normalizes `input` for the cache.
///
/// Whitespace is dropped wherever removing it cannot change how the input
/// reads. A run between two word characters or two operator symbols is kept
/// as one space, so `x y` never shares an entry with `xy`, nor `- -3` with
/// `--3`.
///
/// ## Example
/// ```
/// use exprule::interpreter::parser::core::cache_key;
///
/// assert_eq!(cache_key(" 1 + 2 "), "1+2");
/// assert_eq!(cache_key("f( a , b )"), "f(a,b)");
/// assert_eq!(cache_key("- -3"), "- -3");
/// ```
#[must_use]
pub fn cache_key(input: &str) -> String {
    let mut key = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }

        if pending_space
           && let Some(previous) = key.chars().next_back()
           && class(previous) == class(c)
           && class(c) != Class::Delimiter
        {
            key.push(' ');
        }
        pending_space = false;
        key.push(c);
    }

    key
}
