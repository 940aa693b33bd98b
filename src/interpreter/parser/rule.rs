use std::fmt;

use log::trace;
use regex::Regex;

use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            grammar::{Grammar, OPERAND},
        },
    },
};

/// A hand-written matcher: finds the rule's occurrence in the input.
pub type MatchFn = fn(&str, &Grammar) -> Option<Token>;

/// Turns a match into a node. Receives the full input the rule was tried on,
/// the matched token with its offset into that input, and the parser so it can
/// re-enter on sub-spans.
pub type BuildFn = fn(&str, &Token, &mut Parser) -> ParseResult<Expr>;

/// Flags controlling how a pattern rule searches its input.
///
/// ## Example
/// ```
/// use exprule::interpreter::parser::rule::RuleOptions;
///
/// let options = RuleOptions::new().right_to_left().pad_references();
///
/// assert!(options.right_to_left);
/// assert!(!options.only);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOptions {
    /// Prefer the rightmost occurrence. For binary operators this yields
    /// left associativity.
    pub right_to_left:   bool,
    /// The whole trimmed input must match.
    pub only:            bool,
    /// The match must start at the trimmed start of the input.
    pub anchor_left:     bool,
    /// The match must end at the trimmed end of the input.
    pub anchor_right:    bool,
    /// Operands around an operator must sit on a token boundary.
    pub pad_references:  bool,
    /// Reject an operator occurrence directly preceded by this character.
    pub not_preceded_by: Option<char>,
}

impl RuleOptions {
    /// No flags set.
    #[must_use]
    pub const fn new() -> Self {
        Self { right_to_left:   false,
               only:            false,
               anchor_left:     false,
               anchor_right:    false,
               pad_references:  false,
               not_preceded_by: None, }
    }

    /// Sets `right_to_left`.
    #[must_use]
    pub const fn right_to_left(mut self) -> Self {
        self.right_to_left = true;
        self
    }

    /// Sets `only`.
    #[must_use]
    pub const fn only(mut self) -> Self {
        self.only = true;
        self
    }

    /// Sets `anchor_left`.
    #[must_use]
    pub const fn anchor_left(mut self) -> Self {
        self.anchor_left = true;
        self
    }

    /// Sets `anchor_right`.
    #[must_use]
    pub const fn anchor_right(mut self) -> Self {
        self.anchor_right = true;
        self
    }

    /// Sets `pad_references`.
    #[must_use]
    pub const fn pad_references(mut self) -> Self {
        self.pad_references = true;
        self
    }

    /// Sets `not_preceded_by`.
    #[must_use]
    pub const fn not_preceded_by(mut self, character: char) -> Self {
        self.not_preceded_by = Some(character);
        self
    }
}

/// How a rule finds its matches.
#[derive(Clone, Copy)]
pub enum RuleKind {
    /// Only expanded inside other patterns; never dispatched on its own.
    Reference,
    /// Matches its pattern directly.
    Regex {
        /// Search flags.
        options: RuleOptions,
        /// Builder invoked on a match.
        build:   BuildFn,
    },
    /// Matches an operator occurrence that has an operand on either side.
    Operator {
        /// Search flags.
        options: RuleOptions,
        /// Builder invoked on a match.
        build:   BuildFn,
    },
    /// Uses a hand-written matcher.
    Custom {
        /// The matcher.
        matcher: MatchFn,
        /// Builder invoked on a match.
        build:   BuildFn,
    },
}

/// A named grammar production.
///
/// The pattern is a regular expression that may refer to other rules as
/// `{Name}`. Custom rules may carry a pattern purely so other rules can refer
/// to them.
#[derive(Clone)]
pub struct Rule {
    /// Unique name within a grammar.
    pub name:    String,
    /// The rule's pattern, if it has one.
    pub pattern: Option<String>,
    /// How the rule matches and builds.
    pub kind:    RuleKind,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RuleKind::Reference => "Reference",
            RuleKind::Regex { .. } => "Regex",
            RuleKind::Operator { .. } => "Operator",
            RuleKind::Custom { .. } => "Custom",
        };
        f.debug_struct("Rule")
         .field("name", &self.name)
         .field("pattern", &self.pattern)
         .field("kind", &kind)
         .finish()
    }
}

impl Rule {
    /// Creates a rule that only exists to be referenced from other patterns.
    #[must_use]
    pub fn reference(name: &str, pattern: &str) -> Self {
        Self { name:    name.to_string(),
               pattern: Some(pattern.to_string()),
               kind:    RuleKind::Reference, }
    }

    /// Creates a rule that matches its pattern directly.
    #[must_use]
    pub fn regex(name: &str, pattern: &str, options: RuleOptions, build: BuildFn) -> Self {
        Self { name:    name.to_string(),
               pattern: Some(pattern.to_string()),
               kind:    RuleKind::Regex { options, build }, }
    }

    /// Creates an operator rule. `pattern` matches the operator symbols.
    #[must_use]
    pub fn operator(name: &str, pattern: &str, options: RuleOptions, build: BuildFn) -> Self {
        Self { name:    name.to_string(),
               pattern: Some(pattern.to_string()),
               kind:    RuleKind::Operator { options, build }, }
    }

    /// Creates a rule with a hand-written matcher.
    #[must_use]
    pub fn custom(name: &str, pattern: Option<&str>, matcher: MatchFn, build: BuildFn) -> Self {
        Self { name:    name.to_string(),
               pattern: pattern.map(str::to_string),
               kind:    RuleKind::Custom { matcher, build }, }
    }

    /// Whether the rule is never dispatched on its own.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self.kind, RuleKind::Reference)
    }

    /// The rule's builder, or `None` for reference rules.
    #[must_use]
    pub const fn builder(&self) -> Option<BuildFn> {
        match self.kind {
            RuleKind::Reference => None,
            RuleKind::Regex { build, .. }
            | RuleKind::Operator { build, .. }
            | RuleKind::Custom { build, .. } => Some(build),
        }
    }

    /// Looks for the rule in `input`, resolving references through `grammar`.
    ///
    /// Returns the matched text and its byte offset into `input`, or `None`
    /// when the rule does not apply. Reference rules never match.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::parser::{core::Parser, grammar::ADD};
    ///
    /// let parser = Parser::new();
    /// let rule = parser.grammar().get(ADD).unwrap();
    ///
    /// // Rightmost occurrence first, so subtraction associates to the left.
    /// let token = rule.find("8 - 4 - 2", parser.grammar()).unwrap();
    /// assert_eq!(token.index, 6);
    ///
    /// // The sign of an exponent is not an operator.
    /// assert!(rule.find("1e+5", parser.grammar()).is_none());
    /// ```
    #[must_use]
    pub fn find(&self, input: &str, grammar: &Grammar) -> Option<Token> {
        let token = match (&self.kind, self.pattern.as_deref()) {
            (RuleKind::Reference, _) => None,
            (RuleKind::Custom { matcher, .. }, _) => matcher(input, grammar),
            (RuleKind::Regex { options, .. }, Some(pattern)) => {
                find_pattern(pattern, *options, input, grammar)
            },
            (RuleKind::Operator { options, .. }, Some(pattern)) => {
                find_operator(pattern, *options, input, grammar)
            },
            _ => None,
        };

        if let Some(token) = &token {
            trace!("{} matched {:?} at {} in {input:?}", self.name, token.value, token.index);
        }
        token
    }
}

/// Matches an expanded pattern under the anchoring flags.
fn find_pattern(pattern: &str, options: RuleOptions, input: &str, grammar: &Grammar) -> Option<Token> {
    let expanded = grammar.expand(pattern)?;
    let source = match (options.only || (options.anchor_left && options.anchor_right),
                        options.anchor_left,
                        options.anchor_right)
    {
        (true, ..) => format!(r"^\s*(?P<matched>{expanded})\s*$"),
        (false, true, _) => format!(r"^\s*(?P<matched>{expanded})"),
        (false, _, true) => format!(r"(?P<matched>{expanded})\s*$"),
        _ => format!(r"(?P<matched>{expanded})"),
    };
    let regex = grammar.regex(&source)?;

    let captures = if options.right_to_left {
        regex.captures_iter(input).last()
    } else {
        regex.captures(input)
    }?;
    let matched = captures.name("matched")?;

    Some(Token::new(matched.as_str(), matched.start()))
}

/// The compiled patterns used to search for one operator.
struct OperatorSearch {
    /// The operator anchored at the end of the text.
    at_end:  Regex,
    /// The operator spanning the whole text.
    exact:   Regex,
    /// An operand at the end of the text left of the operator.
    left:    Regex,
    /// An operand at the start of the text right of the operator.
    right:   Regex,
    options: RuleOptions,
}

impl OperatorSearch {
    fn new(pattern: &str, options: RuleOptions, grammar: &Grammar) -> Option<Self> {
        let symbol = grammar.expand(pattern)?;
        let operand = grammar.expand(&format!("{{{OPERAND}}}"))?;

        let (left, right) = if options.pad_references {
            (format!(r"(?:^|[^\w.])\s*(?:{operand})\s*$"),
             format!(r"^\s*(?:{operand})\s*(?:$|[^\w.])"))
        } else {
            (format!(r"(?:{operand})\s*$"), format!(r"^\s*(?:{operand})"))
        };

        Some(Self { at_end: grammar.regex(&format!("(?:{symbol})$"))?,
                    exact: grammar.regex(&format!("^(?:{symbol})$"))?,
                    left: grammar.regex(&left)?,
                    right: grammar.regex(&right)?,
                    options })
    }

    /// Whether the operator spanning `start..end` has an operand on each side.
    fn accepts(&self, input: &str, start: usize, end: usize) -> bool {
        if let Some(character) = self.options.not_preceded_by
           && input[..start].ends_with(character)
        {
            return false;
        }

        self.left.is_match(&input[..start]) && self.right.is_match(&input[end..])
    }

    /// End of the longest operator occurrence starting at `start`.
    fn exact_prefix(&self, input: &str, start: usize) -> Option<usize> {
        let rest = &input[start..];

        boundaries(rest, 1, rest.len() + 1).filter(|&end| self.exact.is_match(&rest[..end]))
                                           .last()
                                           .map(|end| start + end)
    }

    /// Every operator occurrence ending exactly at `end`, leftmost start
    /// first.
    fn ending_at<'a>(&'a self, input: &'a str, end: usize) -> impl Iterator<Item = usize> + 'a {
        let first = self.at_end.find(&input[..end]).map_or(end, |m| m.start());

        boundaries(input, first, end).filter(move |&start| self.exact.is_match(&input[start..end]))
    }
}

/// Finds an operator occurrence whose left side ends with an operand and whose
/// right side starts with one.
fn find_operator(pattern: &str, options: RuleOptions, input: &str, grammar: &Grammar) -> Option<Token> {
    let search = OperatorSearch::new(pattern, options, grammar)?;
    let token = |start: usize, end: usize| Token::new(&input[start..end], start);

    if options.right_to_left {
        let ends: Vec<usize> = boundaries(input, 1, input.len() + 1).collect();

        ends.into_iter().rev().find_map(|end| {
                                  search.ending_at(input, end)
                                        .find(|&start| search.accepts(input, start, end))
                                        .map(|start| token(start, end))
                              })
    } else {
        boundaries(input, 0, input.len()).find_map(|start| {
                                             let found = search.exact_prefix(input, start)?;
                                             search.accepts(input, start, found)
                                                   .then(|| token(start, found))
                                         })
    }
}

/// Character boundaries of `text` in `from..to`.
fn boundaries(text: &str, from: usize, to: usize) -> impl Iterator<Item = usize> + '_ {
    (from..to).filter(|&i| text.is_char_boundary(i))
}
