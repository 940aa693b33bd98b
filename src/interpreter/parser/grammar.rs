use std::{cell::RefCell, collections::HashMap};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::interpreter::parser::{
    binary::{parse_assignment, parse_binary},
    rule::{Rule, RuleOptions},
    unary::{match_postfix, parse_constant, parse_number, parse_postfix, parse_prefix, parse_variable},
    utils::{
        match_function_call, match_parentheses, match_tuple, match_vector, parse_function_call,
        parse_parentheses, parse_tuple, parse_vector, parse_with_parentheses,
    },
};

pub const OPERAND: &str = "Operand";
pub const TOKEN: &str = "Token";
pub const FUNCTION_CALL: &str = "FunctionCall";
pub const TUPLE: &str = "Tuple";
pub const PARENTHESES: &str = "Parentheses";
pub const VECTOR: &str = "Vector";
pub const WITH_PARENTHESES: &str = "WithParentheses";
pub const ASSIGN: &str = "AssignBinOp";
pub const OR: &str = "OrBinOp";
pub const XOR: &str = "XorBinOp";
pub const AND: &str = "AndBinOp";
pub const EQUALITY: &str = "EqBinOp";
pub const INEQUALITY: &str = "IneqBinOp";
pub const ADD: &str = "AddBinOp";
pub const MULTIPLY: &str = "MultBinOp";
pub const EXPONENT: &str = "ExpBinOp";
pub const PREFIX: &str = "Prefix";
pub const POSTFIX: &str = "Postfix";
pub const CONSTANT: &str = "Constant";
pub const VARIABLE: &str = "Variable";
pub const NUMBER: &str = "Number";

/// Pattern of the postfix operators, used when other rules refer to
/// `{Postfix}`.
pub const POSTFIX_PATTERN: &str = r"\+\+|--|!!|[!%#]";

/// How deep `{Name}` references may nest before expansion gives up.
const MAX_EXPANSION_DEPTH: usize = 32;

static REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z_]\w*)\}").unwrap());

/// An ordered list of rules. Earlier rules bind more loosely: the parser
/// tries them first, so they end up closer to the root of the tree.
///
/// The grammar also caches pattern expansions and compiled regexes; every
/// mutation clears both caches.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules:      Vec<Rule>,
    expansions: RefCell<HashMap<String, Option<String>>>,
    regexes:    RefCell<HashMap<String, Option<Regex>>>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Grammar {
    /// Creates a grammar from rules in precedence order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules,
               expansions: RefCell::new(HashMap::new()),
               regexes: RefCell::new(HashMap::new()) }
    }

    /// The rules in order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the grammar has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Looks up a rule by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Position of the rule called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.name == name)
    }

    /// Whether a rule called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Inserts `rule` at `index` (clamped to the end). Refuses a rule whose
    /// name is already taken.
    pub fn insert(&mut self, index: usize, rule: Rule) -> bool {
        if self.contains(&rule.name) {
            debug!("refusing duplicate grammar rule {}", rule.name);
            return false;
        }

        debug!("inserting grammar rule {} at {index}", rule.name);
        self.rules.insert(index.min(self.rules.len()), rule);
        self.clear_caches();
        true
    }

    /// Removes the rule called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let index = self.position(name)?;
        self.remove_at(index)
    }

    /// Removes the rule at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Rule> {
        if index >= self.rules.len() {
            return None;
        }

        let rule = self.rules.remove(index);
        debug!("removed grammar rule {}", rule.name);
        self.clear_caches();
        Some(rule)
    }

    /// Replaces every `{Name}` in `pattern` with the named rule's pattern,
    /// recursively.
    ///
    /// Returns `None` when a reference names a missing rule, a rule without a
    /// pattern, or nests too deeply.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::parser::grammar::Grammar;
    ///
    /// let grammar = Grammar::default();
    ///
    /// assert_eq!(grammar.expand(r"{Token}\s*").as_deref(), Some(r"(?:\[\d+\])\s*"));
    /// assert!(grammar.expand("{Missing}").is_none());
    /// assert_eq!(grammar.expand("a{2}").as_deref(), Some("a{2}"));
    /// ```
    #[must_use]
    pub fn expand(&self, pattern: &str) -> Option<String> {
        if let Some(cached) = self.expansions.borrow().get(pattern) {
            return cached.clone();
        }

        let expanded = self.expand_at(pattern, 0);
        self.expansions
            .borrow_mut()
            .insert(pattern.to_string(), expanded.clone());
        expanded
    }

    fn expand_at(&self, pattern: &str, depth: usize) -> Option<String> {
        if depth > MAX_EXPANSION_DEPTH {
            warn!("reference expansion of {pattern:?} nests too deeply");
            return None;
        }

        let mut expanded = String::with_capacity(pattern.len());
        let mut last = 0;

        for captures in REFERENCE.captures_iter(pattern) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let Some(referenced) = self.get(name.as_str()).and_then(|rule| rule.pattern.as_deref())
            else {
                warn!("pattern {pattern:?} refers to unknown rule {}", name.as_str());
                return None;
            };

            expanded.push_str(&pattern[last..whole.start()]);
            expanded.push_str("(?:");
            expanded.push_str(&self.expand_at(referenced, depth + 1)?);
            expanded.push(')');
            last = whole.end();
        }
        expanded.push_str(&pattern[last..]);

        Some(expanded)
    }

    /// Compiles `source`, reusing an earlier compilation. Patterns that fail
    /// to compile are logged once and yield `None`.
    #[must_use]
    pub fn regex(&self, source: &str) -> Option<Regex> {
        if let Some(cached) = self.regexes.borrow().get(source) {
            return cached.clone();
        }

        let compiled = match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(error) => {
                warn!("pattern {source:?} does not compile: {error}");
                None
            },
        };
        self.regexes
            .borrow_mut()
            .insert(source.to_string(), compiled.clone());
        compiled
    }

    fn clear_caches(&mut self) {
        self.expansions.get_mut().clear();
        self.regexes.get_mut().clear();
    }
}

/// The default rule list, loosest binding first.
///
/// | rules | kind |
/// |-------|------|
/// | `Operand`, `Token` | references used by operator rules |
/// | `FunctionCall`, `Tuple`, `Parentheses`, `Vector` | whole-input groups |
/// | `WithParentheses` | anything else containing a bracket |
/// | `AssignBinOp` ... `ExpBinOp` | binary operators |
/// | `Prefix`, `Postfix` | unary operators |
/// | `Constant`, `Variable`, `Number` | leaves |
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    let binary = RuleOptions::new().right_to_left().pad_references();

    vec![Rule::reference(OPERAND,
                         r"(?:{Prefix}\s*)*(?:{Variable}?{Token}|{Variable}|{Constant}|{Number}){Postfix}*"),
         Rule::reference(TOKEN, r"\[\d+\]"),
         Rule::custom(FUNCTION_CALL, None, match_function_call, parse_function_call),
         Rule::custom(TUPLE, None, match_tuple, parse_tuple),
         Rule::custom(PARENTHESES, None, match_parentheses, parse_parentheses),
         Rule::custom(VECTOR, None, match_vector, parse_vector),
         Rule::regex(WITH_PARENTHESES, r"[()\[\]]", RuleOptions::new(), parse_with_parentheses),
         Rule::operator(ASSIGN,
                        "=",
                        RuleOptions::new().pad_references().not_preceded_by('!'),
                        parse_assignment),
         Rule::operator(OR, r"\|\||∨", binary, parse_binary),
         Rule::operator(XOR, "⊕", binary, parse_binary),
         Rule::operator(AND, "&&|∧", binary, parse_binary),
         Rule::operator(EQUALITY, "==|!=|<>|≠", binary, parse_binary),
         Rule::operator(INEQUALITY, "[<>]=|[<>≤≥]", binary, parse_binary),
         Rule::operator(ADD, r"[+\-]", binary, parse_binary),
         Rule::operator(MULTIPLY, "%%|//|[*×/÷%]", binary, parse_binary),
         Rule::operator(EXPONENT, r"\^", binary, parse_binary),
         Rule::regex(PREFIX, r"\+\+|--|[+\-!~¬]", RuleOptions::new().anchor_left(), parse_prefix),
         Rule::custom(POSTFIX, Some(POSTFIX_PATTERN), match_postfix, parse_postfix),
         Rule::regex(CONSTANT,
                     "∞|infinity|inf|π|pi|τ|tau|e|true|false|undefined",
                     RuleOptions::new().only(),
                     parse_constant),
         Rule::regex(VARIABLE,
                     "[A-Za-zΑ-Ωα-ω]+(?:_[A-Za-zΑ-Ωα-ω0-9]+)*",
                     RuleOptions::new().only(),
                     parse_variable),
         Rule::regex(NUMBER,
                     r"(?:\d+\.?\d*|\.\d+)(?:[eE][+\-]?\d+)?",
                     RuleOptions::new().only(),
                     parse_number),]
}
