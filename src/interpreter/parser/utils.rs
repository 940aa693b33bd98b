use log::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Grouping, Token, tokenize},
        parser::{
            core::{ParseResult, Parser},
            grammar::{Grammar, VARIABLE, WITH_PARENTHESES},
        },
    },
};

fn syntax_error(input: &str) -> ParseError {
    ParseError::SyntaxError { input: input.to_string() }
}

/// Byte range of the one group that makes up all of `input` apart from
/// surrounding whitespace, delimiters included. `None` if `input` does not
/// start with `open` or holds more than one group.
fn enclosing_group(input: &str, open: char) -> Option<(usize, usize)> {
    let start = input.len() - input.trim_start().len();
    let end = input.trim_end().len();
    let group = input.get(start..end)?;

    if !group.starts_with(open) {
        return None;
    }

    let hidden = tokenize(group, Grouping::Brackets).ok()?;
    (hidden.text == "[0]").then_some((start, end))
}

/// The text between the delimiters of a group.
fn interior(group: &str) -> &str {
    &group[1..group.len() - 1]
}

/// Parses a comma-separated list of expressions.
///
/// Commas inside nested groups do not split, so `1, (2, 3), f(4, 5)` has
/// three items. An interior holding only whitespace is the empty list. Each
/// item is parsed on its own.
///
/// # Parameters
/// - `list`: The text between a pair of delimiters.
/// - `parser`: Parser used for every item.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the groups inside `list` are unbalanced,
/// - an item is empty or fails to parse.
pub(in crate::interpreter::parser) fn parse_comma_separated(list: &str,
                                                            parser: &mut Parser)
                                                            -> ParseResult<Vec<Expr>> {
    let hidden = tokenize(list, Grouping::Brackets)?;

    if hidden.text.trim().is_empty() {
        return Ok(Vec::new());
    }

    hidden.text
          .split(',')
          .map(|item| parser.parse(&hidden.restore(item)))
          .collect()
}

/// Matches an identifier followed by exactly one parenthesized group.
///
/// The token is the function name.
///
/// ## Example
/// ```
/// use exprule::interpreter::parser::{grammar::Grammar, utils::match_function_call};
///
/// let grammar = Grammar::default();
///
/// assert_eq!(match_function_call(" max(1, (2))", &grammar).unwrap().value, "max");
/// assert!(match_function_call("f(1) + g(2)", &grammar).is_none());
/// ```
#[must_use]
pub fn match_function_call(input: &str, grammar: &Grammar) -> Option<Token> {
    let variable = grammar.expand(&format!("{{{VARIABLE}}}"))?;
    let call = grammar.regex(&format!(r"^\s*(?P<name>{variable})\s*\("))?;
    let name = call.captures(input)?.name("name")?;

    enclosing_group(&input[name.end()..], '(')?;

    Some(Token::new(name.as_str(), name.start()))
}

/// Builds a function call. Arguments are split on top-level commas; `f()` has
/// none.
///
/// # Errors
/// - `SyntaxError` if no parenthesized group follows the name.
/// - Propagates any error from parsing the arguments.
pub fn parse_function_call(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let rest = &input[token.end()..];
    let (start, end) = enclosing_group(rest, '(').ok_or_else(|| syntax_error(input))?;
    let arguments = parse_comma_separated(interior(&rest[start..end]), parser)?;

    Ok(Expr::function_call(token.value.as_str(), arguments))
}

/// Token for the group spanning all of `input`, if there is one.
fn group_token(input: &str, open: char) -> Option<Token> {
    let (start, end) = enclosing_group(input, open)?;
    Some(Token::new(&input[start..end], start))
}

/// Matches one parenthesized group whose interior has a top-level comma, or
/// the empty group `()`.
///
/// ## Example
/// ```
/// use exprule::interpreter::parser::{grammar::Grammar, utils::match_tuple};
///
/// let grammar = Grammar::default();
///
/// assert!(match_tuple("(2, 3)", &grammar).is_some());
/// assert!(match_tuple("()", &grammar).is_some());
/// assert!(match_tuple("(f(2, 3))", &grammar).is_none());
/// ```
#[must_use]
pub fn match_tuple(input: &str, _grammar: &Grammar) -> Option<Token> {
    let token = group_token(input, '(')?;
    let list = interior(&token.value);

    let is_tuple = list.trim().is_empty()
                   || tokenize(list, Grouping::Brackets).is_ok_and(|hidden| hidden.text.contains(','));

    is_tuple.then_some(token)
}

/// Builds a tuple from the group's comma-separated elements.
///
/// # Errors
/// Propagates any error from parsing the elements.
pub fn parse_tuple(_input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::tuple(parse_comma_separated(interior(&token.value), parser)?))
}

/// Matches exactly one parenthesized group.
#[must_use]
pub fn match_parentheses(input: &str, _grammar: &Grammar) -> Option<Token> {
    group_token(input, '(')
}

/// Builds a parentheses node around the parsed interior.
///
/// # Errors
/// Propagates any error from parsing the interior.
pub fn parse_parentheses(_input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::parentheses(parser.parse(interior(&token.value))?))
}

/// Matches exactly one bracketed group.
#[must_use]
pub fn match_vector(input: &str, _grammar: &Grammar) -> Option<Token> {
    group_token(input, '[')
}

/// Builds a vector from the group's comma-separated elements.
///
/// # Errors
/// Propagates any error from parsing the elements.
pub fn parse_vector(_input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::vector(parse_comma_separated(interior(&token.value), parser)?))
}

/// Parses input that contains groups but is not a single group.
///
/// The groups are hidden behind placeholders and every other rule is tried on
/// the hidden text, in order. The first match is translated back to an offset
/// into `input`, and that rule's builder runs on the original text. This is
/// how operators between groups are found without looking inside them.
///
/// # Errors
/// - `UnbalancedParentheses` if the groups do not balance.
/// - `SyntaxError` if no rule matches the hidden text.
/// - Propagates any error from the winning builder.
pub fn parse_with_parentheses(input: &str, _token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let hidden = tokenize(input, Grouping::Brackets)?;

    let grammar = parser.grammar();
    let winner = grammar.rules()
                        .iter()
                        .filter(|rule| rule.name != WITH_PARENTHESES)
                        .find_map(|rule| {
                            let build = rule.builder()?;
                            let token = rule.find(&hidden.text, grammar)?;
                            Some((rule.name.clone(), build, token))
                        });
    let Some((name, build, token)) = winner else {
        return Err(syntax_error(input));
    };

    let restored = Token::new(hidden.restore(&token.value), hidden.detokenize_index(token.index));
    trace!("{name} matched {:?} at {} behind placeholders", restored.value, restored.index);

    build(input, &restored, parser)
}
