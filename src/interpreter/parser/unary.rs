use crate::{
    ast::{ConstantKind, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Parser},
            grammar::Grammar,
        },
    },
};

fn syntax_error(input: &str) -> ParseError {
    ParseError::SyntaxError { input: input.to_string() }
}

/// Builds a prefix operator node. Everything after the operator is its
/// operand.
///
/// # Errors
/// - `SyntaxError` if the token is not a prefix operator.
/// - Propagates any error from parsing the operand.
pub fn parse_prefix(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let op = UnaryOperator::from_symbol(&token.value, true).ok_or_else(|| syntax_error(input))?;
    let operand = parser.parse(&input[token.end()..])?;

    Ok(Expr::unary(op, true, operand))
}

/// Finds the postfix operator at the end of `input`.
///
/// A trailing run of `!` is read in pairs: an even run ends in `!!`, an odd
/// run in `!`, so `5!!!` is `(5!!)!`. Something must precede the operator.
///
/// ## Example
/// ```
/// use exprule::interpreter::parser::{grammar::Grammar, unary::match_postfix};
///
/// let grammar = Grammar::default();
///
/// assert_eq!(match_postfix("5!!!", &grammar).unwrap().value, "!");
/// assert_eq!(match_postfix("5!!", &grammar).unwrap().value, "!!");
/// assert_eq!(match_postfix("x++ ", &grammar).unwrap().index, 1);
/// assert!(match_postfix("!", &grammar).is_none());
/// ```
#[must_use]
pub fn match_postfix(input: &str, _grammar: &Grammar) -> Option<Token> {
    let trimmed = input.trim_end();
    let bangs = trimmed.len() - trimmed.trim_end_matches('!').len();

    let symbol = match bangs {
        0 => ["++", "--", "%", "#"].into_iter().find(|symbol| trimmed.ends_with(symbol))?,
        n if n % 2 == 0 => "!!",
        _ => "!",
    };
    let index = trimmed.len() - symbol.len();

    if trimmed[..index].trim().is_empty() {
        return None;
    }

    Some(Token::new(symbol, index))
}

/// Builds a postfix operator node from everything before the operator.
///
/// # Errors
/// - `SyntaxError` if the token is not a postfix operator.
/// - Propagates any error from parsing the operand.
pub fn parse_postfix(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let op = UnaryOperator::from_symbol(&token.value, false).ok_or_else(|| syntax_error(input))?;
    let operand = parser.parse(&input[..token.index])?;

    Ok(Expr::unary(op, false, operand))
}

/// Builds a constant leaf.
pub fn parse_constant(input: &str, token: &Token, _parser: &mut Parser) -> ParseResult<Expr> {
    ConstantKind::from_symbol(&token.value).map(Expr::constant)
                                           .ok_or_else(|| syntax_error(input))
}

/// Builds a variable leaf.
pub fn parse_variable(_input: &str, token: &Token, _parser: &mut Parser) -> ParseResult<Expr> {
    Ok(Expr::variable(token.value.as_str()))
}

/// Builds a number leaf.
///
/// # Errors
/// `SyntaxError` if the literal does not convert to a float.
pub fn parse_number(input: &str, token: &Token, _parser: &mut Parser) -> ParseResult<Expr> {
    token.value
         .parse::<f64>()
         .map(Expr::number)
         .map_err(|_| syntax_error(input))
}
