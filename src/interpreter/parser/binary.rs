use crate::{
    ast::{BinaryOperator, Expr},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

/// Builds a binary operator node from an operator occurrence.
///
/// The text left of the operator and the text right of it are parsed
/// independently. Which occurrence was picked decides associativity: rules
/// that search right to left split at the last operator, so `8 - 4 - 2`
/// becomes `(8 - 4) - 2`.
///
/// # Parameters
/// - `input`: The text the operator was found in.
/// - `token`: The operator and its offset into `input`.
/// - `parser`: Parser used for both operands.
///
/// # Returns
/// An `Expr::BinaryOp` node.
///
/// # Errors
/// - `SyntaxError` if the token is not a binary operator.
/// - Propagates any error from parsing either operand.
pub fn parse_binary(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    let op = BinaryOperator::from_symbol(&token.value).ok_or_else(|| ParseError::SyntaxError { input: input.to_string() })?;

    let left = parser.parse(&input[..token.index])?;
    let right = parser.parse(&input[token.end()..])?;

    Ok(Expr::binary(left, op, right))
}

/// Builds an assignment from an `=` occurrence.
///
/// The assignment rule searches left to right, so `a = b = 1` assigns `b = 1`
/// first and then `a`.
///
/// # Errors
/// - `SyntaxError` if the left side does not parse to a variable.
/// - Propagates any error from parsing either side.
pub fn parse_assignment(input: &str, token: &Token, parser: &mut Parser) -> ParseResult<Expr> {
    match parser.parse(&input[..token.index])? {
        Expr::Variable { name } => {
            let value = parser.parse(&input[token.end()..])?;
            Ok(Expr::assignment(name, value))
        },
        _ => Err(ParseError::SyntaxError { input: input.to_string() }),
    }
}
