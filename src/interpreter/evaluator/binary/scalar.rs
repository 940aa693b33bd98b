use crate::ast::BinaryOperator;

/// Evaluates an arithmetic operator on two scalars.
///
/// Division follows IEEE rules, so `1 / 0` is infinity and `0 / 0` is NaN.
/// `%` keeps the sign of the dividend, `%%` the sign of the divisor, and `//`
/// rounds the quotient down.
///
/// # Parameters
/// - `op`: The arithmetic operator.
/// - `a`: Left operand.
/// - `b`: Right operand.
///
/// # Returns
/// The result, or NaN for operators that are not arithmetic.
///
/// # Example
/// ```
/// use exprule::{ast::BinaryOperator, interpreter::evaluator::binary::scalar::eval_scalar};
///
/// assert_eq!(eval_scalar(BinaryOperator::Rem, -7.0, 3.0), -1.0);
/// assert_eq!(eval_scalar(BinaryOperator::Mod, -7.0, 3.0), 2.0);
/// assert_eq!(eval_scalar(BinaryOperator::FloorDiv, -7.0, 2.0), -4.0);
/// assert_eq!(eval_scalar(BinaryOperator::Div, 1.0, 0.0), f64::INFINITY);
/// ```
#[must_use]
pub fn eval_scalar(op: BinaryOperator, a: f64, b: f64) -> f64 {
    use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Rem, Sub};

    match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => a / b,
        Rem => a % b,
        Mod => ((a % b) + b) % b,
        FloorDiv => (a / b).floor(),
        Pow => a.powf(b),
        _ => f64::NAN,
    }
}
