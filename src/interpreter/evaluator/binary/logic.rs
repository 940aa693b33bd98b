use crate::{ast::BinaryOperator, interpreter::evaluator::utils::truthy, util::num::bool_to_f64};

/// Evaluates a logical operator on the truthiness of two scalars.
///
/// Zero is false and every other value is true. The result is `1` or `0`.
///
/// # Example
/// ```
/// use exprule::{ast::BinaryOperator, interpreter::evaluator::binary::logic::eval_logic};
///
/// assert_eq!(eval_logic(BinaryOperator::Xor, 2.0, 0.0), 1.0);
/// assert_eq!(eval_logic(BinaryOperator::And, 2.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn eval_logic(op: BinaryOperator, a: f64, b: f64) -> f64 {
    use BinaryOperator::{And, Or, Xor};

    match op {
        And => bool_to_f64(truthy(a) && truthy(b)),
        Xor => bool_to_f64(truthy(a) ^ truthy(b)),
        Or => bool_to_f64(truthy(a) || truthy(b)),
        _ => f64::NAN,
    }
}
