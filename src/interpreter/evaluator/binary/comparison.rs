use crate::{ast::BinaryOperator, util::num::bool_to_f64};

/// Maps an equality-style operator and a boolean equality result
/// to the final truth value.
///
/// Shared by scalar comparison and whole-collection equality, which invert
/// the result for `NotEqual`. Returns `None` for any other operator.
#[must_use]
pub fn equality_op_result(op: BinaryOperator, is_equal: bool) -> Option<bool> {
    match op {
        BinaryOperator::Equal => Some(is_equal),
        BinaryOperator::NotEqual => Some(!is_equal),
        _ => None,
    }
}

/// Evaluates a comparison of two scalars to `1` or `0`.
///
/// # Example
/// ```
/// use exprule::{ast::BinaryOperator, interpreter::evaluator::binary::comparison::eval_comparison};
///
/// assert_eq!(eval_comparison(BinaryOperator::LessEqual, 2.0, 2.0), 1.0);
/// assert_eq!(eval_comparison(BinaryOperator::NotEqual, 2.0, 2.0), 0.0);
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn eval_comparison(op: BinaryOperator, a: f64, b: f64) -> f64 {
    use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};

    let result = match op {
        Less => a < b,
        Greater => a > b,
        LessEqual => a <= b,
        GreaterEqual => a >= b,
        _ => match equality_op_result(op, a == b) {
            Some(result) => result,
            None => return f64::NAN,
        },
    };

    bool_to_f64(result)
}
