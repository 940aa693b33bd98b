use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::evaluator::utils::{double_factorial, factorial, primorial, truthy},
    util::num::{bool_to_f64, f64_to_i64_checked, i64_to_f64_checked},
};

/// Applies a unary operator to a scalar.
///
/// Supported operations:
/// - `Positive`, `Negate`: identity and negation.
/// - `Not`: `1` for zero, `0` for anything else.
/// - `Complement`: `-x - 1` for integral `x`, NaN otherwise.
/// - `Increment`, `Decrement`: `x + 1` and `x - 1`. Nothing is written back.
/// - `Factorial`: Γ(x + 1) for non-integers, NaN for negative integers.
/// - `DoubleFactorial`, `Primorial`: non-negative integers only.
/// - `Percent`: `x / 100`.
///
/// ## Example
/// ```
/// use exprule::{ast::UnaryOperator, interpreter::evaluator::unary::apply_unary};
///
/// assert_eq!(apply_unary(UnaryOperator::Complement, 5.0), -6.0);
/// assert_eq!(apply_unary(UnaryOperator::Not, 0.0), 1.0);
/// assert_eq!(apply_unary(UnaryOperator::DoubleFactorial, 7.0), 105.0);
/// assert!(apply_unary(UnaryOperator::Complement, 0.5).is_nan());
/// ```
#[must_use]
pub fn apply_unary(op: UnaryOperator, x: f64) -> f64 {
    match op {
        UnaryOperator::Positive => x,
        UnaryOperator::Negate => -x,
        UnaryOperator::Not => bool_to_f64(!truthy(x)),
        UnaryOperator::Complement => f64_to_i64_checked(x).and_then(|n| i64_to_f64_checked(!n))
                                                          .unwrap_or(f64::NAN),
        UnaryOperator::Increment => x + 1.0,
        UnaryOperator::Decrement => x - 1.0,
        UnaryOperator::Factorial => factorial(x),
        UnaryOperator::DoubleFactorial => double_factorial(x),
        UnaryOperator::Percent => x / 100.0,
        UnaryOperator::Primorial => primorial(x),
    }
}

/// Folds a unary node whose operand is already reduced.
///
/// Numbers fold to a number, the undefined sentinel propagates, and a
/// collection becomes a collection of the operator applied to each element.
/// Anything else cannot fold yet and yields `None`.
pub(crate) fn fold_unary(op: UnaryOperator, prefix: bool, operand: &Expr) -> Option<Expr> {
    match operand {
        _ if operand.is_undefined() => Some(Expr::UNDEFINED),
        Expr::Number { value } => Some(Expr::number(apply_unary(op, value.0))),
        Expr::Collection { kind, elements } => {
            Some(Expr::Collection { kind:     *kind,
                                    elements: elements.iter()
                                                      .map(|element| Expr::unary(op, prefix, element.clone()))
                                                      .collect(), })
        },
        _ => None,
    }
}
