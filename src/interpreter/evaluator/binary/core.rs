use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::evaluator::binary::{
        collection::{broadcast, equality, zip},
        comparison::eval_comparison,
        logic::eval_logic,
        scalar::eval_scalar,
    },
    util::num::bool_to_f64,
};

/// Applies a binary operator to two scalars.
///
/// Routes logical operators to `eval_logic`, relational and equality
/// operators to `eval_comparison` and everything else to `eval_scalar`.
///
/// # Example
/// ```
/// use exprule::{ast::BinaryOperator, interpreter::evaluator::binary::core::apply_binary};
///
/// assert_eq!(apply_binary(BinaryOperator::Pow, 2.0, 10.0), 1024.0);
/// assert_eq!(apply_binary(BinaryOperator::Greater, 2.0, 10.0), 0.0);
/// assert_eq!(apply_binary(BinaryOperator::Or, 0.0, -3.0), 1.0);
/// ```
#[must_use]
pub fn apply_binary(op: BinaryOperator, a: f64, b: f64) -> f64 {
    use BinaryOperator::{And, Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Or, Xor};

    match op {
        Or | Xor | And => eval_logic(op, a, b),
        Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => eval_comparison(op, a, b),
        _ => eval_scalar(op, a, b),
    }
}

/// Folds a binary node whose operands are both reduced.
///
/// - Either operand undefined: the undefined sentinel.
/// - Two numbers: the computed number.
/// - Two collections: `==`/`!=` compare them whole, any other operator zips
///   them element-wise.
/// - A collection and a number or constant: `==`/`!=` are never equal,
///   any other operator broadcasts the scalar.
///
/// Returns `None` when the node cannot fold. An undecidable collection
/// comparison is undefined when `evaluating` and left alone otherwise.
pub(crate) fn fold_binary(left: &Expr, op: BinaryOperator, right: &Expr, evaluating: bool) -> Option<Expr> {
    if left.is_undefined() || right.is_undefined() {
        return Some(Expr::UNDEFINED);
    }

    match (left, right) {
        (Expr::Number { value: a }, Expr::Number { value: b }) => Some(Expr::number(apply_binary(op, a.0, b.0))),
        (Expr::Collection { kind, elements: a }, Expr::Collection { elements: b, .. }) => match op {
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                equality(a, op, b).or_else(|| evaluating.then_some(Expr::UNDEFINED))
            },
            _ => Some(zip(*kind, a, op, b)),
        },
        (Expr::Collection { .. }, Expr::Number { .. } | Expr::Constant { .. })
        | (Expr::Number { .. } | Expr::Constant { .. }, Expr::Collection { .. })
            if matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) =>
        {
            Some(Expr::number(bool_to_f64(op == BinaryOperator::NotEqual)))
        },
        (Expr::Collection { kind, elements }, scalar @ (Expr::Number { .. } | Expr::Constant { .. })) => {
            Some(broadcast(*kind, elements, op, scalar, false))
        },
        (scalar @ (Expr::Number { .. } | Expr::Constant { .. }), Expr::Collection { kind, elements }) => {
            Some(broadcast(*kind, elements, op, scalar, true))
        },
        _ => None,
    }
}
