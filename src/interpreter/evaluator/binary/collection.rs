use crate::{
    ast::{BinaryOperator, CollectionKind, Expr},
    interpreter::evaluator::binary::comparison::equality_op_result,
    util::num::bool_to_f64,
};

/// Combines two collections element by element.
///
/// The result has the kind of the left collection and holds one unreduced
/// binary node per pair; later steps fold them. Collections of different
/// lengths yield the undefined sentinel.
///
/// # Example
/// ```
/// use exprule::{
///     ast::{BinaryOperator, CollectionKind, Expr},
///     interpreter::evaluator::binary::collection::zip,
/// };
///
/// let left = [Expr::number(1.0), Expr::number(2.0)];
/// let right = [Expr::number(7.0), Expr::number(8.0)];
/// let zipped = zip(CollectionKind::Vector, &left, BinaryOperator::Add, &right);
///
/// assert_eq!(zipped.to_string(), "[1 + 7, 2 + 8]");
/// assert!(zip(CollectionKind::Vector, &left, BinaryOperator::Add, &right[..1]).is_undefined());
/// ```
#[must_use]
pub fn zip(kind: CollectionKind, left: &[Expr], op: BinaryOperator, right: &[Expr]) -> Expr {
    if left.len() != right.len() {
        return Expr::UNDEFINED;
    }

    Expr::Collection { kind,
                       elements: left.iter()
                                     .zip(right)
                                     .map(|(l, r)| Expr::binary(l.clone(), op, r.clone()))
                                     .collect() }
}

/// Applies a scalar to every element of a collection, keeping the side the
/// scalar was written on.
///
/// # Example
/// ```
/// use exprule::{
///     ast::{BinaryOperator, CollectionKind, Expr},
///     interpreter::evaluator::binary::collection::broadcast,
/// };
///
/// let elements = [Expr::number(1.0), Expr::number(2.0)];
/// let scalar = Expr::number(10.0);
///
/// assert_eq!(broadcast(CollectionKind::Vector, &elements, BinaryOperator::Sub, &scalar, false).to_string(),
///            "[1 - 10, 2 - 10]");
/// assert_eq!(broadcast(CollectionKind::Vector, &elements, BinaryOperator::Sub, &scalar, true).to_string(),
///            "[10 - 1, 10 - 2]");
/// ```
#[must_use]
pub fn broadcast(kind: CollectionKind,
                 elements: &[Expr],
                 op: BinaryOperator,
                 scalar: &Expr,
                 scalar_on_left: bool)
                 -> Expr {
    let pair = |element: &Expr| {
        if scalar_on_left {
            Expr::binary(scalar.clone(), op, element.clone())
        } else {
            Expr::binary(element.clone(), op, scalar.clone())
        }
    };

    Expr::Collection { kind,
                       elements: elements.iter().map(pair).collect() }
}

/// Compares two whole collections with `==` or `!=`, giving `1` or `0`.
///
/// Collections of different lengths are unequal. Elements are compared as
/// numbers, recursing into nested collections; `None` means some element is
/// not a number yet, so the comparison cannot be decided.
///
/// # Example
/// ```
/// use exprule::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::binary::collection::equality,
/// };
///
/// let a = [Expr::number(1.0), Expr::number(2.0)];
/// let b = [Expr::number(1.0), Expr::number(3.0)];
///
/// assert_eq!(equality(&a, BinaryOperator::Equal, &a), Some(Expr::number(1.0)));
/// assert_eq!(equality(&a, BinaryOperator::NotEqual, &b), Some(Expr::number(1.0)));
/// assert_eq!(equality(&a, BinaryOperator::Equal, &a[..1]), Some(Expr::number(0.0)));
/// assert_eq!(equality(&a, BinaryOperator::Equal, &[Expr::variable("x"), Expr::number(2.0)]), None);
/// ```
#[must_use]
pub fn equality(left: &[Expr], op: BinaryOperator, right: &[Expr]) -> Option<Expr> {
    let is_equal = numeric_eq(left, right)?;
    equality_op_result(op, is_equal).map(|result| Expr::number(bool_to_f64(result)))
}

#[allow(clippy::float_cmp)]
fn numeric_eq(left: &[Expr], right: &[Expr]) -> Option<bool> {
    if left.len() != right.len() {
        return Some(false);
    }

    let mut equal = true;
    for (l, r) in left.iter().zip(right) {
        equal &= match (l, r) {
            (Expr::Number { value: a }, Expr::Number { value: b }) => a.0 == b.0,
            (Expr::Collection { elements: a, .. }, Expr::Collection { elements: b, .. }) => numeric_eq(a, b)?,
            (Expr::Number { .. }, Expr::Collection { .. })
            | (Expr::Collection { .. }, Expr::Number { .. }) => false,
            _ => return None,
        };
    }
    Some(equal)
}
