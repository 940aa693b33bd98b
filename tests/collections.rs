use exprule::{
    ast::{CollectionKind, Expr},
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

fn eval(src: &str) -> String {
    Parser::new().parse(src)
                 .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
                 .evaluate(&mut Context::with_builtins())
                 .unwrap_or_else(|e| panic!("Failed to evaluate {src:?}: {e}"))
                 .to_string()
}

fn simplify(src: &str) -> String {
    Parser::new().parse(src)
                 .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
                 .simplify()
                 .unwrap_or_else(|e| panic!("Failed to simplify {src:?}: {e}"))
                 .to_string()
}

#[test]
fn scalar_broadcasts_on_either_side() {
    assert_eq!(eval("[1,2,3]+5"), "[6, 7, 8]");
    assert_eq!(eval("10 - [1, 2]"), "[9, 8]");
    assert_eq!(eval("[2, 4] / 2"), "[1, 2]");
    assert_eq!(eval("[1, 2] ^ 2"), "[1, 4]");
    assert_eq!(eval("[1, 2] * π > 4"), "[0, 1]");
}

#[test]
fn equal_lengths_combine_element_wise() {
    assert_eq!(eval("[1, 2] + [10, 20]"), "[11, 22]");
    assert_eq!(eval("[1, 2] < [2, 1]"), "[1, 0]");
    assert_eq!(eval("(1, 2) * [3, 4]"), "(3, 8)");
    assert_eq!(eval("[[1, 2], [3]] + [1, 2]"), "[[2, 3], [5]]");
}

#[test]
fn different_lengths_are_undefined() {
    assert_eq!(eval("[1, 2] + [1, 2, 3]"), "undefined");
    assert_eq!(eval("[] * [1]"), "undefined");
}

#[test]
fn whole_collection_equality() {
    assert_eq!(eval("[1,2,3]==[1,2,3]"), "1");
    assert_eq!(eval("[1,2,3]!=[1,2,3]"), "0");
    assert_eq!(eval("[1,2,3]==[1,2,4]"), "0");
    assert_eq!(eval("[1,2]==[1,2,3]"), "0");
    assert_eq!(eval("[1,2]!=[1,2,3]"), "1");
    assert_eq!(eval("[[1], 2] == [[1], 2]"), "1");
    assert_eq!(eval("[1, 1 + 1] == [1, 2]"), "1");
    assert_eq!(eval("(1, 2) == [1, 2]"), "1");
    assert_eq!(eval("[] == []"), "1");
}

#[test]
fn collection_never_equals_a_scalar() {
    assert_eq!(eval("[1,2,3]==5"), "0");
    assert_eq!(eval("[1,2,3]!=5"), "1");
    assert_eq!(eval("5==[5]"), "0");
    assert_eq!(eval("(1, 2) ≠ π"), "1");
    assert_eq!(simplify("[1, 2] == π"), "0");
    assert_eq!(eval("[1, 2] <= 1"), "[1, 0]");
}

#[test]
fn undecidable_equality() {
    assert_eq!(eval("[x, 1] == [x, 1]"), "undefined");
    assert_eq!(simplify("[x, 1] == [x, 1]"), "[x, 1] == [x, 1]");
    assert_eq!(simplify("[1, 2] == [1, 2]"), "1");
}

#[test]
fn unary_operators_map_over_elements() {
    assert_eq!(eval("-[1, -2]"), "[-1, 2]");
    assert_eq!(eval("[3, 4]!"), "[6, 24]");
    assert_eq!(eval("!(0, 2)"), "(1, 0)");
    assert_eq!(simplify("-[1, x]"), "[-1, -x]");
}

#[test]
fn undefined_propagates_through_collections() {
    assert_eq!(eval("[1, 2] + undefined"), "undefined");
    assert_eq!(eval("[1, y] * 2"), "[2, undefined]");
}

#[test]
fn collections_keep_their_kind() {
    let tree = Parser::new().parse("(1, 2) + 1")
                            .unwrap()
                            .evaluate(&mut Context::new())
                            .unwrap();

    assert!(matches!(tree,
                     Expr::Collection { kind: CollectionKind::Tuple,
                                        .. }));
    assert_eq!(tree.as_collection().map(<[Expr]>::len), Some(2));
}
