use exprule::{
    ast::{BinaryOperator, CollectionKind, Expr, UnaryOperator},
    error::ParseError,
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

fn eval(src: &str) -> Expr {
    let mut parser = Parser::new();
    let mut context = Context::with_builtins();

    let tree = parser.parse(src)
                     .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"));
    tree.evaluate(&mut context)
        .unwrap_or_else(|e| panic!("Failed to evaluate {src:?}: {e}"))
}

fn assert_eval(src: &str, expected: &str) {
    let result = eval(src).to_string();
    assert_eq!(result, expected, "{src:?} evaluated to {result}, expected {expected}");
}

fn assert_close(src: &str, expected: f64) {
    let result = eval(src).as_number()
                          .unwrap_or_else(|| panic!("{src:?} did not evaluate to a number"));
    assert!((result - expected).abs() < 1e-9, "{src:?} evaluated to {result}, expected {expected}");
}

fn parse(src: &str) -> Expr {
    Parser::new().parse(src)
                 .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
}

#[test]
fn precedence_follows_rule_order() {
    assert_eval("2+3*4", "14");
    assert_eval("(2+3)*4", "20");
    assert_eval("2*3^2", "18");
    assert_eval("1 + 2 == 3", "1");
    assert_eval("1 < 2 == 1", "1");
    assert_eval("true || false && false", "1");
    assert_eval("1 ⊕ 1 || 0", "0");
}

#[test]
fn binary_operators_associate_left() {
    assert_eval("8-4-2", "2");
    assert_eval("16/4/2", "2");
    assert_eval("2^3^2", "64");

    let tree = parse("8 - 4 - 2");
    let Expr::BinaryOp { left, op, right } = tree else {
        panic!("expected a binary node");
    };
    assert_eq!(op, BinaryOperator::Sub);
    assert_eq!(*right, Expr::number(2.0));
    assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Sub, .. }));
}

#[test]
fn arithmetic_operators() {
    assert_eval("7 × 6", "42");
    assert_eval("9 ÷ 2", "4.5");
    assert_eval("-7 % 3", "-1");
    assert_eval("-7 %% 3", "2");
    assert_eval("-7 // 2", "-4");
    assert_eval("1/0", "∞");
    assert_eval("0/0", "undefined");
    assert_eval("1e+3 + .5", "1000.5");
}

#[test]
fn comparisons_and_logic() {
    assert_eval("3 >= 3", "1");
    assert_eval("3 ≥ 4", "0");
    assert_eval("2 ≠ 2", "0");
    assert_eval("2 <> 3", "1");
    assert_eval("2 != 3", "1");
    assert_eval("2 && 0", "0");
    assert_eval("0 || 3", "1");
    assert_eval("1 ∧ 1", "1");
    assert_eval("0 ∨ 0", "0");
}

#[test]
fn prefix_operators() {
    assert_eval("-2^2", "4");
    assert_eval("- -3", "3");
    assert_eval("--3", "2");
    assert_eval("++3", "4");
    assert_eval("+5", "5");
    assert_eval("~5", "-6");
    assert_eval("~0.5", "undefined");
    assert_eval("!0", "1");
    assert_eval("¬2", "0");

    assert!(matches!(parse("--3"),
                     Expr::UnaryOp { op: UnaryOperator::Decrement,
                                     prefix: true,
                                     .. }));
}

#[test]
fn prefix_operators_may_be_followed_by_spaces() {
    assert_eval("1 * - 2", "-2");
    assert_eval("1 - - 2", "3");
    assert_eval("2 ^ - 1", "0.5");
    assert_eval("3 + ! 0", "4");

    assert_eq!(parse("1 * - 2"), parse("1*-2"));
    assert_eq!(parse("1 - - 2"), parse("1 - -2"));
}

#[test]
fn postfix_operators() {
    assert_eval("5!", "120");
    assert_eval("7!!", "105");
    assert_eval("5!!!", "1307674368000");
    assert_eval("50%", "0.5");
    assert_eval("5#", "30");
    assert_eval("3++", "4");
    assert_eval("3--", "2");
    assert_eval("(-3)!", "undefined");
    assert_eval("(-3)!!", "undefined");
    assert_close("0.5!", 0.886_226_925_452_758);

    let tree = parse("5!!!");
    let Expr::UnaryOp { op, operand, .. } = tree else {
        panic!("expected a unary node");
    };
    assert_eq!(op, UnaryOperator::Factorial);
    assert!(matches!(*operand,
                     Expr::UnaryOp { op: UnaryOperator::DoubleFactorial,
                                     .. }));
}

#[test]
fn percent_binds_before_the_remainder_operator() {
    assert_eval("50% * 2", "1");
    assert_eval("7 % 3", "1");
}

#[test]
fn constants() {
    assert_close("π", std::f64::consts::PI);
    assert_close("pi", std::f64::consts::PI);
    assert_close("e", std::f64::consts::E);
    assert_eval("τ / 2 == π", "1");
    assert_eval("∞", "∞");
    assert_eval("-inf", "-∞");
    assert_eval("true + true", "2");
    assert_eval("undefined + 1", "undefined");
}

#[test]
fn unknown_names_are_undefined() {
    assert_eval("y + 1", "undefined");
    assert_eval("nope(1)", "undefined");
    assert_eval("-y", "undefined");
}

#[test]
fn builtin_functions() {
    assert_eval("sqrt(16)", "4");
    assert_eval("sqrt(-1)", "undefined");
    assert_eval("abs(-5)", "5");
    assert_eval("round(3.7)", "4");
    assert_eval("sign(-42)", "-1");
    assert_eval("sign(0)", "0");
    assert_eval("log(100)", "2");
    assert_eval("log(8, 2)", "3");
    assert_eval("max(3, 9, 4)", "9");
    assert_eval("min([3, 9, 4])", "3");
    assert_eval("sin(0)", "0");
    assert_eval("sqrt(1, 2)", "undefined");
    assert_eval("min()", "undefined");
    assert_close("ln(e)", 1.0);
}

#[test]
fn function_call_arguments_are_split_at_the_top_level() {
    let tree = parse("f(1,(2,3),4)");
    let Expr::FunctionCall { name, arguments } = tree else {
        panic!("expected a function call");
    };

    assert_eq!(name, "f");
    assert_eq!(arguments.len(), 3);
    assert_eq!(arguments[1],
               Expr::tuple(vec![Expr::number(2.0), Expr::number(3.0)]));

    assert_eq!(parse("f()"), Expr::function_call("f", vec![]));
    assert_eq!(parse("max(1, [2, 3])").to_string(), "max(1, [2, 3])");
}

#[test]
fn groups() {
    assert_eq!(parse("(1)"), Expr::parentheses(Expr::number(1.0)));
    assert_eq!(parse("()"), Expr::tuple(vec![]));
    assert_eq!(parse("[]"), Expr::vector(vec![]));
    assert!(matches!(parse("[1, [2, 3]]"),
                     Expr::Collection { kind: CollectionKind::Vector,
                                        .. }));
    assert_eval("((2))", "2");
    assert_eval("(1, 2) + 1", "(2, 3)");
}

#[test]
fn unbalanced_groups_are_rejected() {
    for src in ["(1+2", "1+2)", "[1, 2", "(1]", "f(1))"] {
        let result = Parser::new().parse(src);
        assert!(matches!(result, Err(ParseError::UnbalancedParentheses { .. })),
                "{src:?} gave {result:?}");
    }
}

#[test]
fn malformed_input_is_a_syntax_error() {
    for src in ["", "1 +", "* 2", "3 = 4", "2 3", "x y"] {
        let result = Parser::new().parse(src);
        assert!(matches!(result, Err(ParseError::SyntaxError { .. })),
                "{src:?} gave {result:?}");
    }
}

#[test]
fn display_reparses_to_the_same_tree() {
    let sources = ["2*(3+4)",
                   "-x^2",
                   "a - (b - c)",
                   "f(1, (2, 3), [4])",
                   "x = y = 3",
                   "!x",
                   "-(-3)",
                   "1 != 2",
                   "x ≤ 3",
                   "2 × 3",
                   "50% + 1",
                   "[1, 2] == [1, 2]",
                   "()",
                   "f()",
                   "π * r^2",
                   "a && b || c",
                   "1e3",
                   "0.1 + .25",
                   "7 %% 3 // 2",
                   "a ⊕ b",
                   "~x++"];

    for src in sources {
        let tree = parse(src);
        let shown = tree.to_string();
        assert_eq!(parse(&shown), tree, "{src:?} displayed as {shown:?}");
    }
}

#[test]
fn step_simplify_rewrites_once() {
    let tree = parse("(1 + 2) * x");

    let once = tree.step_simplify();
    assert_eq!(once.to_string(), "(3) * x");

    let twice = once.step_simplify();
    assert_eq!(twice.to_string(), "3 * x");
    assert_eq!(twice.step_simplify(), twice);
}

#[test]
fn simplify_is_idempotent() {
    let sources = ["(1 + 2) * x",
                   "2 * 3 + y + π",
                   "-(x + 1)",
                   "[1, 2] * π",
                   "f(2 + 2, (x))",
                   "((y))",
                   "[x, 1] == [x, 1]",
                   "a = 2 * 3"];

    for src in sources {
        let once = parse(src).simplify().unwrap();
        assert_eq!(once.simplify().unwrap(), once, "{src:?}");
    }
}

#[test]
fn simplify_keeps_symbols() {
    let simplify = |src: &str| parse(src).simplify().unwrap().to_string();

    assert_eq!(simplify("2 * 3 + y + π"), "6 + y + π");
    assert_eq!(simplify("f(2 + 2, (x))"), "f(4, x)");
    assert_eq!(simplify("-(x + 1)"), "-(x + 1)");
    assert_eq!(simplify("((-3))"), "-3");
    assert_eq!(simplify("[1, 2] * π"), "[1 * π, 2 * π]");
    assert_eq!(simplify("a = 2 * 3"), "a = 6");
}

#[test]
fn step_evaluate_reduces_leftmost_first() {
    let mut context = Context::new();
    let tree = parse("(1 + 2) * (3 + 4)");

    let steps: Vec<String> =
        std::iter::successors(Some(tree), |t| {
            let next = t.step_evaluate(&mut context);
            (next != *t).then_some(next)
        }).map(|t| t.to_string())
          .collect();

    assert_eq!(steps,
               vec!["(1 + 2) * (3 + 4)",
                    "(3) * (3 + 4)",
                    "3 * (3 + 4)",
                    "3 * (7)",
                    "3 * 7",
                    "21"]);
}

#[test]
fn evaluating_does_not_touch_the_tree() {
    let mut context = Context::new();
    let tree = parse("x = 1 + 1");
    let copy = tree.clone();

    tree.evaluate(&mut context).unwrap();

    assert_eq!(tree, copy);
}
