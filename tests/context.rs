use exprule::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, MAX_ITERATIONS},
            function::core::{Arity, Function},
        },
        parser::core::Parser,
    },
};

fn run(parser: &mut Parser, context: &mut Context, src: &str) -> Expr {
    parser.parse(src)
          .unwrap_or_else(|e| panic!("Failed to parse {src:?}: {e}"))
          .evaluate(context)
          .unwrap_or_else(|e| panic!("Failed to evaluate {src:?}: {e}"))
}

#[test]
fn assignment_writes_the_context() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    assert_eq!(run(&mut parser, &mut context, "x=5"), Expr::number(5.0));
    assert_eq!(context.lookup("x"), Expr::number(5.0));
    assert_eq!(run(&mut parser, &mut context, "x * 2"), Expr::number(10.0));

    assert_eq!(run(&mut parser, &mut context, "x = x + 1"), Expr::number(6.0));
    assert_eq!(context.lookup("x"), Expr::number(6.0));
}

#[test]
fn chained_assignment() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    assert_eq!(run(&mut parser, &mut context, "a = b = 2"), Expr::number(2.0));
    assert_eq!(context.lookup("a"), Expr::number(2.0));
    assert_eq!(context.lookup("b"), Expr::number(2.0));
}

#[test]
fn assignment_inside_an_expression() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    assert_eq!(run(&mut parser, &mut context, "(y = 3) * 2"), Expr::number(6.0));
    assert_eq!(context.lookup("y"), Expr::number(3.0));
}

#[test]
fn simplify_never_assigns() {
    let mut parser = Parser::new();
    let tree = parser.parse("x = 1 + 1").unwrap();

    assert_eq!(tree.simplify().unwrap().to_string(), "x = 2");
}

#[test]
fn collections_can_be_stored() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    run(&mut parser, &mut context, "v = [1, 2, 3]");
    assert_eq!(run(&mut parser, &mut context, "v * 2").to_string(), "[2, 4, 6]");
    assert_eq!(run(&mut parser, &mut context, "v == [1, 2, 3]"), Expr::number(1.0));
}

#[test]
fn variable_table() {
    let mut context = Context::new();

    assert!(context.set_variable("x", Expr::number(1.0)));
    assert!(context.set_variable("x", Expr::number(2.0)));
    assert!(context.contains_variable("x"));
    assert_eq!(context.variables(), vec!["x"]);

    assert!(context.remove_variable("x"));
    assert!(!context.remove_variable("x"));
    assert!(!context.contains_variable("x"));
    assert!(context.lookup("x").is_undefined());
}

#[test]
fn variable_queries_cover_functions() {
    let mut context = Context::with_builtins();

    assert!(context.contains_variable("sin"));
    assert!(context.remove_variable("sin"));
    assert!(!context.contains_function("sin"));
}

#[test]
fn function_names_look_up_to_themselves() {
    let mut parser = Parser::new();
    let mut context = Context::with_builtins();

    assert_eq!(context.lookup("sqrt"), Expr::variable("sqrt"));
    assert_eq!(run(&mut parser, &mut context, "sqrt"), Expr::variable("sqrt"));
    assert_eq!(run(&mut parser, &mut context, "sqrt(4) + 1"), Expr::number(3.0));

    context.set_variable("sqrt", Expr::number(7.0));
    assert_eq!(context.lookup("sqrt"), Expr::number(7.0));

    assert!(context.remove_variable("sqrt"));
    assert_eq!(context.lookup("sqrt"), Expr::variable("sqrt"));
}

#[test]
fn cloned_contexts_are_independent() {
    let mut context = Context::new();
    context.set_variable("x", Expr::number(1.0));

    let mut copy = context.clone();
    copy.set_variable("x", Expr::number(2.0));
    copy.set_variable("y", Expr::number(3.0));

    assert_eq!(context.lookup("x"), Expr::number(1.0));
    assert!(!context.contains_variable("y"));
}

#[test]
fn expression_functions() {
    let mut parser = Parser::new();
    let mut context = Context::with_builtins();

    let hypot = Function::expression(vec!["a".to_string(), "b".to_string()],
                                     parser.parse("sqrt(a^2 + b^2)").unwrap());
    assert!(context.set_function("hypot", hypot));
    assert_eq!(context.functions().len(), 21);

    assert_eq!(run(&mut parser, &mut context, "hypot(3, 4)"), Expr::number(5.0));
    assert!(run(&mut parser, &mut context, "hypot(3)").is_undefined());
    assert!(context.lookup("a").is_undefined());
}

#[test]
fn expression_functions_see_the_caller() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    context.set_function("scale",
                         Function::expression(vec!["x".to_string()], parser.parse("x * k").unwrap()));
    run(&mut parser, &mut context, "k = 10");

    assert_eq!(run(&mut parser, &mut context, "scale(4)"), Expr::number(40.0));
}

#[test]
fn runaway_recursion_is_undefined() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    context.set_function("loop",
                         Function::expression(vec!["x".to_string()], parser.parse("loop(x + 1)").unwrap()));

    assert!(run(&mut parser, &mut context, "loop(0)").is_undefined());
}

#[test]
fn native_functions() {
    let mut parser = Parser::new();
    let mut context = Context::new();

    let count = Function::native(Arity::AtLeast(0), |arguments, _| {
                    Expr::number(f64::from(u32::try_from(arguments.len()).unwrap_or(u32::MAX)))
                });
    context.set_function("count", count);

    assert_eq!(run(&mut parser, &mut context, "count(1, x, [2, 3])"), Expr::number(3.0));
    assert_eq!(run(&mut parser, &mut context, "count()"), Expr::number(0.0));

    assert!(context.remove_function("count"));
    assert!(!context.contains_function("count"));
    assert!(run(&mut parser, &mut context, "count()").is_undefined());
}

#[test]
fn builtins_map_over_collections() {
    let mut parser = Parser::new();
    let mut context = Context::with_builtins();

    assert_eq!(run(&mut parser, &mut context, "abs([-1, 2, -3])").to_string(), "[1, 2, 3]");
    assert_eq!(run(&mut parser, &mut context, "floor((1.5, 2.5))").to_string(), "(1, 2)");
    assert_eq!(run(&mut parser, &mut context, "max([4, 1], 2)").to_string(), "undefined");
}

#[test]
fn iteration_budget() {
    let mut parser = Parser::new();
    let mut context = Context::new();
    assert_eq!(context.max_iterations, MAX_ITERATIONS);

    context.max_iterations = 2;
    let tree = parser.parse("1+2+3+4").unwrap();

    assert!(matches!(tree.evaluate(&mut context),
                     Err(RuntimeError::IterationLimit { limit: 2, .. })));

    context.max_iterations = 3;
    assert_eq!(tree.evaluate(&mut context).unwrap(), Expr::number(10.0));
}

#[test]
fn cyclic_bindings_hit_the_budget() {
    let mut context = Context::new();
    context.set_variable("a", Expr::variable("b"));
    context.set_variable("b", Expr::variable("a"));
    context.max_iterations = 50;

    assert!(Expr::variable("a").evaluate(&mut context).is_err());
}
