use crate::{
    ast::Expr,
    interpreter::evaluator::{
        core::Context,
        function::core::{Arity, Function},
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the numeric values of its arguments and returns a
/// number; NaN results become the undefined sentinel.
type BuiltinFn = fn(&[f64]) -> f64;

/// What a builtin does with a lone collection argument.
#[derive(Clone, Copy)]
enum Spread {
    /// Applies itself to every element.
    Map,
    /// Takes the elements as its argument list.
    Arguments,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - how a lone collection argument is treated,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for registration),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                spread: $spread:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:   &'static str,
            arity:  Arity,
            spread: Spread,
            func:   BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, spread: $spread, func: $func },
            )*
        ];
        /// Names of the functions [`register_builtins`] binds.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"   => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].sin() },
    "cos"   => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].cos() },
    "tan"   => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].tan() },
    "asin"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].asin() },
    "acos"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].acos() },
    "atan"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].atan() },
    "sinh"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].sinh() },
    "cosh"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].cosh() },
    "tanh"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].tanh() },
    "exp"   => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].exp() },
    "ln"    => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].ln() },
    "log"   => { arity: Arity::OneOf(&[1, 2]), spread: Spread::Map, func: log },
    "sqrt"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].sqrt() },
    "abs"   => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].abs() },
    "floor" => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].floor() },
    "ceil"  => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].ceil() },
    "round" => { arity: Arity::Exact(1), spread: Spread::Map, func: |x| x[0].round() },
    "sign"  => { arity: Arity::Exact(1), spread: Spread::Map, func: sign },
    "min"   => { arity: Arity::AtLeast(1), spread: Spread::Arguments, func: |x| x.iter().copied().fold(f64::INFINITY, f64::min) },
    "max"   => { arity: Arity::AtLeast(1), spread: Spread::Arguments, func: |x| x.iter().copied().fold(f64::NEG_INFINITY, f64::max) },
}

/// Base-10 logarithm of `x[0]`, or its logarithm to base `x[1]`.
fn log(x: &[f64]) -> f64 {
    match x {
        [value, base] => value.log(*base),
        _ => x[0].log10(),
    }
}

/// `-1`, `0` or `1`; unlike `f64::signum`, zero maps to zero.
fn sign(x: &[f64]) -> f64 {
    if x[0] == 0.0 { 0.0 } else { x[0].signum() }
}

/// Binds every builtin into `context`.
///
/// Builtins only accept numbers. Any other argument, including the undefined
/// sentinel, yields the undefined sentinel. Called with a single collection,
/// most builtins map over its elements while `min` and `max` take the
/// elements as their arguments.
///
/// ## Example
/// ```
/// use exprule::{
///     ast::Expr,
///     interpreter::evaluator::{core::Context, function::builtin::BUILTIN_FUNCTIONS},
/// };
///
/// let mut context = Context::with_builtins();
/// let vector = Expr::vector(vec![Expr::number(1.0), Expr::number(4.0)]);
///
/// assert!(BUILTIN_FUNCTIONS.iter().all(|name| context.contains_function(name)));
/// assert_eq!(context.invoke_function("sqrt", &[vector.clone()]),
///            Expr::vector(vec![Expr::number(1.0), Expr::number(2.0)]));
/// assert_eq!(context.invoke_function("max", &[vector]), Expr::number(4.0));
/// ```
pub fn register_builtins(context: &mut Context) {
    for builtin in BUILTIN_TABLE {
        let (func, spread) = (builtin.func, builtin.spread);
        context.set_function(builtin.name,
                             Function::native(builtin.arity, move |arguments, _| {
                                 apply(func, spread, arguments)
                             }));
    }
}

/// Applies a numeric builtin to reduced arguments.
fn apply(func: BuiltinFn, spread: Spread, arguments: &[Expr]) -> Expr {
    if let [Expr::Collection { kind, elements }] = arguments {
        return match spread {
            Spread::Map => Expr::Collection { kind:     *kind,
                                              elements: elements.iter()
                                                                .map(|element| {
                                                                    apply(func,
                                                                          spread,
                                                                          std::slice::from_ref(element))
                                                                })
                                                                .collect(), },
            Spread::Arguments if elements.is_empty() => Expr::UNDEFINED,
            Spread::Arguments => apply(func, spread, elements),
        };
    }

    arguments.iter()
             .map(Expr::as_number)
             .collect::<Option<Vec<f64>>>()
             .map_or(Expr::UNDEFINED, |values| Expr::number(func(&values)))
}
