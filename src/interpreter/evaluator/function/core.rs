use std::{fmt, rc::Rc};

use log::warn;

use crate::{ast::Expr, interpreter::evaluator::core::Context};

/// A host callable. Receives the reduced arguments and the calling context.
pub type NativeFn = Rc<dyn Fn(&[Expr], &mut Context) -> Expr>;

/// Specifies the allowed number of arguments for a function.
///
/// - `Exact(n)` means the function must receive exactly `n` arguments.
/// - `OneOf(slice)` means the function accepts any count listed in `slice`.
/// - `AtLeast(n)` means the function accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::evaluator::function::core::Arity;
    ///
    /// assert!(Arity::Exact(1).check(1));
    /// assert!(Arity::OneOf(&[1, 2]).check(2));
    /// assert!(!Arity::AtLeast(1).check(0));
    /// ```
    #[must_use]
    pub fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(counts) => counts.contains(&n),
            Self::AtLeast(m) => n >= m,
        }
    }
}

#[derive(Clone)]
enum Body {
    Native(NativeFn),
    Expression { parameters: Vec<String>, body: Expr },
}

/// A function bound in a [`Context`].
///
/// Either a native host callable, or a single expression over named
/// parameters. Expression bodies are evaluated in a copy of the calling
/// context with the parameters bound, so they can read the caller's
/// variables but never write to them.
///
/// ## Example
/// ```
/// use exprule::{
///     ast::{BinaryOperator, Expr},
///     interpreter::evaluator::{core::Context, function::core::Function},
/// };
///
/// let mut context = Context::new();
/// let square = Function::expression(vec!["x".to_string()],
///                                   Expr::binary(Expr::variable("x"),
///                                                BinaryOperator::Mul,
///                                                Expr::variable("x")));
/// context.set_function("square", square);
///
/// assert_eq!(context.invoke_function("square", &[Expr::number(4.0)]), Expr::number(16.0));
/// assert!(context.lookup("x").is_undefined());
/// ```
#[derive(Clone)]
pub struct Function {
    arity: Arity,
    body:  Body,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::Native(_) => write!(f, "Function(native, {:?})", self.arity),
            Body::Expression { parameters, body } => {
                write!(f, "Function(({}) => {body})", parameters.join(", "))
            },
        }
    }
}

impl Function {
    /// Wraps a host callable accepting `arity` arguments.
    #[must_use]
    pub fn native(arity: Arity, function: impl Fn(&[Expr], &mut Context) -> Expr + 'static) -> Self {
        Self { arity,
               body: Body::Native(Rc::new(function)) }
    }

    /// A function whose result is `body` evaluated with `parameters` bound to
    /// the arguments.
    #[must_use]
    pub fn expression(parameters: Vec<String>, body: Expr) -> Self {
        Self { arity: Arity::Exact(parameters.len()),
               body:  Body::Expression { parameters, body }, }
    }

    /// The accepted argument counts.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Calls the function. A wrong argument count yields the undefined
    /// sentinel, as does an expression body that fails to settle.
    pub fn invoke(&self, arguments: &[Expr], context: &mut Context) -> Expr {
        if !self.arity.check(arguments.len()) {
            return Expr::UNDEFINED;
        }

        match &self.body {
            Body::Native(function) => function(arguments, context),
            Body::Expression { parameters, body } => {
                let Some(mut scope) = context.call_scope() else {
                    return Expr::UNDEFINED;
                };
                for (parameter, argument) in parameters.iter().zip(arguments) {
                    scope.set_variable(parameter, argument.clone());
                }

                body.evaluate(&mut scope).unwrap_or_else(|error| {
                                              warn!("{error}");
                                              Expr::UNDEFINED
                                          })
            },
        }
    }
}
