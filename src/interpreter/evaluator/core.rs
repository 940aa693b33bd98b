use std::collections::HashMap;

use log::debug;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::evaluator::function::{builtin::register_builtins, core::Function},
};

/// Result type used by the evaluator.
///
/// Fixpoint reductions return either the reduced tree or a `RuntimeError`
/// describing why they gave up.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default number of steps a fixpoint reduction may take.
pub const MAX_ITERATIONS: usize = 10_000;
/// How deeply expression-bodied functions may call each other.
pub const MAX_CALL_DEPTH: usize = 64;

/// Stores the bindings expressions are evaluated against.
///
/// A context maps names to variable values and to functions. Evaluating an
/// assignment writes into it; everything else only reads. Cloning a context
/// produces independent bindings.
///
/// ## Usage
///
/// `Context` is created once and reused across evaluations, so assignments
/// made by one expression are visible to the next.
///
/// ## Example
/// ```
/// use exprule::{ast::Expr, interpreter::evaluator::core::Context};
///
/// let mut context = Context::new();
///
/// assert!(context.set_variable("x", Expr::number(5.0)));
/// assert_eq!(context.lookup("x"), Expr::number(5.0));
/// assert!(context.lookup("y").is_undefined());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    variables:          HashMap<String, Expr>,
    functions:          HashMap<String, Function>,
    call_depth:         usize,
    /// How many steps `simplify` and `evaluate` may take before giving up.
    pub max_iterations: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self { variables:      HashMap::new(),
               functions:      HashMap::new(),
               call_depth:     0,
               max_iterations: MAX_ITERATIONS, }
    }

    /// Creates a context with the default functions registered.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::evaluator::core::Context;
    ///
    /// let context = Context::with_builtins();
    ///
    /// assert!(context.contains_function("sqrt"));
    /// assert!(!context.contains_variable("x"));
    /// ```
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut context = Self::new();
        register_builtins(&mut context);
        context
    }

    /// The value bound to `name`, or the undefined sentinel.
    ///
    /// A name bound only as a function stands for that function and looks up
    /// to itself, so it stays symbolic instead of becoming undefined.
    ///
    /// ## Example
    /// ```
    /// use exprule::{ast::Expr, interpreter::evaluator::core::Context};
    ///
    /// let context = Context::with_builtins();
    ///
    /// assert_eq!(context.lookup("sqrt"), Expr::variable("sqrt"));
    /// assert!(context.lookup("x").is_undefined());
    /// ```
    #[must_use]
    pub fn lookup(&self, name: &str) -> Expr {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None if self.contains_function(name) => Expr::variable(name),
            None => Expr::UNDEFINED,
        }
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    ///
    /// Always succeeds and returns `true`.
    pub fn set_variable(&mut self, name: &str, value: Expr) -> bool {
        debug!("{name} = {value}");
        self.variables.insert(name.to_string(), value);
        true
    }

    /// Removes the variable or function called `name`.
    pub fn remove_variable(&mut self, name: &str) -> bool {
        self.variables.remove(name).is_some() || self.remove_function(name)
    }

    /// Whether `name` is bound as a variable or a function.
    #[must_use]
    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name) || self.contains_function(name)
    }

    /// Binds `name` to `function`, replacing any earlier function.
    ///
    /// Always succeeds and returns `true`.
    pub fn set_function(&mut self, name: &str, function: Function) -> bool {
        self.functions.insert(name.to_string(), function);
        true
    }

    /// Removes the function called `name`.
    pub fn remove_function(&mut self, name: &str) -> bool {
        self.functions.remove(name).is_some()
    }

    /// Whether a function called `name` exists.
    #[must_use]
    pub fn contains_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names of all bound variables, in no particular order.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        self.variables.keys().map(String::as_str).collect()
    }

    /// Names of all bound functions, in no particular order.
    #[must_use]
    pub fn functions(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    /// Calls the function called `name` with already reduced arguments.
    ///
    /// Unknown names yield the undefined sentinel, as does a call with the
    /// wrong number of arguments.
    ///
    /// ## Example
    /// ```
    /// use exprule::{ast::Expr, interpreter::evaluator::core::Context};
    ///
    /// let mut context = Context::with_builtins();
    ///
    /// assert_eq!(context.invoke_function("sqrt", &[Expr::number(9.0)]), Expr::number(3.0));
    /// assert!(context.invoke_function("nope", &[]).is_undefined());
    /// ```
    pub fn invoke_function(&mut self, name: &str, arguments: &[Expr]) -> Expr {
        let Some(function) = self.functions.get(name).cloned() else {
            debug!("call to unknown function {name}");
            return Expr::UNDEFINED;
        };

        function.invoke(arguments, self)
    }

    /// A copy of this context for evaluating a function body one call deeper,
    /// or `None` once calls nest too deeply.
    pub(crate) fn call_scope(&self) -> Option<Self> {
        if self.call_depth >= MAX_CALL_DEPTH {
            debug!("function calls nest deeper than {MAX_CALL_DEPTH}");
            return None;
        }

        let mut scope = self.clone();
        scope.call_depth += 1;
        Some(scope)
    }
}
