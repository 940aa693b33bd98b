use log::trace;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::evaluator::{
        binary::core::fold_binary,
        core::{Context, EvalResult, MAX_ITERATIONS},
        unary::fold_unary,
    },
};

impl Expr {
    /// Performs at most one symbolic rewrite.
    ///
    /// The leftmost innermost reducible node is rewritten: operator nodes over
    /// numbers fold, redundant parentheses around atoms disappear, and
    /// collections broadcast. Variables, constants and function calls stay
    /// symbolic. A tree with nothing left to rewrite is returned unchanged.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::parser::core::Parser;
    ///
    /// let mut parser = Parser::new();
    /// let tree = parser.parse("(1 + 2) * x").unwrap();
    ///
    /// let once = tree.step_simplify();
    /// assert_eq!(once.to_string(), "(3) * x");
    /// assert_eq!(once.step_simplify().to_string(), "3 * x");
    /// ```
    #[must_use]
    pub fn step_simplify(&self) -> Self {
        self.reduce_step(None).unwrap_or_else(|| self.clone())
    }

    /// Rewrites symbolically until nothing changes.
    ///
    /// ## Errors
    /// `RuntimeError::IterationLimit` if the tree does not settle within
    /// [`MAX_ITERATIONS`] steps.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::parser::core::Parser;
    ///
    /// let mut parser = Parser::new();
    /// let tree = parser.parse("2 * 3 + y + π").unwrap();
    ///
    /// assert_eq!(tree.simplify().unwrap().to_string(), "6 + y + π");
    /// ```
    pub fn simplify(&self) -> EvalResult<Self> {
        self.fixpoint(MAX_ITERATIONS, |expr| expr.reduce_step(None))
    }

    /// Performs at most one evaluation rewrite against `context`.
    ///
    /// On top of the symbolic rewrites, constants become numbers, variables
    /// are looked up, functions are invoked and parentheses are dropped. An
    /// assignment whose value has settled writes it into `context` and
    /// reduces to it.
    ///
    /// ## Example
    /// ```
    /// use exprule::interpreter::{evaluator::core::Context, parser::core::Parser};
    ///
    /// let mut parser = Parser::new();
    /// let mut context = Context::new();
    /// let tree = parser.parse("x = 2 + 3").unwrap();
    ///
    /// let once = tree.step_evaluate(&mut context);
    /// assert_eq!(once.to_string(), "x = 5");
    /// assert!(!context.contains_variable("x"));
    ///
    /// assert_eq!(once.step_evaluate(&mut context).to_string(), "5");
    /// assert_eq!(context.lookup("x").to_string(), "5");
    /// ```
    #[must_use]
    pub fn step_evaluate(&self, context: &mut Context) -> Self {
        self.reduce_step(Some(context)).unwrap_or_else(|| self.clone())
    }

    /// Evaluates against `context` until nothing changes.
    ///
    /// ## Errors
    /// `RuntimeError::IterationLimit` if the tree does not settle within
    /// `context.max_iterations` steps.
    ///
    /// ## Example
    /// ```
    /// use exprule::{
    ///     ast::Expr,
    ///     interpreter::{evaluator::core::Context, parser::core::Parser},
    /// };
    ///
    /// let mut parser = Parser::new();
    /// let mut context = Context::with_builtins();
    /// context.set_variable("r", Expr::number(2.0));
    ///
    /// let area = parser.parse("round(π * r^2)").unwrap();
    /// assert_eq!(area.evaluate(&mut context).unwrap(), Expr::number(13.0));
    /// ```
    pub fn evaluate(&self, context: &mut Context) -> EvalResult<Self> {
        let limit = context.max_iterations;
        self.fixpoint(limit, |expr| expr.reduce_step(Some(&mut *context)))
    }

    /// Repeats `step` until it reports no rewrite or returns an equal tree.
    /// At most `limit` rewrites are applied.
    fn fixpoint(&self, limit: usize, mut step: impl FnMut(&Self) -> Option<Self>) -> EvalResult<Self> {
        let mut current = self.clone();
        let mut rewrites = 0;

        while let Some(next) = step(&current) {
            if next == current {
                break;
            }
            if rewrites == limit {
                return Err(RuntimeError::IterationLimit { limit,
                                                          expression: current.to_string() });
            }

            trace!("{current} => {next}");
            current = next;
            rewrites += 1;
        }

        Ok(current)
    }

    /// One rewrite of the tree, or `None` when it is already reduced.
    ///
    /// Children are reduced left to right before their parent folds, so a
    /// parent only ever sees operands that are at a fixpoint. Without a
    /// context the step is symbolic.
    fn reduce_step(&self, mut context: Option<&mut Context>) -> Option<Self> {
        let evaluating = context.is_some();

        match self {
            Self::Number { .. } => None,
            Self::Constant { kind } => match context {
                Some(_) => kind.value().map(Self::number),
                None => None,
            },
            Self::Variable { name } => context.map(|context| context.lookup(name)).filter(|value| value != self),
            Self::Parentheses { inner } => {
                if let Some(inner) = inner.reduce_step(context) {
                    return Some(Self::parentheses(inner));
                }
                if evaluating || inner.is_atomic() || inner.as_number().is_some() {
                    Some((**inner).clone())
                } else {
                    None
                }
            },
            Self::UnaryOp { op, prefix, operand } => match operand.reduce_step(context) {
                Some(operand) => Some(Self::unary(*op, *prefix, operand)),
                None => fold_unary(*op, *prefix, operand),
            },
            Self::BinaryOp { left, op, right } => {
                if let Some(left) = left.reduce_step(context.as_deref_mut()) {
                    return Some(Self::binary(left, *op, (**right).clone()));
                }
                if let Some(right) = right.reduce_step(context) {
                    return Some(Self::binary((**left).clone(), *op, right));
                }
                fold_binary(left, *op, right, evaluating)
            },
            Self::Assignment { target, value } => match value.reduce_step(context.as_deref_mut()) {
                Some(value) => Some(Self::assignment(target.clone(), value)),
                None => context.map(|context| {
                              context.set_variable(target, (**value).clone());
                              (**value).clone()
                          }),
            },
            Self::FunctionCall { name, arguments } => match step_first(arguments, context.as_deref_mut()) {
                Some(arguments) => Some(Self::function_call(name.clone(), arguments)),
                None => context.map(|context| context.invoke_function(name, arguments)),
            },
            Self::Collection { kind, elements } => {
                step_first(elements, context).map(|elements| Self::Collection { kind: *kind, elements })
            },
        }
    }
}

/// Rewrites the first element of `items` that is not yet reduced, returning
/// the updated list, or `None` when every element is reduced.
fn step_first(items: &[Expr], mut context: Option<&mut Context>) -> Option<Vec<Expr>> {
    items.iter().enumerate().find_map(|(i, item)| {
                                let next = item.reduce_step(context.as_deref_mut())?;
                                let mut items = items.to_vec();
                                items[i] = next;
                                Some(items)
                            })
}
