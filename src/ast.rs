use std::fmt;

use ordered_float::OrderedFloat;

/// Binding strength of a prefix operator (and of a negative number literal,
/// which displays with a leading sign).
const PREFIX_BINDING: u8 = 9;
/// Binding strength of a postfix operator.
const POSTFIX_BINDING: u8 = 10;
/// Binding strength of nodes that never need surrounding parentheses.
const ATOM_BINDING: u8 = 11;

/// A named symbolic constant.
///
/// Constants stay symbolic while a tree is simplified and only turn into
/// numbers when it is evaluated. `Undefined` is the sentinel every unresolved
/// name reduces to; it never becomes a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    /// Positive infinity (`∞`, `inf`, `infinity`).
    Infinity,
    /// The circle constant π (`π`, `pi`).
    Pi,
    /// The full-turn constant τ = 2π (`τ`, `tau`).
    Tau,
    /// Euler's number (`e`).
    E,
    /// Logical truth (`true`), evaluates to `1`.
    True,
    /// Logical falsehood (`false`), evaluates to `0`.
    False,
    /// The undefined sentinel (`undefined`).
    Undefined,
}

impl ConstantKind {
    /// Resolves one of the accepted spellings of a constant.
    ///
    /// ## Example
    /// ```
    /// use exprule::ast::ConstantKind;
    ///
    /// assert_eq!(ConstantKind::from_symbol("inf"), Some(ConstantKind::Infinity));
    /// assert_eq!(ConstantKind::from_symbol("π"), Some(ConstantKind::Pi));
    /// assert_eq!(ConstantKind::from_symbol("x"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "∞" | "inf" | "infinity" => Some(Self::Infinity),
            "π" | "pi" => Some(Self::Pi),
            "τ" | "tau" => Some(Self::Tau),
            "e" => Some(Self::E),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "undefined" => Some(Self::Undefined),
            _ => None,
        }
    }

    /// The numeric value of the constant, or `None` for `Undefined`.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Infinity => Some(f64::INFINITY),
            Self::Pi => Some(std::f64::consts::PI),
            Self::Tau => Some(std::f64::consts::TAU),
            Self::E => Some(std::f64::consts::E),
            Self::True => Some(1.0),
            Self::False => Some(0.0),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for ConstantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Infinity => "∞",
            Self::Pi => "π",
            Self::Tau => "τ",
            Self::E => "e",
            Self::True => "true",
            Self::False => "false",
            Self::Undefined => "undefined",
        };
        write!(f, "{symbol}")
    }
}

/// The two delimiters a collection literal can be written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// `[a, b, c]`
    Vector,
    /// `(a, b, c)`
    Tuple,
}

/// An abstract syntax tree node.
///
/// `Expr` is the closed set of node variants produced by the parser. Every
/// reduction returns a new tree; nodes are never mutated in place, and
/// `clone` is always a deep copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A scalar. Never NaN; NaN results become [`ConstantKind::Undefined`].
    Number {
        /// The value.
        value: OrderedFloat<f64>,
    },
    /// A named constant such as `π` or `undefined`.
    Constant {
        /// Which constant.
        kind: ConstantKind,
    },
    /// Reference to a context binding.
    Variable {
        /// Name of the variable.
        name: String,
    },
    /// An explicit parenthesized group, kept for display until it is
    /// redundant.
    Parentheses {
        /// The wrapped expression.
        inner: Box<Self>,
    },
    /// A prefix or postfix operator application.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// `true` for `-x`, `false` for `x!`.
        prefix:  bool,
        /// The operand expression.
        operand: Box<Self>,
    },
    /// A binary operator application.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// `target = value`. Evaluating it writes `value` into the context.
    Assignment {
        /// Name of the variable being assigned.
        target: String,
        /// The assigned expression.
        value:  Box<Self>,
    },
    /// Function call expression (e.g. `sin(x)`).
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
    },
    /// An ordered collection of expressions.
    Collection {
        /// The delimiters used to write it.
        kind:     CollectionKind,
        /// Elements of the collection.
        elements: Vec<Self>,
    },
}

impl Expr {
    /// The undefined sentinel.
    pub const UNDEFINED: Self = Self::Constant { kind: ConstantKind::Undefined };

    /// Builds a number node; NaN becomes [`Expr::UNDEFINED`].
    ///
    /// ## Example
    /// ```
    /// use exprule::ast::Expr;
    ///
    /// assert_eq!(Expr::number(2.5).as_number(), Some(2.5));
    /// assert!(Expr::number(f64::NAN).is_undefined());
    /// ```
    #[must_use]
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::UNDEFINED
        } else {
            Self::Number { value: OrderedFloat(value) }
        }
    }

    /// Builds a constant node.
    #[must_use]
    pub const fn constant(kind: ConstantKind) -> Self {
        Self::Constant { kind }
    }

    /// Builds a variable node.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    /// Wraps `inner` in a parentheses node.
    #[must_use]
    pub fn parentheses(inner: Self) -> Self {
        Self::Parentheses { inner: Box::new(inner) }
    }

    /// Builds a unary operator node.
    #[must_use]
    pub fn unary(op: UnaryOperator, prefix: bool, operand: Self) -> Self {
        Self::UnaryOp { op,
                        prefix,
                        operand: Box::new(operand) }
    }

    /// Builds a binary operator node.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::BinaryOp { left: Box::new(left),
                         op,
                         right: Box::new(right) }
    }

    /// Builds an assignment node.
    #[must_use]
    pub fn assignment(target: impl Into<String>, value: Self) -> Self {
        Self::Assignment { target: target.into(),
                           value:  Box::new(value), }
    }

    /// Builds a function call node.
    #[must_use]
    pub fn function_call(name: impl Into<String>, arguments: Vec<Self>) -> Self {
        Self::FunctionCall { name: name.into(),
                             arguments }
    }

    /// Builds a `[...]` collection.
    #[must_use]
    pub fn vector(elements: Vec<Self>) -> Self {
        Self::Collection { kind: CollectionKind::Vector,
                           elements }
    }

    /// Builds a `(...)` collection.
    #[must_use]
    pub fn tuple(elements: Vec<Self>) -> Self {
        Self::Collection { kind: CollectionKind::Tuple,
                           elements }
    }

    /// Returns the scalar held by a number node.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number { value } => Some(value.0),
            _ => None,
        }
    }

    /// Returns the elements of a collection node.
    #[must_use]
    pub fn as_collection(&self) -> Option<&[Self]> {
        match self {
            Self::Collection { elements, .. } => Some(elements),
            _ => None,
        }
    }

    /// Whether this is the undefined sentinel.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Constant { kind: ConstantKind::Undefined })
    }

    /// Whether the node displays as a single indivisible unit, so wrapping it
    /// in parentheses adds nothing.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        match self {
            Self::Number { value } => !value.0.is_sign_negative(),
            Self::Constant { .. }
            | Self::Variable { .. }
            | Self::Parentheses { .. }
            | Self::FunctionCall { .. }
            | Self::Collection { .. } => true,
            Self::UnaryOp { .. } | Self::BinaryOp { .. } | Self::Assignment { .. } => false,
        }
    }

    /// How tightly the node binds when displayed next to an operator.
    fn binding(&self) -> u8 {
        match self {
            Self::Assignment { .. } => 0,
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { prefix: true, .. } => PREFIX_BINDING,
            Self::UnaryOp { prefix: false, .. } => POSTFIX_BINDING,
            Self::Number { value } if value.0.is_sign_negative() => PREFIX_BINDING,
            _ => ATOM_BINDING,
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

/// Represents a binary operator.
///
/// Every accepted spelling maps onto one variant; display always uses the
/// first spelling listed for the variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Logical or (`||`, `∨`)
    Or,
    /// Logical exclusive or (`⊕`)
    Xor,
    /// Logical and (`&&`, `∧`)
    And,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`, `<>`, `≠`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`, `≤`)
    LessEqual,
    /// Greater than or equal (`>=`, `≥`)
    GreaterEqual,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`, `×`)
    Mul,
    /// Division (`/`, `÷`)
    Div,
    /// Remainder with the sign of the dividend (`%`)
    Rem,
    /// Modulus with the sign of the divisor (`%%`)
    Mod,
    /// Floor division (`//`)
    FloorDiv,
    /// Exponentiation (`^`)
    Pow,
}

impl BinaryOperator {
    /// Resolves an operator spelling.
    ///
    /// ## Example
    /// ```
    /// use exprule::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("×"), Some(BinaryOperator::Mul));
    /// assert_eq!(BinaryOperator::from_symbol("<>"), Some(BinaryOperator::NotEqual));
    /// assert_eq!(BinaryOperator::from_symbol("="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "||" | "∨" => Self::Or,
            "⊕" => Self::Xor,
            "&&" | "∧" => Self::And,
            "==" => Self::Equal,
            "!=" | "<>" | "≠" => Self::NotEqual,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" | "≤" => Self::LessEqual,
            ">=" | "≥" => Self::GreaterEqual,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" | "×" => Self::Mul,
            "/" | "÷" => Self::Div,
            "%" => Self::Rem,
            "%%" => Self::Mod,
            "//" => Self::FloorDiv,
            "^" => Self::Pow,
            _ => return None,
        };
        Some(op)
    }

    /// Precedence level, lowest binding first. Matches the order of the
    /// operator rules in the default grammar.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::Xor => 2,
            Self::And => 3,
            Self::Equal | Self::NotEqual => 4,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div | Self::Rem | Self::Mod | Self::FloorDiv => 7,
            Self::Pow => 8,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Or => "||",
            Self::Xor => "⊕",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Mod => "%%",
            Self::FloorDiv => "//",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

/// Represents a unary operator.
///
/// Whether the operator was written before or after its operand is stored on
/// the [`Expr::UnaryOp`] node; `++` and `--` exist in both positions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Prefix `+`.
    Positive,
    /// Prefix `-`.
    Negate,
    /// Prefix `!` or `¬`.
    Not,
    /// Prefix `~`, bitwise complement of an integral value.
    Complement,
    /// `++`, adds one.
    Increment,
    /// `--`, subtracts one.
    Decrement,
    /// Postfix `!`.
    Factorial,
    /// Postfix `!!`.
    DoubleFactorial,
    /// Postfix `%`, divides by one hundred.
    Percent,
    /// Postfix `#`, product of the primes up to the operand.
    Primorial,
}

impl UnaryOperator {
    /// Resolves an operator spelling in the given position.
    ///
    /// ## Example
    /// ```
    /// use exprule::ast::UnaryOperator;
    ///
    /// assert_eq!(UnaryOperator::from_symbol("!", true), Some(UnaryOperator::Not));
    /// assert_eq!(UnaryOperator::from_symbol("!", false), Some(UnaryOperator::Factorial));
    /// assert_eq!(UnaryOperator::from_symbol("#", true), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str, prefix: bool) -> Option<Self> {
        let op = match (symbol, prefix) {
            ("++", _) => Self::Increment,
            ("--", _) => Self::Decrement,
            ("+", true) => Self::Positive,
            ("-", true) => Self::Negate,
            ("!" | "¬", true) => Self::Not,
            ("~", true) => Self::Complement,
            ("!", false) => Self::Factorial,
            ("!!", false) => Self::DoubleFactorial,
            ("%", false) => Self::Percent,
            ("#", false) => Self::Primorial,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Positive => "+",
            Self::Negate => "-",
            Self::Not | Self::Factorial => "!",
            Self::Complement => "~",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::DoubleFactorial => "!!",
            Self::Percent => "%",
            Self::Primorial => "#",
        };
        write!(f, "{operator}")
    }
}

/// Writes `expr`, wrapped in parentheses when `wrap` holds.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

/// Writes a comma separated element list between two delimiters.
fn write_list(f: &mut fmt::Formatter<'_>, open: &str, items: &[Expr], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value } => match value.0 {
                v if v == f64::INFINITY => write!(f, "∞"),
                v if v == f64::NEG_INFINITY => write!(f, "-∞"),
                v => write!(f, "{v}"),
            },
            Self::Constant { kind } => write!(f, "{kind}"),
            Self::Variable { name } => write!(f, "{name}"),
            Self::Parentheses { inner } => write!(f, "({inner})"),
            Self::UnaryOp { op,
                            prefix: true,
                            operand, } => {
                write!(f, "{op}")?;
                write_operand(f, operand, operand.binding() <= PREFIX_BINDING)
            },
            Self::UnaryOp { op,
                            prefix: false,
                            operand, } => {
                write_operand(f, operand, operand.binding() <= POSTFIX_BINDING)?;
                write!(f, "{op}")
            },
            Self::BinaryOp { left, op, right } => {
                let precedence = op.precedence();
                write_operand(f, left, left.binding() < precedence)?;
                write!(f, " {op} ")?;
                write_operand(f, right, right.binding() <= precedence)
            },
            Self::Assignment { target, value } => write!(f, "{target} = {value}"),
            Self::FunctionCall { name, arguments } => write_list(f, &format!("{name}("), arguments, ")"),
            Self::Collection { kind: CollectionKind::Vector,
                               elements, } => write_list(f, "[", elements, "]"),
            Self::Collection { kind: CollectionKind::Tuple,
                               elements, } => write_list(f, "(", elements, ")"),
        }
    }
}
