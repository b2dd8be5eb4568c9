use crate::interpreter::script::Script;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the constant values that can appear directly in a
/// script: numbers, booleans and double-quoted strings.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `true` or `false`, in any letter case.
    Bool(bool),
    /// A string literal with its quotes stripped.
    Str(String),
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Expressions are parsed once when the script is loaded and resolved to a
/// [`Value`](crate::interpreter::value::core::Value) every time the
/// surrounding instruction runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix operator applied to an operand.
    UnaryOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call to a returning method, used for its value.
    MethodCall {
        /// Name of the method.
        name:      String,
        /// Argument expressions, resolved at call time.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Line the expression starts on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::MethodCall { line, .. } => *line,
        }
    }

    /// Number of nodes on the longest path from this node to a leaf.
    ///
    /// The parser never builds a tree taller than its nesting limit, so the
    /// recursion here stays shallow.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::parser::core::parse_complete_expression;
    /// use autoscript::interpreter::splitter::tokenize;
    ///
    /// let expr = parse_complete_expression(&tokenize("-(1 + 2) * 3"), 1).unwrap();
    /// assert_eq!(expr.height(), 4);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        match self {
            Self::Literal { .. } | Self::Variable { .. } => 1,
            Self::UnaryOp { expr, .. } => 1 + expr.height(),
            Self::BinaryOp { left, right, .. } => 1 + left.height().max(right.height()),
            Self::MethodCall { arguments, .. } => {
                1 + arguments.iter().map(Self::height).max().unwrap_or(0)
            },
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+x`
    Plus,
    /// `-x`
    Negate,
    /// `!x`
    Not,
}

/// Binary operators, from tightest to loosest binding:
/// `* /`, then `+ -`, then comparisons, then `&&`, then `||`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`, numeric addition or string concatenation.
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{symbol}")
    }
}

/// The three kinds of flow-control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    /// `if(condition){ ... }`: runs the body once when the condition holds.
    If,
    /// `while(condition){ ... }`: re-checks the condition before every pass.
    While,
    /// `for(count){ ... }`: runs the body a fixed number of times.
    For,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::If => write!(f, "if"),
            Self::While => write!(f, "while"),
            Self::For => write!(f, "for"),
        }
    }
}

/// A flow-control block: a header expression and a nested script.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowBlock {
    /// Which block this is.
    pub kind:   FlowKind,
    /// The condition (`if`, `while`) or count (`for`).
    pub header: Expr,
    /// The statements between the braces.
    pub body:   Script,
    /// Line of the keyword.
    pub line:   usize,
}

/// One executable statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `name = expr`: resolves the right side and stores it, overwriting any
    /// previous binding.
    Declaration {
        /// Variable name.
        name:  String,
        /// Right-hand side.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name(args)` as a statement. Void methods are preferred; a returning
    /// method's result is discarded.
    MethodCall {
        /// Method name.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Expr>,
        /// Line number in the source code.
        line:      usize,
    },
    /// An `if`, `while` or `for` block.
    FlowBlock(FlowBlock),
}
