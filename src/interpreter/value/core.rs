use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{f64_to_i64_checked, i64_to_f64_checked, whole_f64_to_i64},
};

/// Represents a runtime value in the interpreter.
///
/// Every expression, method argument and variable binding resolves to one of
/// these variants. Numbers are either integers or doubles; a double never
/// holds a whole number because [`Value::from_real`] canonicalizes those to
/// integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value (`true` or `false`).
    /// Produced by literals, comparisons and logical operators. Used as the
    /// condition of `if` and `while` blocks.
    Bool(bool),
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A double precision number with a non-zero fractional part.
    Real(f64),
    /// A string, with its surrounding quotes already stripped.
    Str(String),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::from_real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::from_real(*r),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl Value {
    /// Builds a number from a double, canonicalizing whole numbers to
    /// integers.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from_real(3.0), Value::Integer(3));
    /// assert_eq!(Value::from_real(3.5), Value::Real(3.5));
    /// ```
    #[must_use]
    pub fn from_real(value: f64) -> Self {
        whole_f64_to_i64(value).map_or(Self::Real(value), Self::Integer)
    }

    /// Returns `true` for integers and doubles.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_))
    }

    /// Returns `true` for strings.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Name of the value's type, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Real(_) => "double",
            Self::Str(_) => "string",
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real(42).unwrap(), 10.0);
    /// assert!(Value::Bool(true).as_real(42).is_err());
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => i64_to_f64_checked(*n, RuntimeError::Overflow { line }),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Converts the value to an integer count.
    ///
    /// Integers are returned as-is. Doubles are rejected, since a canonical
    /// double always carries a fractional part.
    pub fn as_count(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Real(r) => f64_to_i64_checked(*r, line),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(r) => write!(f, "{r}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}
