use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Resolves both sides of a binary operation and applies the operator.
    ///
    /// `&&` and `||` only resolve their right side when the left side does
    /// not already decide the result, so `false && missing()` never looks
    /// up `missing`.
    ///
    /// # Parameters
    /// - `left`: Left operand expression.
    /// - `op`: The operator.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    pub fn eval_binary_op(&self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          line: usize)
                          -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right, line);
        }

        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Applies a non-logical binary operator to two resolved values.
    ///
    /// Arithmetic goes to `eval_arithmetic`, comparisons to
    /// `eval_comparison`. Logical operators are evaluated strictly here; use
    /// [`Environment::eval_binary_op`] for short-circuiting.
    ///
    /// # Example
    /// ```
    /// use autoscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let sum = Environment::eval_binary(BinaryOperator::Add,
    ///                                    &Value::Integer(1),
    ///                                    &Value::Integer(2),
    ///                                    1).unwrap();
    /// assert_eq!(sum, Value::Integer(3));
    ///
    /// let text = Environment::eval_binary(BinaryOperator::Add,
    ///                                     &Value::from("a"),
    ///                                     &Value::Integer(1),
    ///                                     1).unwrap();
    /// assert_eq!(text, Value::from("a1"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
        };

        match op {
            Add | Sub | Mul | Div => Self::eval_arithmetic(op, left, right, line),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And => Ok(Value::Bool(left.as_bool(line)? && right.as_bool(line)?)),
            Or => Ok(Value::Bool(left.as_bool(line)? || right.as_bool(line)?)),
        }
    }
}
