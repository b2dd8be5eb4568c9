use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: identity on numbers.
    /// - `Negate`: numeric negation, checked for integer overflow.
    /// - `Not`: boolean negation.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use autoscript::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let v = Environment::eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Environment::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// assert!(Environment::eval_unary(UnaryOperator::Plus, &Value::from("x"), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Plus if value.is_number() => Ok(value.clone()),
            UnaryOperator::Plus => Err(RuntimeError::ExpectedNumber { line }),
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { line }),
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
        }
    }
}
