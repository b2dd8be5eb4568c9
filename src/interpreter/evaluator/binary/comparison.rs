use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Ordering operators require two numbers. Equality compares numbers by
    /// value across integer and double, and everything else structurally;
    /// values of different types are never equal.
    ///
    /// # Example
    /// ```
    /// use autoscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let less = Environment::eval_comparison(BinaryOperator::Less,
    ///                                         &Value::Integer(2),
    ///                                         &Value::Real(2.5),
    ///                                         1).unwrap();
    /// assert_eq!(less, Value::Bool(true));
    ///
    /// let mixed = Environment::eval_comparison(BinaryOperator::Equal,
    ///                                          &Value::from("1"),
    ///                                          &Value::Integer(1),
    ///                                          1).unwrap();
    /// assert_eq!(mixed, Value::Bool(false));
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        Ok(Value::Bool(match op {
                           Equal => values_equal(left, right, line)?,
                           NotEqual => !values_equal(left, right, line)?,
                           Less | Greater | LessEqual | GreaterEqual => {
                               let ordering = compare_numbers(left, right, op, line)?;
                               match op {
                                   Less => ordering == Ordering::Less,
                                   Greater => ordering == Ordering::Greater,
                                   LessEqual => ordering != Ordering::Greater,
                                   GreaterEqual => ordering != Ordering::Less,
                                   _ => unreachable!(),
                               }
                           },
                           _ => unreachable!(),
                       }))
    }
}

/// Equality used by `==` and `!=`.
fn values_equal(left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        _ if left.is_number() && right.is_number() => {
            Ok(left.as_real(line)? == right.as_real(line)?)
        },
        _ => Ok(left == right),
    }
}

/// Orders two numbers.
fn compare_numbers(left: &Value,
                   right: &Value,
                   op: BinaryOperator,
                   line: usize)
                   -> EvalResult<Ordering> {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
        return Ok(a.cmp(b));
    }
    if !left.is_number() || !right.is_number() {
        return Err(RuntimeError::TypeError { details: format!("Cannot compare {} {op} {}",
                                                              left.type_name(),
                                                              right.type_name()),
                                             line });
    }

    left.as_real(line)?
        .partial_cmp(&right.as_real(line)?)
        .ok_or(RuntimeError::InvalidArgument { details: "cannot order NaN".to_string(),
                                               line })
}
