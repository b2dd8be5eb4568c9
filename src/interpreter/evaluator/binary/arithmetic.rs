use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Environment, EvalResult},
        value::core::Value,
    },
};

impl Environment {
    /// Evaluates `+`, `-`, `*` or `/`.
    ///
    /// If either operand of `+` is a string, both are rendered as text and
    /// concatenated. Two integers use checked integer arithmetic; division
    /// stays integral only when it is exact. Any other pair of numbers is
    /// computed as doubles and canonicalized, so `1.5 * 2` is the integer
    /// `3`.
    ///
    /// # Errors
    /// - `DivisionByZero` for a zero divisor.
    /// - `Overflow` when the result does not fit.
    /// - `TypeError` for operands that are not numbers.
    ///
    /// # Example
    /// ```
    /// use autoscript::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Environment, value::core::Value},
    /// };
    ///
    /// let half = Environment::eval_arithmetic(BinaryOperator::Div,
    ///                                         &Value::Integer(7),
    ///                                         &Value::Integer(2),
    ///                                         1).unwrap();
    /// assert_eq!(half, Value::Real(3.5));
    ///
    /// let whole = Environment::eval_arithmetic(BinaryOperator::Mul,
    ///                                          &Value::Real(1.5),
    ///                                          &Value::Integer(2),
    ///                                          1).unwrap();
    /// assert_eq!(whole, Value::Integer(3));
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};
        use Value::{Integer, Str};

        match (left, right) {
            _ if op == Add && (left.is_str() || right.is_str()) => Ok(Str(format!("{left}{right}"))),
            (Integer(a), Integer(b)) => {
                let (a, b) = (*a, *b);
                let result = match op {
                    Add => a.checked_add(b),
                    Sub => a.checked_sub(b),
                    Mul => a.checked_mul(b),
                    Div => return Self::divide_integers(a, b, line),
                    _ => unreachable!(),
                };
                result.map(Integer).ok_or(RuntimeError::Overflow { line })
            },
            _ if left.is_number() && right.is_number() => {
                let a = left.as_real(line)?;
                let b = right.as_real(line)?;
                let result = match op {
                    Add => a + b,
                    Sub => a - b,
                    Mul => a * b,
                    Div => {
                        if b == 0.0 {
                            return Err(RuntimeError::DivisionByZero { line });
                        }
                        a / b
                    },
                    _ => unreachable!(),
                };
                if !result.is_finite() {
                    return Err(RuntimeError::Overflow { line });
                }
                Ok(Value::from_real(result))
            },
            _ => Err(RuntimeError::TypeError { details: format!("Cannot use {op} on {} and {}",
                                                                left.type_name(),
                                                                right.type_name()),
                                               line }),
        }
    }

    /// Divides two integers, falling back to a double when the division is
    /// not exact.
    fn divide_integers(a: i64, b: i64, line: usize) -> EvalResult<Value> {
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { line });
        }
        // checked_rem only fails for i64::MIN / -1
        let remainder = a.checked_rem(b).ok_or(RuntimeError::Overflow { line })?;
        if remainder == 0 {
            return a.checked_div(b)
                    .map(Value::Integer)
                    .ok_or(RuntimeError::Overflow { line });
        }

        let a = Value::Integer(a).as_real(line)?;
        let b = Value::Integer(b).as_real(line)?;
        Ok(Value::from_real(a / b))
    }
}
