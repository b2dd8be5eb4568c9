use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, storage::builtin::exact_args, value::core::Value},
};

/// Converts any value to its display string.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::convert::to_str, value::core::Value};
///
/// assert_eq!(to_str(&[Value::Real(0.5)], 1).unwrap(), Value::from("0.5"));
/// assert!(to_str(&[], 1).is_err());
/// ```
pub fn to_str(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = exact_args("str", args, line)?;
    Ok(Value::Str(value.to_string()))
}

/// Converts a numeric string to a number; numbers pass through unchanged.
///
/// The parsed number is canonicalized, so `num("2.0")` is the integer `2`.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::convert::to_num, value::core::Value};
///
/// assert_eq!(to_num(&[" 42 ".into()], 1).unwrap(), Value::Integer(42));
/// assert_eq!(to_num(&["2.0".into()], 1).unwrap(), Value::Integer(2));
/// assert_eq!(to_num(&["0.25".into()], 1).unwrap(), Value::Real(0.25));
/// assert!(to_num(&["fast".into()], 1).is_err());
/// ```
pub fn to_num(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = exact_args("num", args, line)?;
    match value {
        number @ (Value::Integer(_) | Value::Real(_)) => Ok(number.clone()),
        Value::Str(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::Integer(n));
            }
            match trimmed.parse::<f64>() {
                Ok(r) if r.is_finite() => Ok(Value::from_real(r)),
                _ => Err(RuntimeError::InvalidArgument { details: format!("'{s}' is not a number"),
                                                         line }),
            }
        },
        Value::Bool(_) => Err(RuntimeError::ExpectedNumber { line }),
    }
}
