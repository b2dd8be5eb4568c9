use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, storage::builtin::exact_args, value::core::Value},
};

/// Absolute value.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::math::abs, value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-3)], 1).unwrap(), Value::Integer(3));
/// assert_eq!(abs(&[Value::Real(-0.5)], 1).unwrap(), Value::Real(0.5));
/// assert!(abs(&[], 1).is_err());
/// ```
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = exact_args("abs", args, line)?;
    match value {
        Value::Integer(n) => n.checked_abs()
                              .map(Value::Integer)
                              .ok_or(RuntimeError::Overflow { line }),
        Value::Real(r) => Ok(Value::Real(r.abs())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the smaller (`min`) or larger (`max`) of two numbers.
///
/// The winning argument is returned unchanged, keeping its integer or
/// double representation.
pub fn min_max(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let [first, second] = exact_args(name, args, line)?;
    let a = first.as_real(line)?;
    let b = second.as_real(line)?;

    let pick_first = match name {
        "min" => a <= b,
        _ => a >= b,
    };
    Ok(if pick_first { first.clone() } else { second.clone() })
}

/// Restricts a number to the inclusive range `[lo, hi]`.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::math::clamp, value::core::Value};
///
/// let args = [Value::Real(1.5), Value::Integer(-1), Value::Integer(1)];
/// assert_eq!(clamp(&args, 1).unwrap(), Value::Integer(1));
/// assert!(clamp(&args[..2], 1).is_err());
/// ```
pub fn clamp(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value, low, high] = exact_args("clamp", args, line)?;
    let x = value.as_real(line)?;
    let lo = low.as_real(line)?;
    let hi = high.as_real(line)?;

    if lo > hi {
        return Err(RuntimeError::InvalidArgument { details: format!("clamp range {lo}..{hi} is empty"),
                                                   line });
    }

    Ok(if x < lo {
           low.clone()
       } else if x > hi {
           high.clone()
       } else {
           value.clone()
       })
}

/// Rounds to the nearest integer, half away from zero.
pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = exact_args("round", args, line)?;
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Real(r) => Ok(Value::from_real(r.round())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Square root of a non-negative number.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::math::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::Integer(9)], 1).unwrap(), Value::Integer(3));
/// assert!(sqrt(&[Value::Integer(-1)], 1).is_err());
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let [value] = exact_args("sqrt", args, line)?;
    let x = value.as_real(line)?;
    if x < 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("square root of negative number {x}"),
                                                   line });
    }
    Ok(Value::from_real(x.sqrt()))
}
