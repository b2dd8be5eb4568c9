use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use autoscript::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Returns the integer equivalent of `value` when it is finite, whole and
/// within the exactly representable range.
///
/// This is the canonicalization rule for computed numbers: a result such as
/// `6 / 2` or the literal `3.0` is an integer, `3.5` stays floating.
///
/// ## Example
/// ```
/// use autoscript::util::num::whole_f64_to_i64;
///
/// assert_eq!(whole_f64_to_i64(3.0), Some(3));
/// assert_eq!(whole_f64_to_i64(-0.0), Some(0));
/// assert_eq!(whole_f64_to_i64(3.5), None);
/// assert_eq!(whole_f64_to_i64(f64::INFINITY), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn whole_f64_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value.abs() > MAX_SAFE_U64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within range,
/// and not fractional.
///
/// ## Errors
/// - `RuntimeError::Overflow` for non-finite or out-of-range values.
/// - `RuntimeError::RealIsFractional` for values with a fractional part.
///
/// ## Example
/// ```
/// use autoscript::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0, 1).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5, 123).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { line: 123 }));
///
/// let err = f64_to_i64_checked(1e20, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::Overflow { line: 5 }));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() || value.abs() > MAX_SAFE_U64_INT as f64 {
        return Err(RuntimeError::Overflow { line });
    }
    whole_f64_to_i64(value).ok_or(RuntimeError::RealIsFractional { line })
}

/// Converts a loop count to the number of iterations to run.
///
/// Counts of zero or below run the body zero times.
///
/// ## Example
/// ```
/// use autoscript::util::num::count_to_iterations;
///
/// assert_eq!(count_to_iterations(3), 3);
/// assert_eq!(count_to_iterations(-2), 0);
/// ```
#[must_use]
pub fn count_to_iterations(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
