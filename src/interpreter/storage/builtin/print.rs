use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, storage::builtin::exact_args, value::core::Value},
};

/// Prints all arguments to standard output, separated by spaces.
///
/// Strings are printed without quotes; numbers in their canonical form.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::print::print, value::core::Value};
///
/// // The function prints to stdout; the doctest only checks the result.
/// assert!(print(&[Value::Str("speed".into()), Value::Real(0.5)], 1).is_ok());
/// ```
pub fn print(args: &[Value], _line: usize) -> EvalResult<()> {
    println!("{}", join_display(args));
    Ok(())
}

/// Fails the statement unless its argument is `true`.
///
/// # Example
/// ```
/// use autoscript::{
///     error::RuntimeError,
///     interpreter::{storage::builtin::print::assert_fn, value::core::Value},
/// };
///
/// assert!(assert_fn(&[Value::Bool(true)], 3).is_ok());
/// assert_eq!(assert_fn(&[Value::Bool(false)], 3),
///            Err(RuntimeError::AssertionFailed { line: 3 }));
/// assert!(matches!(assert_fn(&[], 3),
///                  Err(RuntimeError::ArgumentCountMismatch { found: 0, .. })));
/// ```
pub fn assert_fn(args: &[Value], line: usize) -> EvalResult<()> {
    let [condition] = exact_args("assert", args, line)?;
    if condition.as_bool(line)? {
        Ok(())
    } else {
        Err(RuntimeError::AssertionFailed { line })
    }
}

/// Display forms of `values`, joined with single spaces.
#[must_use]
pub fn join_display(values: &[Value]) -> String {
    values.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(" ")
}
