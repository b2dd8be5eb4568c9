use std::{thread, time::Duration};

use tracing::debug;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, storage::builtin::exact_args, value::core::Value},
};

/// Blocks the calling thread for the given number of seconds.
///
/// This is the only suspension point of the engine. There is no yielding:
/// the script, and the thread running it, resume only once the wait is
/// over.
///
/// # Errors
/// - `ExpectedNumber` if the argument is not numeric.
/// - `InvalidArgument` for negative or non-finite durations.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::builtin::wait::wait, value::core::Value};
///
/// assert!(wait(&[Value::Real(0.01)], 1).is_ok());
/// assert!(wait(&[Value::Integer(-1)], 1).is_err());
/// ```
pub fn wait(args: &[Value], line: usize) -> EvalResult<()> {
    let [seconds] = exact_args("wait", args, line)?;
    let seconds = seconds.as_real(line)?;
    let duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
                       RuntimeError::InvalidArgument { details: format!("cannot wait {seconds} seconds"),
                                                       line }
                   })?;

    debug!(seconds, line, "waiting");
    thread::sleep(duration);
    Ok(())
}
