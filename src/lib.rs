//! # autoscript
//!
//! autoscript is a small scripting engine for autonomous-mode robot routines.
//! A script is a list of statements such as `arcade(0.5, 0); wait(1);
//! shoot();` that call into methods bound by the host program, declare
//! variables and run `if`, `while` and `for` blocks.
//!
//! A statement that cannot be parsed or fails while running is logged and
//! skipped; the rest of the script still runs.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::RegistrationError,
    interpreter::{
        runner::{Interpreter, RunReport},
        storage::methods::Registry,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Instruction` and `Expr` types produced by the
/// parser and consumed by the evaluator. Every node carries the line it
/// came from for error reporting.
pub mod ast;
/// Provides unified error types for parsing, registration and execution.
///
/// Parse and runtime errors are isolated per statement by the runner.
/// Registration errors are returned to the host at startup.
pub mod error;
/// Orchestrates the entire process of script execution.
///
/// This module ties together the lexer, the statement splitter, the
/// parser, the evaluator and the method tables, and exposes the
/// [`Interpreter`] façade.
///
/// # Responsibilities
/// - Splits scripts into statements and classifies each of them once.
/// - Resolves expressions and runs instructions against an environment.
/// - Isolates failures so that one bad statement never stops a run.
pub mod interpreter;
/// A simulated drivetrain for dry-running scripts without a robot.
pub mod sim;
/// General utilities for safe numeric conversion.
///
/// Conversions between `i64` and `f64` that never lose precision silently,
/// and the whole-number canonicalization used by every computed number.
pub mod util;

/// Runs a script once with only the built-in methods available.
///
/// # Errors
/// Returns an error only if the built-in method table cannot be
/// registered. Failures inside the script are reported in the returned
/// [`RunReport`].
///
/// # Examples
/// ```
/// use autoscript::run_source;
///
/// let report = run_source("speed = 0.5; print(\"speed:\", speed)").unwrap();
/// assert!(report.is_clean());
///
/// // 'drive' is not bound, so only the middle statement fails.
/// let report = run_source("x = 1\ndrive(x)\ny = 2").unwrap();
/// assert_eq!(report.failures.len(), 1);
/// assert_eq!(report.failures[0].statement, "drive(x)");
/// ```
pub fn run_source(source: &str) -> Result<RunReport, RegistrationError> {
    let mut interpreter = Interpreter::new(Registry::with_builtins()?);
    Ok(interpreter.run(source))
}
