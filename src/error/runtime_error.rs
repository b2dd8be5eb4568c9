use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur while running an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to use an undeclared variable.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a method that is bound in neither method table.
    #[error("Error on line {line}: Unknown method '{name}'.")]
    UnknownMethod {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used a void method inside an expression.
    #[error("Error on line {line}: Method '{name}' does not return a value.")]
    VoidMethodInExpression {
        /// The name of the method.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    #[error("Error on line {line}: Expected boolean.")]
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a fractional number where an integer was required.
    #[error("Error on line {line}: Value is fractional and cannot be used as a count.")]
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a method.
    #[error("Error on line {line}: Method '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The method name.
        name:     String,
        /// Human readable description of the accepted arity.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument was invalid or out of range.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error on line {line}: Overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An `assert` call received `false`.
    #[error("Error on line {line}: Assertion failed.")]
    AssertionFailed {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A host-bound method reported a failure of its own.
    #[error("Error on line {line}: Method '{name}' failed: {details}.")]
    MethodFailed {
        /// The method name.
        name:    String,
        /// What the method reported.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns the failure class of this error.
    ///
    /// Unknown names are lookup failures; everything else means an
    /// expression or call could not produce a usable value.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownVariable { .. }
            | Self::UnknownMethod { .. }
            | Self::VoidMethodInExpression { .. } => ErrorKind::Lookup,
            _ => ErrorKind::Evaluation,
        }
    }
}
