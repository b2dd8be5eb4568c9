/// Parsing errors.
///
/// Defines all error types that can occur while splitting and classifying a
/// script. Each of them fails exactly one statement: the runner logs the
/// failure and moves on to the next statement.
pub mod parse_error;
/// Registration errors.
///
/// Raised while the host populates the method tables at startup. These are
/// never caught by the runner; a host that cannot register its bindings
/// should refuse to start.
pub mod registration_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing an
/// instruction: unknown names, type mismatches, division by zero and
/// failures reported by bound methods.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use registration_error::RegistrationError;
pub use runtime_error::RuntimeError;

/// Coarse classification of a statement failure.
///
/// Used in log events and run reports so that hosts can tell a typo in the
/// script apart from a missing binding or a bad sensor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The statement matches no grammar rule.
    Classification,
    /// An unknown variable or method name was used.
    Lookup,
    /// An expression could not be resolved to a value.
    Evaluation,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classification => write!(f, "classification"),
            Self::Lookup => write!(f, "lookup"),
            Self::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Any failure that the runner isolates at statement granularity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    /// The statement could not be classified.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The statement was classified but failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl ScriptError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Classification,
            Self::Runtime(e) => e.kind(),
        }
    }
}
