use thiserror::Error;

use crate::interpreter::storage::methods::MethodKind;

/// Represents all errors that can occur while registering methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A binding was added to a table that holds the other callable kind.
    #[error("Cannot register {found} method '{name}' in the {expected} method table.")]
    WrongTableKind {
        /// The method name.
        name:     String,
        /// The kind the table holds.
        expected: MethodKind,
        /// The kind of the binding.
        found:    MethodKind,
    },
    /// The name is already bound in the same table.
    #[error("Method '{name}' is already registered.")]
    AlreadyRegistered {
        /// The method name.
        name: String,
    },
    /// The name is already bound in the table of the other kind.
    #[error("Method '{name}' is already registered as a {existing} method.")]
    NameConflict {
        /// The method name.
        name:     String,
        /// The kind of the existing binding.
        existing: MethodKind,
    },
    /// The name could never be called from a script.
    #[error("'{name}' is not a valid method name.")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
}
