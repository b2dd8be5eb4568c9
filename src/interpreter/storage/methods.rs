use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    error::RegistrationError,
    interpreter::{
        evaluator::core::EvalResult, parser::unary::parse_bool_name, storage::builtin,
        value::core::Value,
    },
};

/// A method invoked for its effect. Receives the resolved arguments and the
/// line of the call.
pub type VoidFn = Arc<dyn Fn(&[Value], usize) -> EvalResult<()> + Send + Sync>;

/// A method invoked for its result. Receives the resolved arguments and the
/// line of the call.
pub type ReturningFn = Arc<dyn Fn(&[Value], usize) -> EvalResult<Value> + Send + Sync>;

/// The two kinds of callable a script can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Invoked as a statement for its effect.
    Void,
    /// Yields a value usable inside expressions.
    Returning,
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Returning => write!(f, "returning"),
        }
    }
}

/// A method binding of either kind.
#[derive(Clone)]
pub enum Method {
    /// See [`VoidFn`].
    Void(VoidFn),
    /// See [`ReturningFn`].
    Returning(ReturningFn),
}

impl Method {
    /// Wraps a closure as a void method.
    pub fn void<F>(func: F) -> Self
        where F: Fn(&[Value], usize) -> EvalResult<()> + Send + Sync + 'static
    {
        Self::Void(Arc::new(func))
    }

    /// Wraps a closure as a returning method.
    pub fn returning<F>(func: F) -> Self
        where F: Fn(&[Value], usize) -> EvalResult<Value> + Send + Sync + 'static
    {
        Self::Returning(Arc::new(func))
    }

    /// The kind of this binding.
    #[must_use]
    pub const fn kind(&self) -> MethodKind {
        match self {
            Self::Void(_) => MethodKind::Void,
            Self::Returning(_) => MethodKind::Returning,
        }
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Method::{:?}", self.kind())
    }
}

/// A name → method table holding a single kind of callable.
#[derive(Debug, Clone)]
pub struct MethodTable {
    kind:    MethodKind,
    entries: HashMap<String, Method>,
}

impl MethodTable {
    /// Creates an empty table for `kind`.
    #[must_use]
    pub fn new(kind: MethodKind) -> Self {
        Self { kind,
               entries: HashMap::new() }
    }

    /// The kind of callable this table holds.
    #[must_use]
    pub const fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Adds a binding.
    ///
    /// # Errors
    /// - `WrongTableKind` if `method` is not of this table's kind.
    /// - `InvalidName` if `name` could never be called from a script.
    /// - `AlreadyRegistered` if `name` is already bound here.
    pub fn add(&mut self, name: &str, method: Method) -> Result<(), RegistrationError> {
        if method.kind() != self.kind {
            return Err(RegistrationError::WrongTableKind { name:     name.to_string(),
                                                           expected: self.kind,
                                                           found:    method.kind(), });
        }
        if !is_valid_method_name(name) {
            return Err(RegistrationError::InvalidName { name: name.to_string() });
        }
        if self.entries.contains_key(name) {
            return Err(RegistrationError::AlreadyRegistered { name: name.to_string() });
        }

        self.entries.insert(name.to_string(), method);
        Ok(())
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Method> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All bound names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The method tables available to scripts.
///
/// A registry is populated once at startup, built-ins first and host
/// bindings after, and is read-only afterwards. Environments share it
/// through an `Arc`.
///
/// # Example
/// ```
/// use autoscript::interpreter::{storage::methods::Registry, value::core::Value};
///
/// let mut registry = Registry::with_builtins().unwrap();
/// registry.register_returning("battery", |_, _| Ok(Value::Real(12.4))).unwrap();
/// registry.register_void("shoot", |_, _| Ok(())).unwrap();
///
/// // A name can only be bound once across both tables.
/// assert!(registry.register_void("battery", |_, _| Ok(())).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    methods:   MethodTable,
    returning: MethodTable,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry with both tables empty.
    #[must_use]
    pub fn new() -> Self {
        Self { methods:   MethodTable::new(MethodKind::Void),
               returning: MethodTable::new(MethodKind::Returning), }
    }

    /// Creates a registry holding the built-in methods.
    ///
    /// # Errors
    /// Propagates any registration error raised by the built-in table.
    pub fn with_builtins() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        builtin::install(&mut registry)?;
        Ok(registry)
    }

    /// Adds `method` to the table matching its kind.
    ///
    /// # Errors
    /// See [`Registry::add_to`].
    pub fn register(&mut self, name: &str, method: Method) -> Result<(), RegistrationError> {
        self.add_to(method.kind(), name, method)
    }

    /// Registers a void method.
    ///
    /// # Errors
    /// See [`Registry::add_to`].
    pub fn register_void<F>(&mut self, name: &str, func: F) -> Result<(), RegistrationError>
        where F: Fn(&[Value], usize) -> EvalResult<()> + Send + Sync + 'static
    {
        self.register(name, Method::void(func))
    }

    /// Registers a returning method.
    ///
    /// # Errors
    /// See [`Registry::add_to`].
    pub fn register_returning<F>(&mut self, name: &str, func: F) -> Result<(), RegistrationError>
        where F: Fn(&[Value], usize) -> EvalResult<Value> + Send + Sync + 'static
    {
        self.register(name, Method::returning(func))
    }

    /// Adds `method` to the table for `table`.
    ///
    /// # Errors
    /// - `WrongTableKind` if `method` does not belong in `table`.
    /// - `NameConflict` if `name` is bound in the other table.
    /// - `InvalidName` / `AlreadyRegistered` from the table itself.
    pub fn add_to(&mut self,
                  table: MethodKind,
                  name: &str,
                  method: Method)
                  -> Result<(), RegistrationError> {
        let (target, other) = match table {
            MethodKind::Void => (&mut self.methods, &self.returning),
            MethodKind::Returning => (&mut self.returning, &self.methods),
        };

        if other.contains(name) {
            return Err(RegistrationError::NameConflict { name:     name.to_string(),
                                                         existing: other.kind(), });
        }

        target.add(name, method)?;
        debug!(method = name, kind = %table, "registered method");
        Ok(())
    }

    /// Looks up a void method.
    #[must_use]
    pub fn void_method(&self, name: &str) -> Option<&VoidFn> {
        match self.methods.get(name) {
            Some(Method::Void(func)) => Some(func),
            _ => None,
        }
    }

    /// Looks up a returning method.
    #[must_use]
    pub fn returning_method(&self, name: &str) -> Option<&ReturningFn> {
        match self.returning.get(name) {
            Some(Method::Returning(func)) => Some(func),
            _ => None,
        }
    }

    /// The void method table.
    #[must_use]
    pub const fn methods(&self) -> &MethodTable {
        &self.methods
    }

    /// The returning method table.
    #[must_use]
    pub const fn returning_methods(&self) -> &MethodTable {
        &self.returning
    }
}

/// Returns `true` if `name` is an identifier a script could call.
///
/// Block keywords and the boolean literals are excluded.
///
/// # Example
/// ```
/// use autoscript::interpreter::storage::methods::is_valid_method_name;
///
/// assert!(is_valid_method_name("arcade"));
/// assert!(is_valid_method_name("_intake2"));
/// assert!(!is_valid_method_name("2fast"));
/// assert!(!is_valid_method_name("while"));
/// assert!(!is_valid_method_name("True"));
/// ```
#[must_use]
pub fn is_valid_method_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars.next()
                           .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    starts_well
    && rest_ok
    && !matches!(name, "if" | "while" | "for")
    && parse_bool_name(name).is_none()
}
