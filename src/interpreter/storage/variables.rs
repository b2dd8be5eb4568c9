use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// The variable table of one environment.
///
/// There is a single flat table: blocks do not open scopes, so a variable
/// declared inside a loop body stays visible after the loop and keeps its
/// value from one iteration to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    table: HashMap<String, Value>,
}

impl Variables {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, overwriting and returning any previous value.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::{storage::variables::Variables, value::core::Value};
    ///
    /// let mut vars = Variables::new();
    /// assert_eq!(vars.put("x", Value::Integer(1)), None);
    /// assert_eq!(vars.put("x", "one".into()), Some(Value::Integer(1)));
    /// assert_eq!(vars.get("x"), Some(&Value::Str("one".into())));
    /// ```
    pub fn put(&mut self, name: &str, value: Value) -> Option<Value> {
        self.table.insert(name.to_string(), value)
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.table.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over all bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.table.iter().map(|(name, value)| (name.as_str(), value))
    }
}
