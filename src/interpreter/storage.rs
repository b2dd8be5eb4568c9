/// The built-in method set.
///
/// Declares `print`, `wait` and the other methods every registry starts
/// with, together with their arity.
pub mod builtin;
/// Method bindings and the registry holding both method tables.
pub mod methods;
/// The flat variable table.
pub mod variables;
