/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and logical
/// operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements numeric sign and logical NOT.
pub mod unary;

/// Core evaluation logic and the environment.
///
/// Contains the `Environment`, expression resolution and instruction
/// dispatch.
pub mod core;

/// Evaluation of `if`, `while` and `for` blocks.
pub mod flow;

/// Method invocation, both as statements and inside expressions.
pub mod method;
