/// Operator dispatch and short-circuit evaluation.
pub mod core;

/// `+ - * /` on numbers and `+` on strings.
pub mod arithmetic;

/// Ordering and equality.
pub mod comparison;

/// `&&` and `||`.
pub mod logic;
