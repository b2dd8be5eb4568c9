/// Core parsing entry points and the parse result type.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Handles signs, logical not, literals, variables, returning-method calls
/// and parenthesized expressions.
pub mod unary;

/// Binary operator parsing.
///
/// One function per precedence tier, each left-associative.
pub mod binary;

/// Flow-control block parsing.
///
/// Parses `if`, `while` and `for` headers and hands the body back to the
/// splitter.
pub mod block;

/// Shared helpers for token slices and comma separated lists.
pub mod utils;

/// Statement classification.
///
/// Decides whether a statement is a block, a method call or a declaration,
/// in that order.
pub mod statement;
