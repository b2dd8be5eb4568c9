/// Token definitions, produced with `logos`.
pub mod lexer;

/// Cuts a token stream into statements.
pub mod splitter;

/// Parsed scripts and statements.
pub mod script;

/// Recursive-descent parser for statements and expressions.
pub mod parser;

/// Expression resolution and instruction execution.
pub mod evaluator;

/// Runtime values.
pub mod value;

/// Variable and method tables.
pub mod storage;

/// Top-level runs, failure isolation and reports.
pub mod runner;
