use thiserror::Error;

/// Represents all errors that can occur during lexing, splitting or
/// classification of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found an unexpected token while parsing.
    #[error("Error on line {line}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of the statement unexpectedly.
    #[error("Error on line {line}: Unexpected end of statement.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}: Expected closing parenthesis ')' but none found.")]
    ExpectedClosingParen {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A block opened with `{` was never closed, or a `}` had no opening
    /// brace.
    #[error("Error on line {line}: Unbalanced braces in block.")]
    UnbalancedBraces {
        /// The source line where the block started.
        line: usize,
    },
    /// Found extra tokens after parsing should have completed.
    #[error("Error on line {line}: Extra tokens after expression. Check your input: {token}")]
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The lexer could not make sense of a piece of text, such as an
    /// unterminated string or a stray character.
    #[error("Error on line {line}: Invalid character sequence '{text}'.")]
    InvalidCharacter {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The statement is neither a declaration, a method call nor a
    /// flow-control block.
    #[error("Error on line {line}: Statement '{statement}' is not a declaration, method call or block.")]
    Unclassified {
        /// The statement text.
        statement: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A numeric literal was too large to be represented safely.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Parentheses, prefix operators, operator chains or blocks were
    /// nested deeper than the parser accepts.
    #[error("Error on line {line}: Statement is nested too deeply.")]
    NestingTooDeep {
        /// The source line where the limit was exceeded.
        line: usize,
    },
}
