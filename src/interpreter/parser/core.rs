use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        parser::{binary::parse_logical_or, utils::describe},
        splitter::Spanned,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting the parser accepts within one statement.
///
/// Applies to parentheses and call arguments, to prefix operators, to the
/// height of the expression tree and to blocks inside blocks. Anything
/// deeper fails the statement with `ParseError::NestingTooDeep`.
pub const MAX_NESTING: usize = 128;

/// Fails with `NestingTooDeep` once `depth` exceeds [`MAX_NESTING`].
pub(crate) const fn check_nesting(depth: usize, line: usize) -> ParseResult<()> {
    if depth > MAX_NESTING {
        return Err(ParseError::NestingTooDeep { line });
    }
    Ok(())
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_nested(tokens, 0)
}

/// Parses an expression found `depth` levels of parentheses, call
/// arguments or prefix operators below the statement.
pub(crate) fn parse_nested<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = tokens.peek().map_or(0, |t| t.line);
    check_nesting(depth, line)?;
    parse_logical_or(tokens, depth)
}

/// Parses a token slice that must contain exactly one expression.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the slice is empty.
/// - `UnexpectedTrailingTokens` if tokens remain after the expression.
/// - `NestingTooDeep` if the expression exceeds [`MAX_NESTING`].
/// - Any error raised while parsing the expression itself.
pub fn parse_complete_expression(tokens: &[Spanned], line: usize) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { line });
    }

    let expr = parse_expression(&mut iter)?;

    if let Some(extra) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token: describe(extra),
                                                          line:  extra.line, });
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{BinaryOperator, LiteralValue},
        interpreter::splitter::tokenize,
    };

    fn parse(source: &str) -> ParseResult<Expr> {
        parse_complete_expression(&tokenize(source), 1)
    }

    fn int(value: i64) -> Box<Expr> {
        Box::new(Expr::Literal { value: LiteralValue::Integer(value),
                                 line:  1, })
    }

    #[test]
    fn same_tier_operators_associate_left() {
        let expected = Expr::BinaryOp { left:  Box::new(Expr::BinaryOp { left:  int(10),
                                                                         op:    BinaryOperator::Sub,
                                                                         right: int(2),
                                                                         line:  1, }),
                                        op:    BinaryOperator::Add,
                                        right: int(3),
                                        line:  1, };
        assert_eq!(parse("10-2+3").unwrap(), expected);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expected = Expr::BinaryOp { left:  int(2),
                                        op:    BinaryOperator::Add,
                                        right: Box::new(Expr::BinaryOp { left:  int(3),
                                                                         op:    BinaryOperator::Mul,
                                                                         right: int(4),
                                                                         line:  1, }),
                                        line:  1, };
        assert_eq!(parse("2+3*4").unwrap(), expected);
    }

    #[test]
    fn boolean_literals_ignore_case() {
        assert_eq!(parse("TRUE").unwrap(),
                   Expr::Literal { value: LiteralValue::Bool(true),
                                   line:  1, });
        assert_eq!(parse("False").unwrap(),
                   Expr::Literal { value: LiteralValue::Bool(false),
                                   line:  1, });
    }

    #[test]
    fn whole_doubles_become_integer_literals() {
        assert_eq!(parse("3.0").unwrap(), *int(3));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(parse("1 2"), Err(ParseError::UnexpectedTrailingTokens { .. })));
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(matches!(parse("(1 + 2"), Err(ParseError::ExpectedClosingParen { .. })));
        assert!(matches!(parse("1 + 2)"), Err(ParseError::UnexpectedTrailingTokens { .. })));
    }

    #[test]
    fn nesting_is_limited() {
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(parse(&deep), Err(ParseError::NestingTooDeep { line: 1 })));

        let signs = format!("{}1", "-".repeat(10_000));
        assert!(matches!(parse(&signs), Err(ParseError::NestingTooDeep { .. })));

        let chain = format!("1{}", "+1".repeat(10_000));
        assert!(matches!(parse(&chain), Err(ParseError::NestingTooDeep { .. })));

        let calls = format!("{}1{}", "abs(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(parse(&calls), Err(ParseError::NestingTooDeep { .. })));
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let parens = format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&parens).unwrap(), *int(1));

        let chain = format!("1{}", "+1".repeat(MAX_NESTING - 1));
        assert_eq!(parse(&chain).unwrap().height(), MAX_NESTING);
    }

    #[test]
    fn rejects_empty_expression() {
        assert!(matches!(parse(""), Err(ParseError::UnexpectedEndOfInput { .. })));
    }
}
