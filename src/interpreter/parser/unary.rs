use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, check_nesting, parse_nested},
            utils::{describe, parse_comma_separated},
        },
        splitter::Spanned,
    },
    util::num::whole_f64_to_i64,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `+`  (numeric sign, no effect)
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// A leading sign is consumed here and never treated as a binary operator,
/// so `-2 * 3` is `(-2) * 3` and `4 - -1` is `4 - (-1)`. Each sign counts
/// as one level of nesting.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "!") unary
///            | primary
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let op = match tokens.peek() {
        Some(Spanned { token: Ok(Token::Plus), .. }) => UnaryOperator::Plus,
        Some(Spanned { token: Ok(Token::Minus), .. }) => UnaryOperator::Negate,
        Some(Spanned { token: Ok(Token::Bang), .. }) => UnaryOperator::Not,
        _ => return parse_primary(tokens, depth),
    };

    let line = tokens.next().map_or(0, |t| t.line);
    check_nesting(depth + 1, line)?;
    let expr = parse_unary(tokens, depth + 1)?;
    check_nesting(expr.height() + 1, line)?;
    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       line })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, boolean and string literals
/// - variable names
/// - returning-method calls
/// - parenthesized expressions
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier_or_call
///              | "(" expression ")"
/// ```
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let peeked = tokens.peek()
                       .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;

    match &peeked.token {
        Ok(Token::Real(..) | Token::Integer(..) | Token::Str(..)) => parse_literal(tokens),
        Ok(Token::LParen) => parse_grouping(tokens, depth),
        Ok(Token::Identifier(_)) => parse_identifier_or_call(tokens, depth),
        Ok(_) => Err(ParseError::UnexpectedToken { token: describe(peeked),
                                                   line:  peeked.line, }),
        Err(text) => Err(ParseError::InvalidCharacter { text: text.clone(),
                                                        line: peeked.line, }),
    }
}

/// Parses a numeric or string literal.
///
/// Doubles without a fractional part, such as `3.0`, become integer
/// literals.
fn parse_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let spanned = tokens.next()
                        .ok_or(ParseError::UnexpectedEndOfInput { line: 0 })?;
    let line = spanned.line;

    let value = match &spanned.token {
        Ok(Token::Integer(n)) => LiteralValue::Integer(*n),
        Ok(Token::Real(r)) => {
            if !r.is_finite() {
                return Err(ParseError::LiteralTooLarge { line });
            }
            whole_f64_to_i64(*r).map_or(LiteralValue::Real(*r), LiteralValue::Integer)
        },
        Ok(Token::Str(s)) => LiteralValue::Str(s.clone()),
        _ => {
            return Err(ParseError::UnexpectedToken { token: describe(spanned),
                                                     line });
        },
    };

    Ok(Expr::Literal { value, line })
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let line = tokens.next().map_or(0, |t| t.line);
    let expr = parse_nested(tokens, depth + 1)?;

    match tokens.next() {
        Some(Spanned { token: Ok(Token::RParen), .. }) => Ok(expr),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

/// Parses a variable reference, a boolean literal or a returning-method call.
///
/// `true` and `false` are recognized in any letter case. An identifier
/// directly followed by `(` is a call whose arguments are parsed as a comma
/// separated list of expressions.
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let (name, line) = match tokens.next() {
        Some(Spanned { token: Ok(Token::Identifier(name)),
                       line,
                       .. }) => (name.clone(), *line),
        Some(other) => {
            return Err(ParseError::UnexpectedToken { token: describe(other),
                                                     line:  other.line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    if let Some(value) = parse_bool_name(&name) {
        return Ok(Expr::Literal { value: LiteralValue::Bool(value),
                                  line });
    }

    if let Some(Spanned { token: Ok(Token::LParen), .. }) = tokens.peek() {
        tokens.next();
        let arguments = parse_comma_separated(tokens,
                                              |tokens| parse_nested(tokens, depth + 1),
                                              &Token::RParen,
                                              line)?;
        let call = Expr::MethodCall { name,
                                      arguments,
                                      line };
        check_nesting(call.height(), line)?;
        return Ok(call);
    }

    Ok(Expr::Variable { name, line })
}

/// Returns the boolean an identifier spells, ignoring ASCII case.
///
/// # Example
/// ```
/// use autoscript::interpreter::parser::unary::parse_bool_name;
///
/// assert_eq!(parse_bool_name("True"), Some(true));
/// assert_eq!(parse_bool_name("FALSE"), Some(false));
/// assert_eq!(parse_bool_name("truth"), None);
/// ```
#[must_use]
pub fn parse_bool_name(name: &str) -> Option<bool> {
    if name.eq_ignore_ascii_case("true") {
        Some(true)
    } else if name.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
