use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult, splitter::Spanned},
};

/// Parses a comma-separated list of items until a closing token.
///
/// Used for method-call arguments. It repeatedly calls `parse_item` to parse
/// one element, expecting either a comma, to continue the list, or the
/// closing token, to end it. An immediately encountered closing token
/// produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse, an unexpected token is
/// encountered or the statement ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token,
    line: usize)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut items = Vec::new();
    if let Some(Spanned { token: Ok(tok), .. }) = tokens.peek()
       && tok == closing
    {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(Spanned { token: Ok(Token::Comma), .. }) => {},
            Some(Spanned { token: Ok(tok), .. }) if tok == closing => break,
            Some(other) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or {closing:?}, found {}",
                                                                        describe(other)),
                                                         line:  other.line, });
            },
            None => return Err(ParseError::ExpectedClosingParen { line }),
        }
    }
    Ok(items)
}

/// Finds the index of the bracket closing the one at `open`.
///
/// `open` must index an opening token; nesting of the same bracket kind is
/// tracked. Returns `None` when the bracket is never closed.
///
/// # Example
/// ```
/// use autoscript::interpreter::{lexer::Token, parser::utils::find_matching, splitter::tokenize};
///
/// let tokens = tokenize("if((a)){b}");
/// assert_eq!(find_matching(&tokens, 1, &Token::LParen, &Token::RParen), Some(5));
/// assert_eq!(find_matching(&tokens, 6, &Token::LBrace, &Token::RBrace), Some(8));
/// ```
#[must_use]
pub fn find_matching(tokens: &[Spanned], open: usize, opening: &Token, closing: &Token)
                     -> Option<usize> {
    let mut depth = 0usize;
    for (index, spanned) in tokens.iter().enumerate().skip(open) {
        match &spanned.token {
            Ok(tok) if tok == opening => depth += 1,
            Ok(tok) if tok == closing => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            },
            _ => {},
        }
    }
    None
}

/// Short human readable form of a token for error messages.
#[must_use]
pub fn describe(spanned: &Spanned) -> String {
    match &spanned.token {
        Ok(token) => format!("{token:?}"),
        Err(text) => text.clone(),
    }
}
