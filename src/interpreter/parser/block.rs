use crate::{
    ast::{FlowBlock, FlowKind, Instruction},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, check_nesting, parse_complete_expression},
            utils::{describe, find_matching},
        },
        script::Script,
        splitter::Spanned,
    },
};

/// Parses a flow-control block.
///
/// Syntax:
/// ```text
///     if(<condition>){ <statements> };
///     while(<condition>){ <statements> };
///     for(<count>){ <statements> };
/// ```
/// The trailing `;` is a separator and has already been removed by the
/// splitter. The header is parsed as one expression; the body between the
/// braces is split and classified again as a nested [`Script`], so a
/// malformed statement inside a block only fails that statement.
///
/// # Parameters
/// - `tokens`: The statement's tokens.
/// - `source`: The full script text the token spans refer to.
/// - `depth`: How many blocks enclose this statement.
///
/// # Returns
/// - `Ok(Some(Instruction::FlowBlock))` if the statement starts with a block
///   keyword,
/// - `Ok(None)` otherwise.
///
/// # Errors
/// - `UnexpectedToken` if the keyword is not followed by `(` or the header
///   is not followed by `{`.
/// - `ExpectedClosingParen` / `UnbalancedBraces` for unclosed brackets.
/// - `UnexpectedTrailingTokens` if anything follows the closing brace.
/// - `NestingTooDeep` if the block would be nested more than
///   [`MAX_NESTING`](super::core::MAX_NESTING) levels deep.
/// - Any error from parsing the header expression.
pub fn parse_flow_block(tokens: &[Spanned],
                        source: &str,
                        depth: usize)
                        -> ParseResult<Option<Instruction>> {
    let (kind, line) = match tokens.first() {
        Some(Spanned { token: Ok(Token::If), line, .. }) => (FlowKind::If, *line),
        Some(Spanned { token: Ok(Token::While), line, .. }) => (FlowKind::While, *line),
        Some(Spanned { token: Ok(Token::For), line, .. }) => (FlowKind::For, *line),
        _ => return Ok(None),
    };
    check_nesting(depth + 1, line)?;

    expect_token(tokens, 1, &Token::LParen, kind, line)?;
    let close_paren = find_matching(tokens, 1, &Token::LParen, &Token::RParen)
                          .ok_or(ParseError::ExpectedClosingParen { line })?;
    let header = parse_complete_expression(&tokens[2..close_paren], line)?;

    let open_brace = close_paren + 1;
    expect_token(tokens, open_brace, &Token::LBrace, kind, line)?;
    let close_brace = find_matching(tokens, open_brace, &Token::LBrace, &Token::RBrace)
                          .ok_or(ParseError::UnbalancedBraces { line })?;

    if let Some(extra) = tokens.get(close_brace + 1) {
        return Err(ParseError::UnexpectedTrailingTokens { token: describe(extra),
                                                          line:  extra.line, });
    }

    let body = Script::from_tokens(&tokens[open_brace + 1..close_brace], source, depth + 1);

    Ok(Some(Instruction::FlowBlock(FlowBlock { kind,
                                               header,
                                               body,
                                               line })))
}

/// Checks that the token at `index` is `expected`.
fn expect_token(tokens: &[Spanned],
                index: usize,
                expected: &Token,
                kind: FlowKind,
                line: usize)
                -> ParseResult<()> {
    match tokens.get(index) {
        Some(Spanned { token: Ok(tok), .. }) if tok == expected => Ok(()),
        Some(other) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected {expected:?} in '{kind}' block, found {}",
                                                             describe(other)),
                                              line:  other.line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}
