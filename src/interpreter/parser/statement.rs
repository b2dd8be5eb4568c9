use crate::{
    ast::Instruction,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_flow_block,
            core::{ParseResult, parse_complete_expression, parse_expression},
            unary::parse_bool_name,
            utils::{describe, find_matching, parse_comma_separated},
        },
        splitter::Spanned,
    },
};

/// Classifies one statement and builds its instruction.
///
/// A statement may be one of:
/// - a flow-control block (`if(...){...}`, `while(...){...}`,
///   `for(...){...}`).
/// - a method call (`name(arg, ...)`).
/// - a declaration (`name = expression`).
///
/// Parsing is attempted in that order; the first matching construct is
/// returned. Blocks come first because their header may itself contain `=`
/// and their body certainly does.
///
/// # Parameters
/// - `tokens`: The statement's tokens, without the terminating separator.
/// - `source`: The full script text, used for block bodies and messages.
/// - `depth`: How many blocks enclose the statement; zero at top level.
///
/// # Errors
/// Returns `ParseError::Unclassified` when no construct matches, or the
/// error of the construct that matched but was malformed.
pub fn parse_statement(tokens: &[Spanned], source: &str, depth: usize) -> ParseResult<Instruction> {
    let line = tokens.first().map_or(0, |t| t.line);

    if let Some(instruction) = parse_flow_block(tokens, source, depth)? {
        return Ok(instruction);
    }
    if let Some(instruction) = parse_method_call(tokens, line)? {
        return Ok(instruction);
    }
    if let Some(instruction) = parse_declaration(tokens, line)? {
        return Ok(instruction);
    }

    if let Some(Spanned { token: Err(text),
                          line, .. }) = tokens.iter().find(|t| t.token.is_err())
    {
        return Err(ParseError::InvalidCharacter { text: text.clone(),
                                                  line: *line, });
    }

    let statement = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => source.get(first.span.start..last.span.end)
                                           .unwrap_or_default()
                                           .to_string(),
        _ => String::new(),
    };
    Err(ParseError::Unclassified { statement, line })
}

/// Parses a method call statement of the form `name(arg1, arg2, ...)`.
///
/// The statement is a method call only if the parenthesis opened after the
/// name is closed by the very last token. Arguments are split on top-level
/// commas and kept as expressions; they are resolved when the call runs.
///
/// # Returns
/// - `Ok(Some(Instruction::MethodCall))` if the statement is a call,
/// - `Ok(None)` if it is not.
fn parse_method_call(tokens: &[Spanned], line: usize) -> ParseResult<Option<Instruction>> {
    let name = match tokens {
        [Spanned { token: Ok(Token::Identifier(name)), .. },
         Spanned { token: Ok(Token::LParen), .. },
         ..] => name,
        _ => return Ok(None),
    };

    if find_matching(tokens, 1, &Token::LParen, &Token::RParen) != Some(tokens.len() - 1) {
        return Ok(None);
    }

    let mut iter = tokens[2..].iter().peekable();
    let arguments = parse_comma_separated(&mut iter, parse_expression, &Token::RParen, line)?;

    if let Some(extra) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token: describe(extra),
                                                          line:  extra.line, });
    }

    Ok(Some(Instruction::MethodCall { name: name.clone(),
                                      arguments,
                                      line }))
}

/// Parses a declaration of the form `name = expression`.
///
/// The left side must be a single identifier other than `true` or `false`.
/// Everything after the `=` is one expression, so a second top-level `=` is
/// rejected as a trailing token.
///
/// # Returns
/// - `Ok(Some(Instruction::Declaration))` if the statement is a declaration,
/// - `Ok(None)` if it is not.
fn parse_declaration(tokens: &[Spanned], line: usize) -> ParseResult<Option<Instruction>> {
    let name = match tokens {
        [Spanned { token: Ok(Token::Identifier(name)), .. },
         Spanned { token: Ok(Token::Assign), .. },
         ..] => name,
        _ => return Ok(None),
    };

    if parse_bool_name(name).is_some() {
        return Err(ParseError::UnexpectedToken { token: format!("cannot assign to boolean literal '{name}'"),
                                                 line });
    }

    let value = parse_complete_expression(&tokens[2..], line)?;
    Ok(Some(Instruction::Declaration { name: name.clone(),
                                       value,
                                       line }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{Expr, FlowKind, LiteralValue},
        interpreter::{parser::core::MAX_NESTING, splitter::tokenize},
    };

    fn classify(source: &str) -> ParseResult<Instruction> {
        parse_statement(&tokenize(source), source, 0)
    }

    #[test]
    fn classifies_declaration() {
        let instruction = classify("speed = 0.5").unwrap();
        assert_eq!(instruction,
                   Instruction::Declaration { name:  "speed".into(),
                                              value: Expr::Literal { value:
                                                                         LiteralValue::Real(0.5),
                                                                     line:  1, },
                                              line:  1, });
    }

    #[test]
    fn classifies_method_call_with_arguments() {
        match classify("arcade(0.5, -x)").unwrap() {
            Instruction::MethodCall { name, arguments, .. } => {
                assert_eq!(name, "arcade");
                assert_eq!(arguments.len(), 2);
            },
            other => panic!("expected a method call, got {other:?}"),
        }
    }

    #[test]
    fn classifies_method_call_without_arguments() {
        match classify("shoot()").unwrap() {
            Instruction::MethodCall { arguments, .. } => assert!(arguments.is_empty()),
            other => panic!("expected a method call, got {other:?}"),
        }
    }

    #[test]
    fn nested_call_arguments_keep_their_commas() {
        match classify("print(max(1, 2), \"a,b\")").unwrap() {
            Instruction::MethodCall { arguments, .. } => assert_eq!(arguments.len(), 2),
            other => panic!("expected a method call, got {other:?}"),
        }
    }

    #[test]
    fn block_is_classified_before_declaration() {
        match classify("while(x == 1){ x = 2; }").unwrap() {
            Instruction::FlowBlock(block) => {
                assert_eq!(block.kind, FlowKind::While);
                assert_eq!(block.body.len(), 1);
            },
            other => panic!("expected a block, got {other:?}"),
        }
    }

    #[test]
    fn rejects_double_assignment() {
        assert!(matches!(classify("x = y = 3"),
                         Err(ParseError::UnexpectedTrailingTokens { .. })));
    }

    #[test]
    fn rejects_bare_expression() {
        assert!(matches!(classify("x + 1"), Err(ParseError::Unclassified { .. })));
    }

    #[test]
    fn reports_invalid_characters() {
        assert!(matches!(classify("x $ 1"), Err(ParseError::InvalidCharacter { .. })));
    }

    #[test]
    fn block_nesting_is_limited() {
        let source = "if(true){ x = 1 }";
        assert!(parse_statement(&tokenize(source), source, MAX_NESTING - 1).is_ok());
        assert!(matches!(parse_statement(&tokenize(source), source, MAX_NESTING),
                         Err(ParseError::NestingTooDeep { line: 1 })));
    }

    #[test]
    fn only_the_innermost_overlong_block_fails() {
        let source = format!("{}x = 1{}", "if(true){".repeat(10_000), "}".repeat(10_000));
        let mut instruction = classify(&source);
        let mut levels = 0;
        while let Ok(Instruction::FlowBlock(block)) = instruction {
            assert_eq!(block.body.len(), 1);
            instruction = block.body.statements()[0].instruction.clone();
            levels += 1;
        }
        assert_eq!(levels, MAX_NESTING);
        assert!(matches!(instruction, Err(ParseError::NestingTooDeep { .. })));
    }
}
