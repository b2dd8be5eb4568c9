use std::ops::Range;

use logos::Logos;

use crate::interpreter::lexer::{LexerExtras, Token};

/// A token together with its location in the script source.
///
/// Text the lexer could not recognize is kept as `Err(slice)` instead of
/// aborting, so that only the statement containing it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The recognized token, or the offending source slice.
    pub token: Result<Token, String>,
    /// Byte range of the token in the source.
    pub span:  Range<usize>,
    /// Line the token starts on.
    pub line:  usize,
}

/// One statement cut out of a token stream.
///
/// Blocks are kept whole: every token between a `{` and its matching `}`
/// belongs to the chunk, separators included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chunk<'a> {
    /// The tokens of the statement, without the terminating separator.
    pub tokens:   &'a [Spanned],
    /// `false` when a `{` was never closed or a `}` was never opened.
    pub balanced: bool,
}

impl Chunk<'_> {
    /// Byte range covered by the statement in the source.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.span.start..last.span.end,
            _ => 0..0,
        }
    }

    /// Line the statement starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        self.tokens.first().map_or(0, |t| t.line)
    }
}

/// Converts script source into a flat list of spanned tokens.
///
/// Comments and blanks are dropped; separators are kept.
///
/// # Example
/// ```
/// use autoscript::interpreter::{lexer::Token, splitter::tokenize};
///
/// let tokens = tokenize("wait(1) # pause\nshoot()");
/// assert_eq!(tokens[0].token, Ok(Token::Identifier("wait".into())));
/// assert_eq!(tokens[4].token, Ok(Token::NewLine));
/// assert_eq!(tokens[5].line, 2);
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Spanned> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::default());

    while let Some(token) = lexer.next() {
        let line = match token {
            // The line counter has already moved past the line feed.
            Ok(Token::NewLine) => lexer.extras.line - 1,
            _ => lexer.extras.line,
        };
        tokens.push(Spanned { token: token.map_err(|()| lexer.slice().to_string()),
                              span: lexer.span(),
                              line });
    }

    tokens
}

/// Splits a token stream into statements.
///
/// Statements end at `;`, line feed or carriage return. Once a `{` is seen,
/// separators no longer end the statement until the brace depth returns to
/// zero, so a whole `while(...){ ... }` block becomes one chunk. Its interior
/// is split again when the block body is parsed.
///
/// A chunk still open at the end of input, or one containing a `}` without
/// an opening brace, is returned with `balanced` set to `false`.
#[must_use]
pub fn split(tokens: &[Spanned]) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut balanced = true;

    for (index, spanned) in tokens.iter().enumerate() {
        match &spanned.token {
            Ok(Token::LBrace) => depth += 1,
            Ok(Token::RBrace) => {
                if depth == 0 {
                    balanced = false;
                } else {
                    depth -= 1;
                }
            },
            Ok(token) if token.is_separator() && depth == 0 => {
                if index > start {
                    chunks.push(Chunk { tokens: &tokens[start..index],
                                        balanced });
                }
                start = index + 1;
                balanced = true;
            },
            _ => {},
        }
    }

    if start < tokens.len() {
        chunks.push(Chunk { tokens:   &tokens[start..],
                            balanced: balanced && depth == 0, });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        let tokens = tokenize(source);
        split(&tokens).iter()
                      .map(|chunk| source[chunk.span()].to_string())
                      .collect()
    }

    #[test]
    fn splits_on_every_separator() {
        assert_eq!(texts("arcade(0.5,0); wait(1)\nshoot()\r\nstop();"),
                   vec!["arcade(0.5,0)", "wait(1)", "shoot()", "stop()"]);
    }

    #[test]
    fn drops_comments_and_empty_statements() {
        assert_eq!(texts("# drive forward\n;;x = 1 # trailing\n  # indented"),
                   vec!["x = 1"]);
    }

    #[test]
    fn comments_end_at_the_next_separator() {
        assert_eq!(texts("# drive first; x = 1\ny = 2 # then; z = 3"),
                   vec!["x = 1", "y = 2", "z = 3"]);
    }

    #[test]
    fn keeps_blocks_whole() {
        let source = "x = 0;\nfor(3){\n  x = x + 1;\n  if(x > 1){ print(x); };\n};\ny = 2;";
        assert_eq!(texts(source),
                   vec!["x = 0",
                        "for(3){\n  x = x + 1;\n  if(x > 1){ print(x); };\n}",
                        "y = 2"]);
    }

    #[test]
    fn flags_unclosed_block() {
        let tokens = tokenize("x = 1; while(true){ wait(1);");
        let chunks = split(&tokens);
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].balanced);
        assert!(!chunks[1].balanced);
    }

    #[test]
    fn flags_stray_closing_brace() {
        let tokens = tokenize("x = 1; }; y = 2;");
        let chunks = split(&tokens);
        assert_eq!(chunks.len(), 3);
        assert!(!chunks[1].balanced);
        assert!(chunks[2].balanced);
    }

    #[test]
    fn keeps_unknown_characters_as_errors() {
        let tokens = tokenize("x = 1 @ 2");
        assert_eq!(tokens[3].token, Err("@".to_string()));
    }

    #[test]
    fn separators_inside_strings_do_not_split() {
        assert_eq!(texts("print(\"a;b\"); x = 1"), vec!["print(\"a;b\")", "x = 1"]);
    }
}
