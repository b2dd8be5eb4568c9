use crate::{
    ast::Instruction,
    error::ParseError,
    interpreter::{
        parser::statement::parse_statement,
        splitter::{Chunk, Spanned, split, tokenize},
    },
};

/// One statement of a script, classified ahead of execution.
///
/// A statement that could not be classified keeps its error; the runner
/// reports it when execution reaches that position, so the statements
/// around it still run.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Zero-based position of the statement within its script.
    pub index:       usize,
    /// Line the statement starts on.
    pub line:        usize,
    /// Byte offset of the statement in the full script text. Unique across
    /// a script and all of its block bodies.
    pub offset:      usize,
    /// The statement's source text.
    pub text:        String,
    /// The classified instruction, or why classification failed.
    pub instruction: Result<Instruction, ParseError>,
}

/// An ordered sequence of statements derived from one body of text.
///
/// Scripts are parsed once. A block's body is itself a `Script`, parsed
/// together with its parent and executed as often as the block demands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    /// Splits and classifies a full script.
    ///
    /// Parsing never fails as a whole: malformed statements are kept with
    /// their error.
    ///
    /// # Example
    /// ```
    /// use autoscript::interpreter::script::Script;
    ///
    /// let script = Script::parse("arcade(0.5, 0); wait(1)\n???\nshoot();");
    /// assert_eq!(script.len(), 4);
    /// assert!(script.statements()[0].instruction.is_ok());
    /// assert!(script.statements()[2].instruction.is_err());
    /// assert_eq!(script.statements()[3].text, "shoot()");
    /// ```
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let tokens = tokenize(source);
        Self::from_tokens(&tokens, source, 0)
    }

    /// Splits and classifies an already tokenized body.
    ///
    /// `source` is the full text the tokens' spans refer to; `depth` is the
    /// number of blocks enclosing the body.
    #[must_use]
    pub fn from_tokens(tokens: &[Spanned], source: &str, depth: usize) -> Self {
        let statements = split(tokens).into_iter()
                                      .enumerate()
                                      .map(|(index, chunk)| classify(index, &chunk, source, depth))
                                      .collect();
        Self { statements }
    }

    /// The statements in execution order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` if the script has no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Builds the statement for one chunk.
fn classify(index: usize, chunk: &Chunk<'_>, source: &str, depth: usize) -> Statement {
    let line = chunk.line();
    let span = chunk.span();
    let offset = span.start;
    let text = source.get(span).unwrap_or_default().trim().to_string();

    let instruction = if chunk.balanced {
        parse_statement(chunk.tokens, source, depth)
    } else {
        Err(ParseError::UnbalancedBraces { line })
    };

    Statement { index,
                line,
                offset,
                text,
                instruction }
}
