use logos::Logos;

/// Represents a lexical token in a script.
///
/// Separators (`;`, line feed, carriage return) are real tokens because the
/// splitter needs them to cut statements apart. Comments start with `#` and
/// run to the next separator.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens with a fractional part or exponent, such as
    /// `0.5`, `.5`, `3.0` or `2e-3`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal. The quotes are stripped; there are no
    /// escape sequences.
    #[regex(r#""[^"\r\n]*""#, parse_string)]
    Str(String),
    /// `if`
    #[token("if")]
    If,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// Identifier tokens; variable or method names such as `speed` or
    /// `arcade`. Also carries `true`/`false` in any letter case.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# comments` up to the next separator.
    #[token("#", skip_comment)]
    Comment,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Line feed; a statement separator that also advances the line count.
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    NewLine,
    /// Carriage return; a statement separator.
    #[token("\r")]
    CarriageReturn,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns `true` for tokens that end a statement outside of a block.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Semicolon | Self::NewLine | Self::CarriageReturn)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit in an `i64` are rejected and surface as an
/// invalid character sequence.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the surrounding quotes of a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

/// Skips a comment, leaving the terminating separator for the splitter.
fn skip_comment(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    let remainder = lex.remainder();
    let end = remainder.find([';', '\n', '\r']).unwrap_or(remainder.len());
    lex.bump(end);
    logos::Skip
}
