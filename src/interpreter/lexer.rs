use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens with their escapes resolved, such as `"a\"b"`.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    Str(String),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `var`
    #[token("var")]
    Var,
    /// `int`
    #[token("int")]
    TypeInt,
    /// `bool`
    #[token("bool")]
    TypeBool,
    /// `string`
    #[token("string")]
    TypeString,
    /// `void`
    #[token("void")]
    TypeVoid,
    /// `List`
    #[token("List")]
    TypeList,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `foreach`
    #[token("foreach")]
    Foreach,
    /// `in`
    #[token("in")]
    In,
    /// `return`
    #[token("return")]
    Return,
    /// `using`
    #[token("using")]
    Using,
    /// `namespace`
    #[token("namespace")]
    Namespace,
    /// `new`
    #[token("new")]
    New,
    /// Identifier tokens; variable or function names such as `x` or `Square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    MulAssign,
    /// `/=`
    #[token("/=")]
    DivAssign,
    /// `%=`
    #[token("%=")]
    ModAssign,
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
    /// `%`
    #[token("%")]
    Percent,
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
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`
    #[token("=")]
    Equals,
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
    /// `&&`
    #[token("&&")]
    AmpAmp,
    /// `||`
    #[token("||")]
    PipePipe,
    /// `!`
    #[token("!")]
    Bang,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// End of input. Never produced by the scanner itself; [`tokenize`]
    /// appends it so the parser always has a line to report.
    Eof,
}

/// Coarse classification of a token, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    StringLiteral,
    Keyword,
    Operator,
    Punctuation,
    EndOfInput,
}

impl Token {
    /// Returns the kind tag of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Integer(_) => TokenKind::IntegerLiteral,
            Self::Str(_) => TokenKind::StringLiteral,
            Self::Bool(_)
            | Self::Var
            | Self::TypeInt
            | Self::TypeBool
            | Self::TypeString
            | Self::TypeVoid
            | Self::TypeList
            | Self::If
            | Self::Else
            | Self::While
            | Self::For
            | Self::Foreach
            | Self::In
            | Self::Return
            | Self::Using
            | Self::Namespace
            | Self::New => TokenKind::Keyword,
            Self::LParen
            | Self::RParen
            | Self::LBrace
            | Self::RBrace
            | Self::LBracket
            | Self::RBracket
            | Self::Comma
            | Self::Semicolon
            | Self::Dot => TokenKind::Punctuation,
            Self::Eof | Self::Comment | Self::MultiLineComment | Self::NewLine => {
                TokenKind::EndOfInput
            },
            _ => TokenKind::Operator,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Integer(n) => return write!(f, "{n}"),
            Self::Str(s) => return write!(f, "\"{}\"", s.escape_default()),
            Self::Bool(b) => return write!(f, "{b}"),
            Self::Identifier(name) => return write!(f, "{name}"),
            Self::Var => "var",
            Self::TypeInt => "int",
            Self::TypeBool => "bool",
            Self::TypeString => "string",
            Self::TypeVoid => "void",
            Self::TypeList => "List",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Foreach => "foreach",
            Self::In => "in",
            Self::Return => "return",
            Self::Using => "using",
            Self::Namespace => "namespace",
            Self::New => "new",
            Self::Comment | Self::MultiLineComment => "comment",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::Bang => "!",
            Self::NewLine => "newline",
            Self::Eof => "end of input",
        };
        write!(f, "{text}")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
/// Incremented as newlines are skipped, including those inside block comments
/// and string literals.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Why the scanner rejected a piece of input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token pattern matched.
    #[default]
    Unrecognized,
    /// A backslash escape other than `\"`, `\\`, `\n`, `\t`, `\r` or `\0`.
    InvalidEscape(char),
    /// A digit run that does not fit in an `i64`.
    IntegerOutOfRange,
}

/// A lazy, restartable token stream over a source string.
///
/// Yields `(Token, line)` pairs and stops after the first error. Cloning the
/// lexer snapshots its position, so a stream can be replayed from any point.
#[derive(Clone)]
pub struct Lexer<'src> {
    inner:  logos::Lexer<'src, Token>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner:  Token::lexer_with_extras(source, LexerExtras::default()),
               failed: false, }
    }

    /// The line the lexer is currently positioned on.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.inner.extras.line
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(Token, usize), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.inner.next()? {
            Ok(token) => Some(Ok((token, self.inner.extras.line))),
            Err(kind) => {
                self.failed = true;
                Some(Err(describe_error(&kind, self.inner.slice(), self.inner.extras.line)))
            },
        }
    }
}

/// Converts the entire source into tokens, terminated by [`Token::Eof`].
///
/// # Errors
/// Returns a [`LexError`] for the first malformed token: an unrecognized
/// character, an unterminated string, a bad escape or an oversized integer.
///
/// # Example
/// ```
/// use cshs::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("var x = 1;\nx").unwrap();
///
/// assert_eq!(tokens[0], (Token::Var, 1));
/// assert_eq!(tokens[5], (Token::Identifier("x".to_string()), 2));
/// assert_eq!(tokens.last(), Some(&(Token::Eof, 2)));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    for token in lexer.by_ref() {
        tokens.push(token?);
    }
    tokens.push((Token::Eof, lexer.line()));

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

fn describe_error(kind: &LexErrorKind, slice: &str, line: usize) -> LexError {
    match kind {
        LexErrorKind::InvalidEscape(c) => {
            LexError::new(line, format!("Invalid escape sequence '\\{c}' in string literal"))
        },
        LexErrorKind::IntegerOutOfRange => {
            LexError::new(line, format!("Integer literal {slice} is out of range"))
        },
        LexErrorKind::Unrecognized if slice.starts_with('"') => {
            LexError::new(line, "Unterminated string literal")
        },
        LexErrorKind::Unrecognized => {
            LexError::new(line, format!("Unrecognized character '{}'", slice.escape_default()))
        },
    }
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(i64)`: The parsed integer value.
/// - `Err(LexErrorKind::IntegerOutOfRange)`: If the digits overflow `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::IntegerOutOfRange)
}

/// Resolves the escapes of a string literal and strips its quotes.
///
/// Newlines inside the literal advance the line counter.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let slice = lex.slice();
    lex.extras.line += slice.chars().filter(|&c| c == '\n').count();

    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => return Err(LexErrorKind::InvalidEscape(other)),
            None => return Err(LexErrorKind::InvalidEscape('\\')),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("foreach (var item in items)"),
                   vec![Token::Foreach,
                        Token::LParen,
                        Token::Var,
                        Token::Identifier("item".into()),
                        Token::In,
                        Token::Identifier("items".into()),
                        Token::RParen,
                        Token::Eof]);
        assert_eq!(kinds("iffy List Listing"),
                   vec![Token::Identifier("iffy".into()),
                        Token::TypeList,
                        Token::Identifier("Listing".into()),
                        Token::Eof]);
    }

    #[test]
    fn multi_character_operators_are_greedy() {
        assert_eq!(kinds("a<=b==c&&d||!e"),
                   vec![Token::Identifier("a".into()),
                        Token::LessEqual,
                        Token::Identifier("b".into()),
                        Token::EqualEqual,
                        Token::Identifier("c".into()),
                        Token::AmpAmp,
                        Token::Identifier("d".into()),
                        Token::PipePipe,
                        Token::Bang,
                        Token::Identifier("e".into()),
                        Token::Eof]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("1 // one\n/* two\nthree */ 2").unwrap();
        assert_eq!(tokens,
                   vec![(Token::Integer(1), 1), (Token::Integer(2), 3), (Token::Eof, 3)]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds(r#""say \"hi\" \\ bye""#),
                   vec![Token::Str("say \"hi\" \\ bye".into()), Token::Eof]);
    }

    #[test]
    fn errors_report_line() {
        let err = tokenize("var x = 1;\nvar s = \"open").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("Unterminated"));

        let err = tokenize("\n\nx # y").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("Unrecognized"));

        let err = tokenize(r#""bad \q""#).unwrap_err();
        assert!(err.message.contains("escape"));

        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(err.message.contains("out of range"));
    }

    #[test]
    fn lexer_is_restartable() {
        let mut lexer = Lexer::new("a b c");
        lexer.next();
        let snapshot = lexer.clone();
        let rest: Vec<_> = lexer.map(|t| t.unwrap().0).collect();
        let replay: Vec<_> = snapshot.map(|t| t.unwrap().0).collect();
        assert_eq!(rest, replay);
        assert_eq!(rest.len(), 2);
    }
}
