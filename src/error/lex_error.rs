use thiserror::Error;

/// Represents a failure to tokenize the source text.
///
/// Lexing stops at the first malformed token; the error records the 1-based
/// line on which it was found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lex error on line {line}: {message}.")]
pub struct LexError {
    /// The source line where the error occurred.
    pub line:    usize,
    /// What went wrong.
    pub message: String,
}

impl LexError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line,
               message: message.into() }
    }
}
