/// Lexing errors.
///
/// Defines the error raised when the source text cannot be split into tokens:
/// unrecognized characters, unterminated string literals, bad escapes and
/// integer literals that do not fit in 64 bits.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning the token stream into
/// a syntax tree. Parse errors include unexpected tokens, missing delimiters or
/// semicolons, and invalid assignment targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the error raised during evaluation, tagged with one of a closed
/// set of kinds: unbound variables, unknown functions, type mismatches, index
/// and division faults, arity mismatches, runaway recursion and console
/// failures.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::{RuntimeError, RuntimeErrorKind};

/// Any error produced by the lex, parse, evaluate pipeline.
///
/// All three categories are unrecoverable for the current input: the first one
/// raised aborts the whole pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line,
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line,
        }
    }

    /// Returns the runtime error kind, if this is a runtime error.
    #[must_use]
    pub const fn runtime_kind(&self) -> Option<RuntimeErrorKind> {
        match self {
            Self::Runtime(e) => Some(e.kind),
            _ => None,
        }
    }
}
