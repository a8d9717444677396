use thiserror::Error;

/// Represents all errors that can occur during parsing.
///
/// Parsing is not recoverable: the first violation aborts the whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    #[error("Syntax error on line {line}: Unexpected token '{token}'.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A specific token (such as `;` or `)`) was required but another was
    /// found.
    #[error("Syntax error on line {line}: Expected {expected}, found '{found}'.")]
    ExpectedToken {
        /// Description of what was required.
        expected: String,
        /// The token actually found.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("Syntax error on line {line}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left side of `=` is neither a variable nor an index expression.
    #[error("Syntax error on line {line}: Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `var x;` has no type to derive a default value from.
    #[error("Syntax error on line {line}: Implicitly-typed variable '{name}' must be initialized.")]
    MissingInitializer {
        /// The declared name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Brackets or prefix operators nest deeper than the parser accepts.
    #[error("Syntax error on line {line}: Nesting exceeds the limit of {limit} levels.")]
    NestingTooDeep {
        /// The deepest nesting accepted.
        limit: usize,
        /// The source line where the limit was crossed.
        line:  usize,
    },
}

impl ParseError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::ExpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line }
            | Self::InvalidAssignmentTarget { line }
            | Self::MissingInitializer { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
