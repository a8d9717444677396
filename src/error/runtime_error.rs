use thiserror::Error;

/// The closed set of runtime failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeErrorKind {
    /// A name was read or assigned without a binding in any enclosing frame.
    UnboundVariable,
    /// A call named neither a user function nor a built-in.
    UnknownFunction,
    /// An operator, condition, index or method received a value of the wrong
    /// type.
    TypeMismatch,
    /// A list was indexed outside `[0, size)`.
    IndexOutOfRange,
    /// `/` or `%` with a zero divisor.
    DivisionByZero,
    /// A call supplied the wrong number of arguments.
    ArityMismatch,
    /// Calls nested deeper than the interpreter allows, usually runaway
    /// recursion.
    RecursionLimit,
    /// The host console could not be read or written.
    Io,
}

impl std::fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::UnboundVariable => "UnboundVariable",
            Self::UnknownFunction => "UnknownFunction",
            Self::TypeMismatch => "TypeMismatch",
            Self::IndexOutOfRange => "IndexOutOfRange",
            Self::DivisionByZero => "DivisionByZero",
            Self::ArityMismatch => "ArityMismatch",
            Self::RecursionLimit => "RecursionLimit",
            Self::Io => "Io",
        };
        write!(f, "{name}")
    }
}

/// An error raised while evaluating a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Runtime error on line {line}: {kind}: {message}.")]
pub struct RuntimeError {
    pub kind:    RuntimeErrorKind,
    pub message: String,
    /// The source line where the error occurred.
    pub line:    usize,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self { kind,
               message: message.into(),
               line }
    }

    pub fn unbound_variable(name: &str, line: usize) -> Self {
        Self::new(RuntimeErrorKind::UnboundVariable,
                  format!("Unknown variable '{name}'"),
                  line)
    }

    pub fn unknown_function(name: &str, line: usize) -> Self {
        Self::new(RuntimeErrorKind::UnknownFunction,
                  format!("Unknown function '{name}'"),
                  line)
    }

    pub fn type_mismatch(details: impl Into<String>, line: usize) -> Self {
        Self::new(RuntimeErrorKind::TypeMismatch, details, line)
    }

    pub fn index_out_of_range(index: i64, size: usize, line: usize) -> Self {
        Self::new(RuntimeErrorKind::IndexOutOfRange,
                  format!("Index {index} is out of range for a list of size {size}"),
                  line)
    }

    pub fn division_by_zero(line: usize) -> Self {
        Self::new(RuntimeErrorKind::DivisionByZero, "Division by zero", line)
    }

    pub fn arity_mismatch(name: &str, expected: usize, found: usize, line: usize) -> Self {
        Self::new(RuntimeErrorKind::ArityMismatch,
                  format!("'{name}' expects {expected} argument(s) but {found} were supplied"),
                  line)
    }

    pub fn recursion_limit(limit: usize, line: usize) -> Self {
        Self::new(RuntimeErrorKind::RecursionLimit,
                  format!("Maximum call depth of {limit} exceeded"),
                  line)
    }

    pub fn io(err: &std::io::Error, line: usize) -> Self {
        Self::new(RuntimeErrorKind::Io, format!("Console failure: {err}"), line)
    }
}
