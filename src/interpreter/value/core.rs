use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{function::Closure, list::ListRef},
    },
    util::stack::ensure_sufficient_stack,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// variable bindings, arguments and function results. `Int`, `Bool` and
/// `String` have copy semantics; `List` and `Function` are shared by
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) or logical
    /// operations (`!`, `&&`, `||`). The only type accepted as a condition.
    Bool(bool),
    /// A string of characters.
    Str(String),
    /// A resizable sequence of values, shared by every alias.
    List(ListRef),
    /// The result of statements and functions that return nothing.
    Unit,
    /// A user function together with the scope it was declared in.
    Function(Closure),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(ListRef::from_vec(v))
    }
}

impl Value {
    /// Creates a new, empty list value.
    #[must_use]
    pub fn empty_list() -> Self {
        Self::List(ListRef::new())
    }

    /// The name of the value's runtime type, as used in error messages.
    ///
    /// # Example
    /// ```
    /// use cshs::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Int(3).type_name(), "int");
    /// assert_eq!(Value::empty_list().type_name(), "List");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::List(_) => "List",
            Self::Unit => "void",
            Self::Function(_) => "function",
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer value.
    /// - `Err(RuntimeError)` of kind `TypeMismatch`: If not an integer.
    pub fn as_int(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            other => {
                Err(RuntimeError::type_mismatch(format!("Expected int, found {}",
                                                        other.type_name()),
                                                line))
            },
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in `if`, `while` and `for`, and for logical
    /// operators. Integers are never implicitly truthy.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError)` of kind `TypeMismatch`: If not boolean.
    ///
    /// # Example
    /// ```
    /// use cshs::{error::RuntimeErrorKind, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::Bool(true).as_bool(1), Ok(true));
    /// assert_eq!(Value::Int(1).as_bool(1).unwrap_err().kind,
    ///            RuntimeErrorKind::TypeMismatch);
    /// ```
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => {
                Err(RuntimeError::type_mismatch(format!("Expected bool, found {}",
                                                        other.type_name()),
                                                line))
            },
        }
    }

    /// Returns the shared list behind this value, or an error if it is not a
    /// list.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    pub fn as_list(&self, line: usize) -> EvalResult<&ListRef> {
        match self {
            Self::List(list) => Ok(list),
            other => {
                Err(RuntimeError::type_mismatch(format!("Expected List, found {}",
                                                        other.type_name()),
                                                line))
            },
        }
    }

    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

impl Value {
    /// Writes the display form, with `open` holding the lists currently being
    /// written. A list that contains itself is written as `[...]` where it
    /// recurs.
    fn fmt_nested(&self,
                  f: &mut std::fmt::Formatter<'_>,
                  open: &mut Vec<ListRef>)
                  -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(list) if open.iter().any(|l| l.ptr_eq(list)) => write!(f, "[...]"),
            Self::List(list) => {
                open.push(list.clone());
                write!(f, "[")?;

                for (index, value) in list.snapshot().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    ensure_sufficient_stack(|| value.fmt_nested(f, open))?;
                }

                open.pop();
                write!(f, "]")
            },
            Self::Unit => write!(f, "void"),
            Self::Function(closure) => write!(f, "<function {}>", closure.name()),
        }
    }
}
