/// Core parser logic for expressions.
///
/// Provides the main entry point for parsing expressions and the assignment
/// level of the precedence ladder.
pub mod core;

/// Binary operator parsing.
///
/// Handles all binary operations, such as arithmetic, comparison, and logical
/// operators, respecting operator precedence and associativity.
pub mod binary;

/// Unary, postfix and primary expression parsing.
///
/// Handles prefix operators (`!`, `-`, `+`), indexing, method calls, calls,
/// literals and parenthesized expressions.
pub mod unary;

/// Block parsing.
///
/// Parses brace-delimited sequences of statements.
pub mod block;

/// Statement parsing.
///
/// Parses declarations, control flow, `return` and expression statements.
pub mod statement;

/// Type annotation parsing.
///
/// Parses type names and decides, by lookahead, whether the upcoming tokens
/// start a declaration.
pub mod types;

/// Program parsing.
///
/// Parses a whole source unit: `using` directives, namespaces, functions and
/// global statements.
pub mod program;

/// Parser utilities.
///
/// Shared helper functions for parsing tasks, such as comma-separated lists
/// and expecting specific tokens.
pub mod utils;

pub use program::parse_program;
