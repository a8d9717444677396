//! # cshs
//!
//! cshs is an interpreter for C##, a small C#-flavoured teaching language.
//! It tokenizes, parses and directly evaluates programs with variables,
//! functions, the usual control flow, shared lists and a handful of console
//! built-ins.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Cursor;

use crate::{
    ast::Program,
    interpreter::{evaluator::core::Context, lexer::Token, parser::parse_program},
    util::capture::SharedOutput,
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related types
/// that represent the syntactic structure of a program as a tree. The AST is
/// built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Attaches source lines to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while running a program.
/// Every error carries the source line it refers to.
///
/// # Responsibilities
/// - Defines error types for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Unifies them in a crate-level [`Error`] that composes with `?`.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the environment and
/// value representations to provide a complete runtime for C## source.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive read-eval loop.
///
/// Buffers input lines until they form complete statements, evaluates them
/// in one persistent context and reports errors without stopping.
pub mod repl;
/// General utilities shared across phases.
///
/// # Responsibilities
/// - Safely convert between `i64` and `usize` without silent data loss.
/// - Capture program output in memory.
/// - Grow the stack for deeply nested programs.
pub mod util;

pub use error::Error;
pub use interpreter::value::core::Value;

/// Tokenizes source text.
///
/// # Errors
/// Returns the first lexical error.
///
/// # Examples
/// ```
/// use cshs::{interpreter::lexer::Token, tokenize};
///
/// let tokens = tokenize("var x = 1;").unwrap();
/// assert_eq!(tokens.len(), 6);
/// assert_eq!(tokens.last(), Some(&(Token::Eof, 1)));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, Error> {
    Ok(interpreter::lexer::tokenize(source)?)
}

/// Tokenizes and parses source text into a [`Program`].
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// # Examples
/// ```
/// use cshs::parse_source;
///
/// let program = parse_source("int Main() { return 0; }").unwrap();
/// assert_eq!(program.items.len(), 1);
///
/// let error = parse_source("int Main() { return 0 }").unwrap_err();
/// assert_eq!(error.to_string(), "Syntax error on line 1: Expected ';', found '}'.");
/// ```
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_program(&tokens)?)
}

/// Runs a program in an existing context.
///
/// Lexes, parses, registers the functions, executes the global statements
/// and calls `Main`.
///
/// # Returns
/// The value returned by `Main`.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error. Output written before
/// a runtime error stays written.
pub fn run_with_context(context: &mut Context, source: &str) -> Result<Value, Error> {
    let program = parse_source(source)?;
    Ok(context.run_program(&program)?)
}

/// Runs a program against the process's standard input and output.
///
/// # Returns
/// The value returned by `Main`.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error.
pub fn run_source(source: &str) -> Result<Value, Error> {
    let mut context = Context::new();
    let result = run_with_context(&mut context, source);
    if let Err(e) = context.flush(0) {
        tracing::warn!(error = %e, "failed to flush program output");
    }
    result
}

/// Runs a program with `input` as its console input and captures its output.
///
/// # Returns
/// The value returned by `Main` and everything the program printed.
///
/// # Errors
/// Returns the first lexical, syntax or runtime error; the captured output is
/// discarded in that case.
///
/// # Examples
/// ```
/// use cshs::{Value, run_source_with_io};
///
/// let source = r#"
///     int Main() {
///         var name = Console.ReadLine();
///         Console.WriteLine("Hello, " + name);
///         return 3;
///     }
/// "#;
///
/// let (result, output) = run_source_with_io(source, "Ada\n").unwrap();
/// assert_eq!(result, Value::Int(3));
/// assert_eq!(output, "Hello, Ada\n");
/// ```
pub fn run_source_with_io(source: &str, input: &str) -> Result<(Value, String), Error> {
    let output = SharedOutput::default();
    let mut context = Context::with_io(Cursor::new(input.as_bytes().to_vec()), output.clone());

    let value = run_with_context(&mut context, source)?;
    Ok((value, output.contents()))
}
