/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to a keyword, literal, identifier, operator or
/// punctuation mark, tagged with its source line. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Resolves escape sequences in string literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of the program. It is a
/// recursive-descent parser with one function per grammar rule.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates the grammar, reporting the first error with its line.
/// - Tells declarations apart from expressions by lookahead.
pub mod parser;
/// The environment module implements lexical scoping.
///
/// Frames map names to values and link to their enclosing frame. The global
/// function table lives here too.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements, evaluates
/// expressions, manages frames and calls functions and built-ins. It is the
/// core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, and control flow.
/// - Reports runtime errors such as division by zero or unbound names.
pub mod evaluator;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program can compute: integers,
/// booleans, strings, shared lists, `void` and function closures.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements checked conversions used by the evaluator.
/// - Provides the reference-shared list type.
pub mod value;
