/// Core evaluation logic and context management.
///
/// Contains the runtime context, the control-flow outcome type, program
/// loading and the expression dispatcher.
pub mod core;

/// Statement execution.
///
/// Executes declarations, conditionals, blocks, `return` and nested function
/// declarations, creating child frames for nested bodies.
pub mod statement;

/// Evaluation of loops.
///
/// Implements `while`, C-style `for` and `foreach`, managing the frames of
/// the loop header and of each iteration.
pub mod loops;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and the
/// short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements integer negation, unary plus and logical NOT.
pub mod unary;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;

/// Method calls on lists and strings.
pub mod method;

/// Utility functions for evaluation.
///
/// Provides indexing, assignment, equality and arity helpers shared by the
/// evaluation logic.
pub mod utils;
