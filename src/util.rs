/// Numeric conversion helpers.
///
/// This module provides checked conversions between the interpreter's `i64`
/// integers and the `usize` lengths and positions of lists, so that a
/// negative or oversized index is reported instead of silently wrapping.
pub mod num;

/// An in-memory output sink that can be read back after it was handed to a
/// [`Context`](crate::interpreter::evaluator::core::Context).
pub mod capture;

/// Stack growth for the recursive phases.
///
/// Parsing, evaluation and value formatting recurse once per nesting level of
/// the program; wrapping those recursions keeps deep but legal programs from
/// exhausting the thread's stack.
pub mod stack;
