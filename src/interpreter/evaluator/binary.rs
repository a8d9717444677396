/// Binary operator dispatch.
///
/// Evaluates both operands of a binary expression and routes the operation to
/// the handler for its operator family.
pub mod core;

/// Integer arithmetic and string concatenation.
///
/// Implements `+ - * / %` with wrapping overflow, truncating division and
/// explicit division-by-zero checks.
pub mod arithmetic;

/// Relational and equality comparisons.
pub mod comparison;

/// Short-circuiting logical operators.
pub mod logic;
