use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a list position written as an `i64` into a `usize` index that is
/// valid for a list of `len` elements.
///
/// ## Errors
/// Returns an `IndexOutOfRange` runtime error if `value` is negative or not
/// smaller than `len`.
///
/// ## Parameters
/// - `value`: The index as evaluated from the program.
/// - `len`: The current length of the list being indexed.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use cshs::{error::RuntimeErrorKind, util::num::checked_index};
///
/// assert_eq!(checked_index(2, 3, 1).unwrap(), 2);
///
/// let err = checked_index(3, 3, 1).unwrap_err();
/// assert_eq!(err.kind, RuntimeErrorKind::IndexOutOfRange);
///
/// let err = checked_index(-1, 3, 1).unwrap_err();
/// assert_eq!(err.kind, RuntimeErrorKind::IndexOutOfRange);
/// ```
pub fn checked_index(value: i64, len: usize, line: usize) -> EvalResult<usize> {
    usize::try_from(value).ok()
                          .filter(|&index| index < len)
                          .ok_or_else(|| RuntimeError::index_out_of_range(value, len, line))
}

/// Converts a length into an `i64` for use as a program value.
///
/// Lengths beyond `i64::MAX` cannot occur on supported targets; they saturate
/// rather than wrap.
///
/// ## Example
/// ```
/// use cshs::util::num::len_to_i64;
///
/// assert_eq!(len_to_i64(7), 7);
/// ```
#[must_use]
pub fn len_to_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
