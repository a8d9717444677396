/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving to a freshly allocated stack segment if less than
/// the red zone remains on the current one.
///
/// # Example
/// ```
/// use cshs::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(200_000), 200_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
