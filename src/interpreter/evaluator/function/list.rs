use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Constructs a new, empty list.
///
/// Every call returns a distinct list; two results never alias.
///
/// # Example
/// ```
/// use cshs::interpreter::{
///     evaluator::{core::Context, function::list::new_list},
///     value::core::Value,
/// };
///
/// let mut context = Context::with_io(&b""[..], std::io::sink());
/// let first = new_list(&mut context, &[], 1).unwrap();
/// let second = new_list(&mut context, &[], 1).unwrap();
///
/// first.as_list(1).unwrap().push(Value::Int(1));
/// assert_eq!(second.as_list(1).unwrap().len(), 0);
/// ```
pub fn new_list(_context: &mut Context, _args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::empty_list())
}
