use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Writes a value followed by a newline to the program output.
///
/// Accepts zero or one argument; with none, an empty line is written. The
/// value is formatted with its `Display` implementation: integers in decimal,
/// booleans as `true`/`false`, strings verbatim and lists as `[a, b, c]`.
///
/// # Parameters
/// - `context`: Supplies the output stream.
/// - `args`: Zero or one argument.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `Value::Unit`.
///
/// # Example
/// ```
/// use cshs::interpreter::{
///     evaluator::{core::Context, function::console::write_line},
///     value::core::Value,
/// };
///
/// let mut context = Context::with_io(&b""[..], std::io::sink());
/// let result = write_line(&mut context, &[Value::Int(42)], 1).unwrap();
///
/// assert_eq!(result, Value::Unit);
/// ```
pub fn write_line(context: &mut Context, args: &[Value], line: usize) -> EvalResult<Value> {
    let text = args.first().map(ToString::to_string).unwrap_or_default();
    context.write_line(&text, line)?;
    Ok(Value::Unit)
}

/// Reads one line of input and returns it as a string.
///
/// Blocks until a line is available. The line terminator is removed. At end
/// of input the result is the empty string.
///
/// # Example
/// ```
/// use cshs::interpreter::{
///     evaluator::{core::Context, function::console::read_line},
///     value::core::Value,
/// };
///
/// let mut context = Context::with_io(&b"Ada\r\n"[..], std::io::sink());
///
/// assert_eq!(read_line(&mut context, &[], 1).unwrap(), Value::from("Ada"));
/// assert_eq!(read_line(&mut context, &[], 2).unwrap(), Value::from(""));
/// ```
pub fn read_line(context: &mut Context, _args: &[Value], line: usize) -> EvalResult<Value> {
    let text = context.read_line(line)?;
    tracing::trace!(bytes = text.len(), line, "read console line");
    Ok(Value::Str(text))
}
