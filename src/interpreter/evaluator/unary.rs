use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: integer negation, wrapping on `i64::MIN`.
    /// - `Plus`: requires an integer and returns it unchanged.
    /// - `Not`: boolean negation. Integers are not truthy.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     ast::UnaryOperator,
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// // Negation
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Int(5), 1).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// // Boolean not
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// // `!` on an integer is a type error
    /// let e = Context::eval_unary(UnaryOperator::Not, &Value::Int(0), 1).unwrap_err();
    /// assert_eq!(e.kind, RuntimeErrorKind::TypeMismatch);
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
            (UnaryOperator::Plus, Value::Int(n)) => Ok(Value::Int(*n)),
            (UnaryOperator::Not, value) => Ok(Value::Bool(!value.as_bool(line)?)),
            (op, value) => {
                Err(RuntimeError::type_mismatch(format!("Cannot apply unary '{op}' to {}",
                                                        value.type_name()),
                                                line))
            },
        }
    }
}
