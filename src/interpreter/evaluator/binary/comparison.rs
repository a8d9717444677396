use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::arithmetic::operand_mismatch,
            core::{Context, EvalResult},
            utils::strict_eq,
        },
        value::core::Value,
    },
};

/// Maps an equality operator and a boolean equality result to the final
/// boolean value.
///
/// Inverts the result for `NotEqual`. This function does not compare
/// anything itself.
#[must_use]
pub const fn equality_op_result(op: BinaryOperator, is_equal: bool) -> bool {
    match op {
        BinaryOperator::NotEqual => !is_equal,
        _ => is_equal,
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `==` and `!=` accept any two values of the same kind and compare them
    /// with [`strict_eq`]. The relational operators `<`, `>`, `<=` and `>=`
    /// are defined on integers only.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `line`: Current line number used for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &Value::Int(3), &Value::Int(5), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let words = Context::eval_comparison(BinaryOperator::Less, &"a".into(), &"b".into(), 1);
    /// assert_eq!(words.unwrap_err().kind, RuntimeErrorKind::TypeMismatch);
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        if matches!(op, Equal | NotEqual) {
            let is_equal = strict_eq(left, right, line)?;
            return Ok(Value::Bool(equality_op_result(op, is_equal)));
        }

        let (Value::Int(a), Value::Int(b)) = (left, right) else {
            return Err(operand_mismatch(op, left, right, line));
        };

        let result = match op {
            Less => a < b,
            Greater => a > b,
            LessEqual => a <= b,
            GreaterEqual => a >= b,
            _ => return Err(operand_mismatch(op, left, right, line)),
        };
        Ok(Value::Bool(result))
    }
}
