use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `+`.
    ///
    /// Two integers add with wrapping overflow. If either operand is a string
    /// the display forms of both are concatenated, so `"n = " + 4` is
    /// `"n = 4"`. Any other combination is a type mismatch.
    pub fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::Str(format!("{left}{right}"))),
            _ => Err(operand_mismatch(BinaryOperator::Add, left, right, line)),
        }
    }

    /// Evaluates `-`, `*`, `/` or `%` on two integers.
    ///
    /// Division and remainder truncate toward zero, so `-7 / 2` is `-3` and
    /// `-7 % 2` is `-1`. A zero divisor raises `DivisionByZero` whatever the
    /// numerator. Overflow wraps, including `i64::MIN / -1`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the integer result.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     ast::BinaryOperator,
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let q = Context::eval_arithmetic(BinaryOperator::Div, &Value::Int(-7), &Value::Int(2), 1);
    /// assert_eq!(q.unwrap(), Value::Int(-3));
    ///
    /// let e = Context::eval_arithmetic(BinaryOperator::Mod, &Value::Int(0), &Value::Int(0), 4);
    /// assert_eq!(e.unwrap_err().kind, RuntimeErrorKind::DivisionByZero);
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           line: usize)
                           -> EvalResult<Value> {
        let (Value::Int(a), Value::Int(b)) = (left, right) else {
            return Err(operand_mismatch(op, left, right, line));
        };
        let (a, b) = (*a, *b);

        let result = match op {
            BinaryOperator::Add => a.wrapping_add(b),
            BinaryOperator::Sub => a.wrapping_sub(b),
            BinaryOperator::Mul => a.wrapping_mul(b),
            BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
                return Err(RuntimeError::division_by_zero(line));
            },
            BinaryOperator::Div => a.wrapping_div(b),
            BinaryOperator::Mod => a.wrapping_rem(b),
            _ => return Err(operand_mismatch(op, left, right, line)),
        };
        Ok(Value::Int(result))
    }
}

/// Builds the `TypeMismatch` error for an operator applied to unsupported
/// operand types.
pub(crate) fn operand_mismatch(op: BinaryOperator,
                               left: &Value,
                               right: &Value,
                               line: usize)
                               -> RuntimeError {
    RuntimeError::type_mismatch(format!("Cannot apply '{op}' to {} and {}",
                                        left.type_name(),
                                        right.type_name()),
                                line)
}
