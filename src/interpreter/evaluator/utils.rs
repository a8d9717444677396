use std::mem::discriminant;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::checked_index,
};

impl Context {
    /// Evaluates `target[index]`.
    ///
    /// The target must be a List and the index an integer in `[0, size)`.
    /// Reading past the end is always an error, never a default value.
    ///
    /// # Parameters
    /// - `target`: The already evaluated target.
    /// - `index`: The already evaluated index.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A copy of the element. Lists inside lists are shared, not copied.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     error::RuntimeErrorKind,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let xs = Value::from(vec![Value::Int(10), Value::Int(20)]);
    ///
    /// assert_eq!(Context::eval_index(&xs, &Value::Int(1), 1), Ok(Value::Int(20)));
    /// assert_eq!(Context::eval_index(&xs, &Value::Int(2), 1).unwrap_err().kind,
    ///            RuntimeErrorKind::IndexOutOfRange);
    /// ```
    pub fn eval_index(target: &Value, index: &Value, line: usize) -> EvalResult<Value> {
        let list = target.as_list(line)?;
        let position = checked_index(index.as_int(line)?, list.len(), line)?;

        list.get(position)
            .ok_or_else(|| RuntimeError::index_out_of_range(index_or_zero(index), list.len(), line))
    }

    /// Evaluates an assignment expression.
    ///
    /// For a name, the nearest enclosing binding is updated; assigning to a
    /// name that was never declared is `UnboundVariable`. For `xs[i] = v`, the
    /// list is mutated in place with the same checks as reading `xs[i]`, so
    /// every alias of the list sees the change.
    ///
    /// The right-hand side is evaluated after the target's list and index.
    ///
    /// # Returns
    /// The assigned value.
    pub(crate) fn eval_assign(&mut self,
                              target: &Expr,
                              value: &Expr,
                              line: usize,
                              env: &Env)
                              -> EvalResult<Value> {
        match target {
            Expr::Identifier { name, .. } => {
                let value = self.eval(value, env)?;
                if env.assign(name, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::unbound_variable(name, line))
                }
            },
            Expr::Index { target, index, .. } => {
                let list = self.eval(target, env)?;
                let index = self.eval(index, env)?;
                let value = self.eval(value, env)?;

                let list = list.as_list(line)?;
                let position = checked_index(index.as_int(line)?, list.len(), line)?;
                if !list.set(position, value.clone()) {
                    return Err(RuntimeError::index_out_of_range(index_or_zero(&index),
                                                                list.len(),
                                                                line));
                }
                Ok(value)
            },
            _ => Err(RuntimeError::type_mismatch("Invalid assignment target", line)),
        }
    }
}

fn index_or_zero(index: &Value) -> i64 {
    match index {
        Value::Int(n) => *n,
        _ => 0,
    }
}

/// Checks strict equality between two values.
///
/// Rules:
/// - Values of the same kind compare by value. Lists compare element by
///   element, functions by identity and `void` equals `void`.
/// - Values of different kinds cannot be compared and raise
///   `TypeMismatch`; there is no implicit conversion.
///
/// This is used for `==` and `!=`.
///
/// # Parameters
/// - `left`: First value.
/// - `right`: Second value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// `true` if the values are equal.
///
/// # Example
/// ```
/// use cshs::interpreter::{evaluator::utils::strict_eq, value::core::Value};
///
/// assert!(strict_eq(&Value::from("abc"), &Value::from("abc"), 1).unwrap());
/// assert!(strict_eq(&Value::Int(1), &Value::Bool(true), 1).is_err());
/// ```
pub fn strict_eq(left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    if discriminant(left) != discriminant(right) {
        return Err(RuntimeError::type_mismatch(format!("Cannot compare {} with {}",
                                                       left.type_name(),
                                                       right.type_name()),
                                               line));
    }
    Ok(left == right)
}

/// Verifies that a call supplied exactly `expected` arguments.
///
/// # Errors
/// `ArityMismatch` naming the callee otherwise.
pub fn check_arity<T>(name: &str, args: &[T], expected: usize, line: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::arity_mismatch(name, expected, args.len(), line))
    }
}
