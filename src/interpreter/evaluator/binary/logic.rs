use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `&&` or `||` with short-circuiting.
    ///
    /// The left operand is evaluated first and must be a boolean. If it
    /// already decides the result (`false` for `&&`, `true` for `||`) the
    /// right operand is never evaluated, so `false && (1 / 0 == 0)` is simply
    /// `false`. Otherwise the right operand must be a boolean as well.
    ///
    /// # Parameters
    /// - `op`: `BinaryOperator::And` or `BinaryOperator::Or`.
    /// - `left`: Left operand expression.
    /// - `right`: Right operand expression.
    /// - `line`: Line number for error reporting.
    /// - `env`: Scope for evaluating the operands.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean.
    pub(crate) fn eval_logic(&mut self,
                             op: BinaryOperator,
                             left: &Expr,
                             right: &Expr,
                             line: usize,
                             env: &Env)
                             -> EvalResult<Value> {
        let left = self.eval(left, env)?.as_bool(line)?;

        let decided = match op {
            BinaryOperator::And => !left,
            _ => left,
        };
        if decided {
            return Ok(Value::Bool(left));
        }

        let right = self.eval(right, env)?.as_bool(line)?;
        Ok(Value::Bool(right))
    }
}
