use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary expression.
    ///
    /// `&&` and `||` are handed to [`Context::eval_logic`] before either
    /// operand is evaluated, so they can short-circuit. Every other operator
    /// evaluates the left operand, then the right, then applies
    /// [`Context::eval_binary`].
    pub(crate) fn eval_binary_expr(&mut self,
                                   op: BinaryOperator,
                                   left: &Expr,
                                   right: &Expr,
                                   line: usize,
                                   env: &Env)
                                   -> EvalResult<Value> {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return self.eval_logic(op, left, right, line, env);
        }

        let left = self.eval(left, env)?;
        let right = self.eval(right, env)?;
        Self::eval_binary(op, &left, &right, line)
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator. Addition concatenates when either side is a string.
    /// Other arithmetic uses `eval_arithmetic`. Relational and equality
    /// operators use `eval_comparison`. Logical operators, which reach this
    /// point only with both operands already evaluated, require booleans.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let left = Value::Int(3);
    /// let right = Value::Int(4);
    ///
    /// let result = Context::eval_binary(BinaryOperator::Add, &left, &right, 1);
    /// assert_eq!(result.unwrap(), Value::Int(7));
    ///
    /// let greeting = Context::eval_binary(BinaryOperator::Add, &"n = ".into(), &right, 1);
    /// assert_eq!(greeting.unwrap(), Value::from("n = 4"));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };

        match op {
            Add => Self::eval_add(left, right, line),
            Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, line),
            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, line)
            },
            And => Ok(Value::Bool(left.as_bool(line)? && right.as_bool(line)?)),
            Or => Ok(Value::Bool(left.as_bool(line)? || right.as_bool(line)?)),
        }
    }
}
