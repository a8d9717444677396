use crate::{
    ast::{Statement, TypeName},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult, Flow},
        value::{core::Value, function::Closure},
    },
    util::stack::ensure_sufficient_stack,
};

impl Context {
    /// Executes a single statement in the frame `env`.
    ///
    /// Statements run for their effect. Declarations bind in `env` itself;
    /// every nested body (`if` branches, loop bodies, blocks) runs in a fresh
    /// child frame that disappears when the body finishes, whichever way it
    /// finishes.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `env`: The innermost frame.
    ///
    /// # Returns
    /// `Flow::Return` if a `return` was executed, `Flow::Normal` otherwise.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     ast::{Expr, Statement, TypeName},
    ///     interpreter::{
    ///         evaluator::core::{Context, Flow},
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut context = Context::with_io(&b""[..], Vec::new());
    /// let globals = context.globals.clone();
    /// let declaration = Statement::VarDecl { ty:          TypeName::Int,
    ///                                        name:        "count".into(),
    ///                                        initializer: None,
    ///                                        line:        1, };
    ///
    /// assert_eq!(context.exec_statement(&declaration, &globals), Ok(Flow::Normal));
    /// assert_eq!(globals.lookup("count"), Some(Value::Int(0)));
    /// ```
    pub fn exec_statement(&mut self, statement: &Statement, env: &Env) -> EvalResult<Flow> {
        match statement {
            Statement::VarDecl { ty,
                                 name,
                                 initializer,
                                 .. } => {
                let value = match initializer {
                    Some(expr) => self.eval(expr, env)?,
                    None => default_value(ty),
                };
                env.define(name, value);
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr, env)?;
                Ok(Flow::Normal)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => {
                if self.eval(condition, env)?.as_bool(*line)? {
                    self.exec_in_child(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.exec_in_child(else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While { condition, body, line } => {
                self.exec_while(condition, body, *line, env)
            },
            Statement::For { init,
                             condition,
                             step,
                             body,
                             line, } => {
                self.exec_for(init.as_deref(), condition.as_ref(), step.as_ref(), body, *line, env)
            },
            Statement::Foreach { var,
                                 iterable,
                                 body,
                                 line, } => self.exec_foreach(var, iterable, body, *line, env),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Unit,
                };
                Ok(Flow::Return(value))
            },
            Statement::Block { statements, .. } => {
                let frame = env.child();
                ensure_sufficient_stack(|| self.exec_body(statements, &frame))
            },
            Statement::FunctionDecl(def) => {
                env.define(&def.name, Value::Function(Closure::new(def.clone(), env.clone())));
                Ok(Flow::Normal)
            },
            Statement::Using { .. } => Ok(Flow::Normal),
            Statement::Namespace { items, .. } => self.exec_body(items, env),
        }
    }

    /// Executes statements in order in `env`, stopping at the first `return`.
    ///
    /// # Returns
    /// The `Flow::Return` that stopped execution, or `Flow::Normal` if every
    /// statement ran.
    pub fn exec_body(&mut self, statements: &[Statement], env: &Env) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.exec_statement(statement, env)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes `statement` in a new frame enclosed by `env`.
    ///
    /// A block statement uses that frame directly instead of nesting a second
    /// one inside it.
    pub(crate) fn exec_in_child(&mut self, statement: &Statement, env: &Env) -> EvalResult<Flow> {
        let frame = env.child();
        ensure_sufficient_stack(|| match statement {
            Statement::Block { statements, .. } => self.exec_body(statements, &frame),
            other => self.exec_statement(other, &frame),
        })
    }
}

/// The value bound by a declaration that has no initializer.
///
/// # Example
/// ```
/// use cshs::{
///     ast::TypeName,
///     interpreter::{evaluator::statement::default_value, value::core::Value},
/// };
///
/// assert_eq!(default_value(&TypeName::Int), Value::Int(0));
/// assert_eq!(default_value(&TypeName::String), Value::Str(String::new()));
/// assert_eq!(default_value(&TypeName::Named("Widget".into())), Value::Unit);
/// ```
#[must_use]
pub fn default_value(ty: &TypeName) -> Value {
    match ty {
        TypeName::Int => Value::Int(0),
        TypeName::Bool => Value::Bool(false),
        TypeName::String => Value::Str(String::new()),
        TypeName::List(_) => Value::empty_list(),
        TypeName::Var | TypeName::Void | TypeName::Named(_) => Value::Unit,
    }
}
