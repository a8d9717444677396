use crate::{
    ast::{Expr, Statement},
    interpreter::{
        environment::Env,
        evaluator::core::{Context, EvalResult, Flow},
    },
};

impl Context {
    /// Executes a `while` loop.
    ///
    /// The condition is evaluated before every iteration and must be a
    /// `bool`. Each iteration runs the body in its own child frame, so a
    /// variable declared in the body starts fresh every time round.
    ///
    /// # Returns
    /// The `Flow::Return` that left the loop, or `Flow::Normal` once the
    /// condition is false.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &Statement,
                             line: usize,
                             env: &Env)
                             -> EvalResult<Flow> {
        while self.eval(condition, env)?.as_bool(line)? {
            if let flow @ Flow::Return(_) = self.exec_in_child(body, env)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a C-style `for` loop.
    ///
    /// The initializer runs once in a frame that lives for the whole loop,
    /// so `i` in `for (var i = 0; ...)` is shared by the condition, the step
    /// and every iteration. Each iteration then checks the condition, runs the
    /// body in a fresh child frame and evaluates the step, in that order. A
    /// missing condition is `true`.
    ///
    /// # Example
    /// ```
    /// let output = cshs::run_source_with_io("void Main() {\n\
    ///                                          for (var i = 0; i < 3; i += 1) {\n\
    ///                                            Console.WriteLine(i);\n\
    ///                                          }\n\
    ///                                        }",
    ///                                       "")
    ///                  .unwrap()
    ///                  .1;
    /// assert_eq!(output, "0\n1\n2\n");
    /// ```
    pub(crate) fn exec_for(&mut self,
                           init: Option<&Statement>,
                           condition: Option<&Expr>,
                           step: Option<&Expr>,
                           body: &Statement,
                           line: usize,
                           env: &Env)
                           -> EvalResult<Flow> {
        let loop_env = env.child();
        if let Some(init) = init
           && let flow @ Flow::Return(_) = self.exec_statement(init, &loop_env)?
        {
            return Ok(flow);
        }

        loop {
            if let Some(condition) = condition
               && !self.eval(condition, &loop_env)?.as_bool(line)?
            {
                break;
            }

            if let flow @ Flow::Return(_) = self.exec_in_child(body, &loop_env)? {
                return Ok(flow);
            }

            if let Some(step) = step {
                self.eval(step, &loop_env)?;
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a `foreach` loop.
    ///
    /// The iterable must evaluate to a List. The loop walks a snapshot of the
    /// elements taken when the loop starts; pushing to the list inside the
    /// body does not extend the iteration. The loop variable is bound fresh
    /// in each iteration's frame.
    pub(crate) fn exec_foreach(&mut self,
                               var: &str,
                               iterable: &Expr,
                               body: &Statement,
                               line: usize,
                               env: &Env)
                               -> EvalResult<Flow> {
        let elements = self.eval(iterable, env)?.as_list(line)?.snapshot();

        for element in elements {
            let frame = env.child();
            frame.define(var, element);

            let flow = match body {
                Statement::Block { statements, .. } => self.exec_body(statements, &frame)?,
                other => self.exec_statement(other, &frame)?,
            };
            if let Flow::Return(_) = flow {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }
}
