use std::io::{self, BufRead, Write};

use crate::{
    ast::{Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{Env, FunctionTable},
        value::{core::Value, function::Closure},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The outcome of executing a statement.
///
/// `Return` travels upward through every enclosing block and loop until the
/// function call that owns it turns it into the call's result. Errors travel
/// on the `Err` side of [`EvalResult`].
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` was executed with the given value (`Unit` for a bare
    /// `return;`).
    Return(Value),
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the function table, the global
/// frame and the console streams used by the built-ins.
///
/// ## Usage
///
/// A `Context` is created once per program (or once per REPL session) and
/// reused for every statement. Functions and globals registered through one
/// call stay visible to the next.
pub struct Context {
    /// User functions by name, filled by [`Context::load_program`].
    pub functions:         FunctionTable,
    /// The outermost frame. Global statements run here and top-level
    /// functions capture it.
    pub globals:           Env,
    /// Number of user function calls currently executing.
    pub(crate) call_depth: usize,
    input:                 Box<dyn BufRead>,
    output:                Box<dyn Write>,
}

/// How many user function calls may be active at once.
pub const MAX_CALL_DEPTH: usize = 2_000;

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a context reading from standard input and writing to standard
    /// output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }

    /// Creates a context over the given console streams.
    ///
    /// # Example
    /// ```
    /// use cshs::interpreter::evaluator::core::Context;
    ///
    /// let context = Context::with_io(&b""[..], Vec::new());
    /// assert!(context.functions.is_empty());
    /// assert_eq!(context.globals.lookup("x"), None);
    /// ```
    pub fn with_io(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self { functions:  FunctionTable::new(),
               globals:    Env::global(),
               call_depth: 0,
               input:      Box::new(input),
               output:     Box::new(output), }
    }

    /// Registers every function declared at top level, including those nested
    /// in `namespace` blocks, into the function table.
    ///
    /// This is the pre-pass that makes forward references work: it runs before
    /// any statement executes. A name declared twice keeps the later body.
    pub fn load_program(&mut self, items: &[Statement]) {
        for item in items {
            match item {
                Statement::FunctionDecl(def) => {
                    self.functions.register(Closure::new(def.clone(), self.globals.clone()));
                },
                Statement::Namespace { items, .. } => self.load_program(items),
                _ => {},
            }
        }
    }

    /// Executes the global statements of `items` in order in the global frame.
    ///
    /// Function declarations and `using` directives are skipped; namespaces
    /// are entered. A top-level `return` stops the remaining statements.
    ///
    /// # Returns
    /// The value of the final item when it is an expression statement, so an
    /// interactive session can echo it.
    pub fn execute_items(&mut self, items: &[Statement]) -> EvalResult<Option<Value>> {
        let globals = self.globals.clone();
        let mut last = None;

        for item in items {
            last = None;
            match item {
                Statement::FunctionDecl(_) | Statement::Using { .. } => {},
                Statement::Namespace { items, .. } => {
                    last = self.execute_items(items)?;
                },
                Statement::Expression { expr, .. } => {
                    last = Some(self.eval(expr, &globals)?);
                },
                statement => {
                    if let Flow::Return(_) = self.exec_statement(statement, &globals)? {
                        tracing::debug!(line = statement.line_number(), "top-level return");
                        break;
                    }
                },
            }
        }

        Ok(last)
    }

    /// Runs a parsed program.
    ///
    /// Registers its functions, executes its global statements and finally
    /// invokes `Main` with no arguments.
    ///
    /// # Returns
    /// The value returned by `Main` (`Unit` if it returns nothing).
    ///
    /// # Errors
    /// Any runtime error raised along the way. A program with no `Main` fails
    /// with `UnknownFunction` at the last line of the source.
    pub fn run_program(&mut self, program: &Program) -> EvalResult<Value> {
        self.load_program(&program.items);
        tracing::debug!(functions = self.functions.len(), "function table loaded");

        self.execute_items(&program.items)?;

        let main = self.functions
                       .get("Main")
                       .cloned()
                       .ok_or_else(|| RuntimeError::unknown_function("Main", program.end_line))?;
        self.call_closure(&main, Vec::new(), program.end_line)
    }

    /// Evaluates an expression in the scope `env` and returns the resulting
    /// value.
    ///
    /// This is the main entry point for expression evaluation. The evaluator
    /// dispatches on the expression variant; operands are always evaluated
    /// left to right.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: The innermost frame visible at this point.
    ///
    /// # Returns
    /// The value of the expression. Expressions with nothing to produce, such
    /// as a call to a `void` function, yield `Value::Unit`.
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_expr(expr, env))
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        match expr {
            Expr::IntLiteral { value, .. } => Ok(Value::Int(*value)),
            Expr::StringLiteral { value, .. } => Ok(Value::Str(value.clone())),
            Expr::BoolLiteral { value, .. } => Ok(Value::Bool(*value)),
            Expr::Identifier { name, line } => self.eval_identifier(name, *line, env),
            Expr::Binary { op,
                           left,
                           right,
                           line, } => self.eval_binary_expr(*op, left, right, *line, env),
            Expr::Unary { op, operand, line } => {
                let value = self.eval(operand, env)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line, env),
            Expr::Index { target, index, line } => {
                let target = self.eval(target, env)?;
                let index = self.eval(index, env)?;
                Self::eval_index(&target, &index, *line)
            },
            Expr::MethodCall { target,
                               method,
                               arguments,
                               line, } => {
                let receiver = self.eval(target, env)?;
                let args = self.eval_arguments(arguments, env)?;
                Self::call_method(&receiver, method, &args, *line)
            },
            Expr::ListLiteral { elements, .. } => {
                let values = self.eval_arguments(elements, env)?;
                Ok(Value::from(values))
            },
            Expr::Assign { target, value, line } => self.eval_assign(target, value, *line, env),
        }
    }

    /// Evaluates each expression in order.
    pub(crate) fn eval_arguments(&mut self, exprs: &[Expr], env: &Env) -> EvalResult<Vec<Value>> {
        exprs.iter().map(|expr| self.eval(expr, env)).collect()
    }

    /// Resolves a name to its value.
    ///
    /// Variables shadow functions. A bare function name that is not bound as
    /// a variable evaluates to the function itself.
    fn eval_identifier(&self, name: &str, line: usize, env: &Env) -> EvalResult<Value> {
        if let Some(value) = env.lookup(name) {
            return Ok(value);
        }
        if let Some(closure) = self.functions.get(name) {
            return Ok(Value::Function(closure.clone()));
        }
        Err(RuntimeError::unbound_variable(name, line))
    }

    /// Writes `text` and a newline to the program output.
    pub(crate) fn write_line(&mut self, text: &str, line: usize) -> EvalResult<()> {
        writeln!(self.output, "{text}").map_err(|e| RuntimeError::io(&e, line))
    }

    /// Reads one line of program input without its line terminator.
    ///
    /// Returns an empty string at end of input. Pending output is flushed
    /// first so a prompt written with `Console.WriteLine` is visible before
    /// the read blocks.
    pub(crate) fn read_line(&mut self, line: usize) -> EvalResult<String> {
        self.flush(line)?;

        let mut buffer = String::new();
        self.input.read_line(&mut buffer).map_err(|e| RuntimeError::io(&e, line))?;

        let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed);
        Ok(buffer)
    }

    /// Reads a raw line from the context's input for the interactive loop.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_source_line(&mut self) -> io::Result<Option<String>> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer))
    }

    /// Writes text without a trailing newline, for prompts and echoes.
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    pub(crate) fn flush(&mut self, line: usize) -> EvalResult<()> {
        self.output.flush().map_err(|e| RuntimeError::io(&e, line))
    }
}
