use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Env,
        evaluator::{
            core::{Context, EvalResult, Flow, MAX_CALL_DEPTH},
            function::{console, list},
            utils::check_arity,
        },
        value::{core::Value, function::Closure},
    },
    util::stack::ensure_sufficient_stack,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context (for console access), a slice of evaluated
/// argument values and the line number.
type BuiltinFn = fn(&mut Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

/// Defines builtin functions by generating a lookup table.
///
/// Each entry provides:
/// - a string name, dotted for qualified built-ins,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces `BuiltinDef` (internal metadata) and `BUILTIN_TABLE`
/// (static table for lookup).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "Console.WriteLine" => { arity: Arity::OneOf(&[0, 1]), func: console::write_line },
    "Console.ReadLine"  => { arity: Arity::Exact(0),       func: console::read_line },
    "List"              => { arity: Arity::Exact(0),       func: list::new_list },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
        }
    }

    /// The count reported when a call does not satisfy the constraint.
    fn expected(&self) -> usize {
        match self {
            Self::Exact(m) => *m,
            Self::OneOf(arr) => arr.last().copied().unwrap_or_default(),
        }
    }
}

/// What a callee name resolved to.
enum Callee {
    User(Closure),
    Builtin(&'static BuiltinDef),
    Method(Value, String),
}

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee name is resolved in this order:
    /// 1. a function in the function table,
    /// 2. a function value bound to that name in scope (a nested function),
    /// 3. a built-in,
    /// 4. for a dotted name `Root.method` whose root is a bound variable, a
    ///    method call on that variable's value.
    ///
    /// Only then are the arguments evaluated, left to right.
    ///
    /// # Parameters
    /// - `callee`: Function name, possibly dotted.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line number for error reporting.
    /// - `env`: Scope of the call site.
    ///
    /// # Returns
    /// The function result or an error if lookup or arity fails.
    pub(crate) fn eval_call(&mut self,
                            callee: &str,
                            arguments: &[Expr],
                            line: usize,
                            env: &Env)
                            -> EvalResult<Value> {
        let resolved = self.resolve_callee(callee, env)
                           .ok_or_else(|| RuntimeError::unknown_function(callee, line))?;
        let args = self.eval_arguments(arguments, env)?;

        match resolved {
            Callee::User(closure) => self.call_closure(&closure, args, line),
            Callee::Builtin(builtin) => {
                if !builtin.arity.check(args.len()) {
                    return Err(RuntimeError::arity_mismatch(builtin.name,
                                                            builtin.arity.expected(),
                                                            args.len(),
                                                            line));
                }
                (builtin.func)(self, &args, line)
            },
            Callee::Method(receiver, method) => Self::call_method(&receiver, &method, &args, line),
        }
    }

    fn resolve_callee(&self, callee: &str, env: &Env) -> Option<Callee> {
        if let Some(closure) = self.functions.get(callee) {
            return Some(Callee::User(closure.clone()));
        }
        if let Some(Value::Function(closure)) = env.lookup(callee) {
            return Some(Callee::User(closure));
        }
        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == callee) {
            return Some(Callee::Builtin(builtin));
        }
        if let Some((root, method)) = callee.split_once('.')
           && !method.contains('.')
           && let Some(receiver) = env.lookup(root)
        {
            return Some(Callee::Method(receiver, method.to_string()));
        }
        None
    }

    /// Calls a user function with already evaluated arguments.
    ///
    /// The arguments are bound positionally in a fresh frame whose parent is
    /// the function's defining scope, never the caller's. The body's `return`
    /// value becomes the result; falling off the end yields `Unit`.
    ///
    /// # Errors
    /// `ArityMismatch` if the argument count differs from the parameter count,
    /// `RecursionLimit` if [`MAX_CALL_DEPTH`] calls are already active, and
    /// any error raised by the body.
    ///
    /// # Example
    /// ```
    /// use cshs::{
    ///     error::RuntimeErrorKind,
    ///     interpreter::{
    ///         evaluator::core::Context, lexer::tokenize, parser::parse_program,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let tokens = tokenize("int Twice(int n) { return n * 2; }").unwrap();
    /// let program = parse_program(&tokens).unwrap();
    ///
    /// let mut context = Context::with_io(&b""[..], std::io::sink());
    /// context.load_program(&program.items);
    /// let twice = context.functions.get("Twice").cloned().unwrap();
    ///
    /// assert_eq!(context.call_closure(&twice, vec![Value::Int(21)], 1), Ok(Value::Int(42)));
    /// assert_eq!(context.call_closure(&twice, vec![], 1).unwrap_err().kind,
    ///            RuntimeErrorKind::ArityMismatch);
    /// ```
    pub fn call_closure(&mut self,
                        closure: &Closure,
                        args: Vec<Value>,
                        line: usize)
                        -> EvalResult<Value> {
        check_arity(closure.name(), &args, closure.arity(), line)?;
        if self.call_depth >= MAX_CALL_DEPTH {
            tracing::debug!(function = closure.name(), line, "call depth limit reached");
            return Err(RuntimeError::recursion_limit(MAX_CALL_DEPTH, line));
        }
        tracing::trace!(function = closure.name(),
                        args = args.len(),
                        depth = self.call_depth,
                        "call");

        let frame = closure.env.child();
        for (name, value) in closure.def.param_names().zip(args) {
            frame.define(name, value);
        }

        self.call_depth += 1;
        let flow = ensure_sufficient_stack(|| self.exec_body(&closure.def.body, &frame));
        self.call_depth -= 1;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Unit),
        }
    }
}
