use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            utils::check_arity,
        },
        value::core::Value,
    },
    util::num::len_to_i64,
};

impl Context {
    /// Dispatches a method call on the receiver's runtime type.
    ///
    /// Lists support:
    /// - `push_back(v)` / `add(v)`: append in place, returning `Unit`,
    /// - `size()`: the current length,
    /// - `pop_back()`: remove and return the last element,
    /// - `clear()`: remove every element.
    ///
    /// Strings support `size()` and `Length()`, both the character count.
    ///
    /// Lists are shared, so a mutation through one alias is visible through
    /// every other.
    ///
    /// # Errors
    /// `TypeMismatch` for any other receiver and method combination,
    /// `ArityMismatch` for a wrong argument count and `IndexOutOfRange` when
    /// popping an empty list.
    ///
    /// # Example
    /// ```
    /// use cshs::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let xs = Value::empty_list();
    /// let alias = xs.clone();
    ///
    /// Context::call_method(&xs, "push_back", &[Value::Int(1)], 1).unwrap();
    /// Context::call_method(&alias, "add", &[Value::Int(2)], 1).unwrap();
    ///
    /// assert_eq!(Context::call_method(&xs, "size", &[], 1), Ok(Value::Int(2)));
    /// assert_eq!(Context::call_method(&xs, "pop_back", &[], 1), Ok(Value::Int(2)));
    /// ```
    pub fn call_method(receiver: &Value,
                       method: &str,
                       args: &[Value],
                       line: usize)
                       -> EvalResult<Value> {
        match (receiver, method) {
            (Value::List(list), "push_back" | "add") => {
                check_arity(method, args, 1, line)?;
                list.push(args[0].clone());
                Ok(Value::Unit)
            },
            (Value::List(list), "size") => {
                check_arity(method, args, 0, line)?;
                Ok(Value::Int(len_to_i64(list.len())))
            },
            (Value::List(list), "pop_back") => {
                check_arity(method, args, 0, line)?;
                list.pop().ok_or_else(|| RuntimeError::index_out_of_range(-1, 0, line))
            },
            (Value::List(list), "clear") => {
                check_arity(method, args, 0, line)?;
                list.clear();
                Ok(Value::Unit)
            },
            (Value::Str(text), "size" | "Length") => {
                check_arity(method, args, 0, line)?;
                Ok(Value::Int(len_to_i64(text.chars().count())))
            },
            (receiver, method) => {
                Err(RuntimeError::type_mismatch(format!("{} has no method '{method}'",
                                                        receiver.type_name()),
                                                line))
            },
        }
    }
}
