use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::interpreter::value::{core::Value, function::Closure};

/// A single scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Frame {
    bindings: HashMap<String, Value>,
    parent:   Option<Env>,
}

/// A handle to a frame in the scope chain.
///
/// Frames are reference counted so a closure can keep its defining scope alive
/// after the block that created it has exited. Dropping the last handle to a
/// child frame is what pops it; that happens on every exit path, including an
/// early `return` or an error.
#[derive(Debug, Clone, Default)]
pub struct Env(Rc<RefCell<Frame>>);

impl Env {
    /// Creates a global frame with no parent.
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Creates a new empty frame enclosed by `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Frame { bindings: HashMap::new(),
                                          parent:   Some(self.clone()), })))
    }

    /// Binds `name` in this frame, replacing any binding of the same name in
    /// this frame and shadowing outer ones.
    pub fn define(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Looks `name` up, walking outward through the enclosing frames.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let current = frame.0.borrow();
                if let Some(value) = current.bindings.get(name) {
                    return Some(value.clone());
                }
                current.parent.clone()?
            };
            frame = parent;
        }
    }

    /// Updates the nearest existing binding of `name`.
    ///
    /// Returns `false` when no enclosing frame binds the name.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        let mut frame = self.clone();
        loop {
            let parent = {
                let mut current = frame.0.borrow_mut();
                if let Some(slot) = current.bindings.get_mut(name) {
                    *slot = value;
                    return true;
                }
                match current.parent.clone() {
                    Some(parent) => parent,
                    None => return false,
                }
            };
            frame = parent;
        }
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// The global mapping from function name to function value.
///
/// Filled by a pre-pass over the top-level declarations before any code runs,
/// so calls may refer to functions declared later in the file. Registering a
/// name twice keeps the later declaration.
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<String, Closure>,
}

impl FunctionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, closure: Closure) {
        let name = closure.name().to_string();
        if self.functions.insert(name.clone(), closure).is_some() {
            tracing::debug!(function = %name, "redeclared function replaces earlier definition");
        } else {
            tracing::trace!(function = %name, "registered function");
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Closure> {
        self.functions.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward_and_shadowing_is_local() {
        let global = Env::global();
        global.define("x", Value::Int(1));

        let inner = global.child();
        assert_eq!(inner.lookup("x"), Some(Value::Int(1)));

        inner.define("x", Value::Int(2));
        assert_eq!(inner.lookup("x"), Some(Value::Int(2)));
        assert_eq!(global.lookup("x"), Some(Value::Int(1)));
        assert_eq!(inner.lookup("y"), None);
    }

    #[test]
    fn assign_mutates_the_defining_frame() {
        let global = Env::global();
        global.define("count", Value::Int(0));

        let inner = global.child().child();
        assert!(inner.assign("count", Value::Int(5)));
        assert_eq!(global.lookup("count"), Some(Value::Int(5)));
        assert!(!inner.assign("missing", Value::Int(1)));
    }
}
