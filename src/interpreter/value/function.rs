use std::rc::Rc;

use crate::{ast::FunctionDef, interpreter::environment::Env};

/// A function value: a declaration plus its defining scope.
///
/// Calls bind the arguments in a fresh frame whose parent is `env`, so the
/// body sees every name that was visible where the function was declared.
#[derive(Clone)]
pub struct Closure {
    pub def: Rc<FunctionDef>,
    pub env: Env,
}

impl Closure {
    #[must_use]
    pub const fn new(def: Rc<FunctionDef>, env: Env) -> Self {
        Self { def, env }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.def.params.len()
    }
}

// The captured frame may contain this closure, so neither impl descends into it.
impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
         .field("name", &self.def.name)
         .field("params", &self.def.params.len())
         .finish_non_exhaustive()
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) && self.env.ptr_eq(&other.env)
    }
}
