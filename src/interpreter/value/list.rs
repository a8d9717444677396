use std::{cell::RefCell, fmt, rc::Rc};

use crate::{interpreter::value::core::Value, util::stack::ensure_sufficient_stack};

/// A shared, mutable list.
///
/// Cloning a `ListRef` clones the handle, not the elements: both handles see
/// the same vector. Equality compares the elements, and terminates on lists
/// that contain themselves.
#[derive(Clone, Default)]
pub struct ListRef(Rc<RefCell<Vec<Value>>>);

impl ListRef {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_vec(values: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replaces the element at `index`. Returns `false` if out of range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            },
            None => false,
        }
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().pop()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Copies the current elements out, releasing the borrow.
    ///
    /// Iteration and rendering work on a snapshot so the list may be mutated
    /// while they run.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Returns `true` if both handles refer to the same list.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ListRef {
    fn eq(&self, other: &Self) -> bool {
        list_eq(self, other, &mut Vec::new())
    }
}

impl fmt::Debug for ListRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List({})", Value::List(self.clone()))
    }
}

/// Element-wise equality that treats a pair already under comparison as
/// equal, so self-referencing lists compare in finite time.
fn list_eq(a: &ListRef, b: &ListRef, visited: &mut Vec<(ListRef, ListRef)>) -> bool {
    if a.ptr_eq(b) || visited.iter().any(|(x, y)| x.ptr_eq(a) && y.ptr_eq(b)) {
        return true;
    }

    let (left, right) = (a.snapshot(), b.snapshot());
    if left.len() != right.len() {
        return false;
    }

    visited.push((a.clone(), b.clone()));
    left.iter().zip(&right).all(|pair| match pair {
                                   (Value::List(x), Value::List(y)) => {
                                       ensure_sufficient_stack(|| list_eq(x, y, visited))
                                   },
                                   (x, y) => x == y,
                               })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = ListRef::new();
        let b = a.clone();
        b.push(Value::Int(1));

        assert_eq!(a.len(), 1);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn set_out_of_range_is_rejected() {
        let list = ListRef::from_vec(vec![Value::Int(1)]);

        assert!(list.set(0, Value::Int(5)));
        assert!(!list.set(1, Value::Int(5)));
        assert_eq!(list.get(0), Some(Value::Int(5)));
    }

    #[test]
    fn equality_compares_elements() {
        let a = ListRef::from_vec(vec![Value::Int(1), Value::from("x")]);
        let b = ListRef::from_vec(vec![Value::Int(1), Value::from("x")]);
        let c = ListRef::from_vec(vec![Value::Int(1)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn self_containing_lists_compare_and_print() {
        let a = ListRef::new();
        a.push(Value::List(a.clone()));
        let b = ListRef::new();
        b.push(Value::List(b.clone()));
        let c = ListRef::new();
        c.push(Value::Int(1));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{a:?}"), "List([[...]])");
    }
}
