use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    error::RuntimeErrorKind,
    interpreter::value::{Value, ValueKind},
    util::num::f64_to_index_checked,
};

/// A list value.
///
/// Cloning a `List` clones the handle, not the elements: every copy observes
/// pushes and removals made through any other.
#[derive(Clone, Default)]
pub struct List {
    items: Rc<RefCell<Vec<Value>>>,
}

impl List {
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self { items: Rc::new(RefCell::new(items)) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Appends `value` to the shared elements.
    pub fn push(&self, value: Value) {
        self.items.borrow_mut().push(value);
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::IndexOutOfBounds`] if `index` is fractional,
    /// negative or not less than the length.
    pub fn get(&self, index: f64) -> Result<Value, RuntimeErrorKind> {
        let items = self.items.borrow();
        let position = f64_to_index_checked(index, items.len()).ok_or(
            RuntimeErrorKind::IndexOutOfBounds { index,
                                                 len: items.len() },
        )?;
        Ok(items[position].clone())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::IndexOutOfBounds`] under the same rules as
    /// [`List::get`].
    pub fn remove(&self, index: f64) -> Result<Value, RuntimeErrorKind> {
        let mut items = self.items.borrow_mut();
        let position = f64_to_index_checked(index, items.len()).ok_or(
            RuntimeErrorKind::IndexOutOfBounds { index,
                                                 len: items.len() },
        )?;
        Ok(items.remove(position))
    }

    /// A snapshot of the current elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    /// Whether both handles share the same elements.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

/// Handles of the lists currently being printed. A list can hold itself, so
/// nested walks stop at a list already on this stack.
type Ancestors = Vec<*const RefCell<Vec<Value>>>;

/// Pairs of lists currently being compared.
type ComparedPairs = Vec<(*const RefCell<Vec<Value>>, *const RefCell<Vec<Value>>)>;

impl List {
    fn id(&self) -> *const RefCell<Vec<Value>> {
        Rc::as_ptr(&self.items)
    }

    /// Element-wise equality. A pair already under comparison counts as
    /// equal, so cyclic lists terminate.
    fn eq_nested(&self, other: &Self, seen: &mut ComparedPairs) -> bool {
        let pair = (self.id(), other.id());
        if self.ptr_eq(other) || seen.contains(&pair) {
            return true;
        }

        let left = self.items.borrow();
        let right = other.items.borrow();
        if left.len() != right.len() {
            return false;
        }

        seen.push(pair);
        let equal = left.iter().zip(right.iter()).all(|(a, b)| match (&a.kind, &b.kind) {
            (ValueKind::List(a), ValueKind::List(b)) => a.eq_nested(b, seen),
            (a, b) => a == b,
        });
        seen.pop();
        equal
    }

    /// Writes the list, quoting strings, with `[...]` in place of a list
    /// that is already being written.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, seen: &mut Ancestors) -> fmt::Result {
        if seen.contains(&self.id()) {
            return f.write_str("[...]");
        }

        seen.push(self.id());
        f.write_str("[")?;
        for (i, item) in self.items.borrow().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match &item.kind {
                ValueKind::String(s) => write!(f, "{s:?}")?,
                ValueKind::List(inner) => inner.fmt_nested(f, seen)?,
                other => write!(f, "{other}")?,
            }
        }
        seen.pop();
        f.write_str("]")
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.eq_nested(other, &mut Vec::new())
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut Vec::new())
    }
}
