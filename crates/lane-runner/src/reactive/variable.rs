use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::channel::{EventChannel, SubscriptionId};

struct Shared<T> {
    name: String,
    value: RefCell<T>,
    changed: EventChannel<T>,
}

/// A named, shared value that notifies subscribers when it changes.
///
/// Cloning yields another handle to the same value. Setting a value equal to
/// the current one is a no-op and notifies nobody.
pub struct Variable<T> {
    shared: Rc<Shared<T>>,
}

impl<T: Clone + PartialEq> Variable<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                name: name.into(),
                value: RefCell::new(value),
                changed: EventChannel::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Store `value` and notify subscribers synchronously.
    /// Returns `false` (and notifies nobody) when the value is unchanged.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.shared.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        // Borrow released: listeners may read the variable.
        self.shared.changed.raise(&value);
        true
    }

    /// Apply `f` to the current value and store the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.shared.value.borrow());
        self.set(next)
    }

    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        self.shared.changed.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.changed.unsubscribe(id)
    }

    /// Whether both handles point at the same value.
    pub fn same_as(&self, other: &Variable<T>) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.shared.name)
            .field("value", &*self.shared.value.borrow())
            .finish()
    }
}
