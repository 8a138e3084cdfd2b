//! Single-writer observable value.
//!
//! - [`StateCell`]: the owning writer. It is not `Clone`, so exactly one
//!   place can publish new values.
//! - [`StateView`]: cheap read-only handle onto the same cell. Any number may
//!   exist; they all see every value the writer publishes.
//! - [`Subscription`]: RAII guard returned by [`StateView::subscribe`];
//!   dropping it removes the callback.
//!
//! # Invariants
//!
//! 1. The cell behind a writer and its views is fixed for their lifetime;
//!    only the value inside it is ever replaced.
//! 2. Publishing a value equal to the current one is a no-op (no version
//!    bump, no notifications).
//! 3. Subscribers are called synchronously, in registration order, after the
//!    new value is stored, so they always observe a complete value.
//! 4. A new subscriber is called once with the current value on registration.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
}

impl<T: Clone> Shared<T> {
    fn notify(&self) {
        // Clone everything out first so callbacks may read the cell or
        // (un)subscribe without hitting an active borrow.
        let snapshot = self.value.borrow().clone();
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        for cb in callbacks {
            cb(&snapshot);
        }
    }
}

/// Owning, publishing side of an observable value.
pub struct StateCell<T> {
    shared: Rc<Shared<T>>,
}

impl<T: Clone + PartialEq + 'static> StateCell<T> {
    pub fn new(initial: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(initial),
                version: Cell::new(0),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    /// Replaces the value and notifies subscribers. Returns whether anything changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.shared.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.shared.version.set(self.shared.version.get() + 1);
        self.shared.notify();
        true
    }

    /// Derives the next value from the current one and publishes it in one step.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = {
            let current = self.shared.value.borrow();
            f(&*current)
        };
        self.set(next)
    }

    pub fn view(&self) -> StateView<T> {
        StateView {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("value", &self.shared.value.borrow())
            .field("version", &self.shared.version.get())
            .field("subscribers", &self.shared.subscribers.borrow().len())
            .finish()
    }
}

/// Read-only handle onto a [`StateCell`].
pub struct StateView<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for StateView<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone + 'static> StateView<T> {
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }

    /// Registers `callback` and immediately replays the current value to it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);

        let callback: Callback<T> = Rc::new(callback);
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::clone(&callback)));

        let current = self.get();
        callback(&current);

        let weak: Weak<Shared<T>> = Rc::downgrade(&self.shared);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StateView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateView")
            .field("value", &self.shared.value.borrow())
            .field("version", &self.shared.version.get())
            .finish()
    }
}

/// Keeps a callback registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
