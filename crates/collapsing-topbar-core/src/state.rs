use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`MutableState::add_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ChangeListener = Rc<dyn Fn()>;

/// Observable value cell.
///
/// Reads always return the latest committed value. Listeners fire after a `set` that actually
/// changes the value; setting an equal value is silent.
pub struct MutableState<T: Copy + PartialEq> {
    inner: Rc<StateInner<T>>,
}

struct StateInner<T> {
    value: Cell<T>,
    listeners: RefCell<Vec<(u64, ChangeListener)>>,
    next_listener_id: Cell<u64>,
}

impl<T: Copy + PartialEq> MutableState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: Cell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    /// Commits `value`. Returns `true` when the stored value changed.
    pub fn set(&self, value: T) -> bool {
        if self.inner.value.get() == value {
            return false;
        }
        self.inner.value.set(value);
        self.notify();
        true
    }

    /// Applies `f` to the current value and commits the result.
    pub fn update(&self, f: impl FnOnce(T) -> T) -> bool {
        self.set(f(self.get()))
    }

    pub fn add_change_listener(&self, listener: impl Fn() + 'static) -> ListenerId {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        ListenerId(id)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id.0);
        listeners.len() != before
    }

    fn notify(&self) {
        // Listeners may read or write this state, so the list is not borrowed while they run.
        let listeners: SmallVec<[ChangeListener; 4]> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl<T: Copy + PartialEq> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for MutableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy + PartialEq + fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
