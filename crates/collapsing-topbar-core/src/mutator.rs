use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Priority of a mutation request. Later variants win over earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MutatePriority {
    /// Programmatic work such as animations and fling side effects.
    #[default]
    Default,
    /// Direct manipulation by the user.
    UserInput,
    /// Work that must not be interrupted by user input.
    PreventUserInput,
}

#[derive(Debug, Clone, Copy)]
struct Holder {
    token: u64,
    priority: MutatePriority,
}

/// Exclusive-access lock with priority based preemption.
///
/// A request whose priority is equal to or higher than the current holder's takes the lock
/// and the previous [`MutatorGuard`] becomes inactive. A lower-priority request is refused.
#[derive(Clone, Default)]
pub struct MutatorMutex {
    inner: Rc<MutexInner>,
}

#[derive(Default)]
struct MutexInner {
    current: Cell<Option<Holder>>,
    next_token: Cell<u64>,
}

impl MutatorMutex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_mutate(&self, priority: MutatePriority) -> Option<MutatorGuard> {
        if let Some(holder) = self.inner.current.get() {
            if priority < holder.priority {
                log::debug!(
                    "mutation at {priority:?} refused, held at {:?}",
                    holder.priority
                );
                return None;
            }
            log::debug!(
                "mutation at {:?} cancelled by {priority:?}",
                holder.priority
            );
        }

        let token = self.inner.next_token.get();
        self.inner.next_token.set(token.wrapping_add(1));
        self.inner.current.set(Some(Holder { token, priority }));
        Some(MutatorGuard {
            mutex: Rc::clone(&self.inner),
            token,
            priority,
        })
    }

    pub fn is_locked(&self) -> bool {
        self.inner.current.get().is_some()
    }

    /// Priority of the current holder, if any.
    pub fn current_priority(&self) -> Option<MutatePriority> {
        self.inner.current.get().map(|holder| holder.priority)
    }
}

impl fmt::Debug for MutatorMutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorMutex")
            .field("holder", &self.current_priority())
            .finish()
    }
}

/// Proof of holding a [`MutatorMutex`]. Releases the lock on drop unless it was preempted.
pub struct MutatorGuard {
    mutex: Rc<MutexInner>,
    token: u64,
    priority: MutatePriority,
}

impl MutatorGuard {
    /// `false` once a competing request has taken over the lock.
    pub fn is_active(&self) -> bool {
        self.mutex
            .current
            .get()
            .is_some_and(|holder| holder.token == self.token)
    }

    pub fn priority(&self) -> MutatePriority {
        self.priority
    }
}

impl Drop for MutatorGuard {
    fn drop(&mut self) {
        if self.is_active() {
            self.mutex.current.set(None);
        }
    }
}

impl fmt::Debug for MutatorGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutatorGuard")
            .field("priority", &self.priority)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/mutator_tests.rs"]
mod tests;
