use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll, Waker};

/// Identifier of a pending frame callback.
pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

/// Source of animation frames.
///
/// Animations and flings register one-shot callbacks (or await [`NextFrame`]) and the host
/// drives them by calling [`FrameClock::drain_frame_callbacks`] once per frame with a
/// monotonically increasing timestamp in nanoseconds.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<FrameClockInner>,
}

#[derive(Default)]
struct FrameClockInner {
    callbacks: RefCell<Vec<(FrameCallbackId, FrameCallback)>>,
    next_id: Cell<FrameCallbackId>,
    last_frame_nanos: Cell<Option<u64>>,
}

impl FrameClockInner {
    fn cancel(&self, id: FrameCallbackId) {
        self.callbacks
            .borrow_mut()
            .retain(|(callback_id, _)| *callback_id != id);
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `callback` to run on the next drained frame.
    ///
    /// Dropping the returned registration before the frame arrives cancels the callback.
    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .callbacks
            .borrow_mut()
            .push((id, Box::new(callback)));
        FrameCallbackRegistration {
            clock: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Future resolving with the timestamp of the next drained frame.
    pub fn next_frame(&self) -> NextFrame {
        NextFrame::new(self.clone())
    }

    /// Runs every callback registered before this call. Callbacks registered while draining
    /// are deferred to the following frame.
    ///
    /// Returns the number of callbacks invoked.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        self.inner.last_frame_nanos.set(Some(frame_time_nanos));
        let callbacks = std::mem::take(&mut *self.inner.callbacks.borrow_mut());
        let count = callbacks.len();
        for (_, callback) in callbacks {
            callback(frame_time_nanos);
        }
        if count > 0 {
            log::trace!("frame {frame_time_nanos}: drained {count} callbacks");
        }
        count
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.inner.callbacks.borrow().is_empty()
    }

    /// Timestamp passed to the most recent [`FrameClock::drain_frame_callbacks`] call.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.last_frame_nanos.get()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("pending", &self.inner.callbacks.borrow().len())
            .field("last_frame_nanos", &self.inner.last_frame_nanos.get())
            .finish()
    }
}

/// Handle to a scheduled frame callback. Cancels the callback when dropped.
pub struct FrameCallbackRegistration {
    clock: Weak<FrameClockInner>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn cancel_pending(&mut self) {
        if let (Some(id), Some(clock)) = (self.id.take(), self.clock.upgrade()) {
            clock.cancel(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

struct NextFrameState {
    registration: Option<FrameCallbackRegistration>,
    time: Option<u64>,
    waker: Option<Waker>,
}

/// Future returned by [`FrameClock::next_frame`].
pub struct NextFrame {
    clock: FrameClock,
    state: Rc<RefCell<NextFrameState>>,
}

impl NextFrame {
    fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            state: Rc::new(RefCell::new(NextFrameState {
                registration: None,
                time: None,
                waker: None,
            })),
        }
    }
}

impl Future for NextFrame {
    type Output = u64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(time) = self.state.borrow().time {
            return Poll::Ready(time);
        }

        let needs_registration = {
            let mut state = self.state.borrow_mut();
            state.waker = Some(cx.waker().clone());
            state.registration.is_none()
        };

        if needs_registration {
            let weak_state = Rc::downgrade(&self.state);
            let registration = self.clock.with_frame_nanos(move |time| {
                let Some(state) = weak_state.upgrade() else {
                    return;
                };
                let waker = {
                    let mut state = state.borrow_mut();
                    state.time = Some(time);
                    state.registration = None;
                    state.waker.take()
                };
                if let Some(waker) = waker {
                    waker.wake();
                }
            });
            self.state.borrow_mut().registration = Some(registration);
        }

        Poll::Pending
    }
}

impl Drop for NextFrame {
    fn drop(&mut self) {
        let registration = self.state.borrow_mut().registration.take();
        drop(registration);
    }
}

#[cfg(test)]
#[path = "tests/frame_clock_tests.rs"]
mod tests;
