//! Nested scroll handlers.
//!
//! Each handler is a small strategy that consumes part of a nested scroll or fling delta on
//! behalf of one state. A [`ScrollCoordinator`] chains them: every handler sees what the
//! previous ones left over.
//!
//! Deltas are vertical. Negative values move content up (collapsing the top bar), positive
//! values move it down.

mod collapse;
mod coordinator;
mod expand;
mod snap;

use std::rc::Rc;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use smallvec::SmallVec;

use crate::fling::FlingBehavior;
use crate::scroll::NestedScrollSource;
use crate::snap::CollapsingTopBarSnapBehavior;

pub use collapse::CollapseHandler;
pub use coordinator::ScrollCoordinator;
pub use expand::{ExpandHandler, ExpandMode};
pub use snap::SnapHandler;

/// Ordered handler list as built by a [`NestedScrollStrategy`].
pub type HandlerList = SmallVec<[Box<dyn NestedScrollHandler>; 5]>;

/// Participant in nested scrolling. Every phase consumes nothing unless overridden.
///
/// Return values are the consumed part of `available`.
pub trait NestedScrollHandler {
    /// Offered a drag or side-effect delta before the scrolled content sees it.
    fn on_pre_scroll(&self, _available: f32, _source: NestedScrollSource) -> f32 {
        0.0
    }

    /// Offered what the scrolled content did not consume.
    fn on_post_scroll(&self, _consumed: f32, _available: f32, _source: NestedScrollSource) -> f32 {
        0.0
    }

    /// Offered a release velocity before the scrolled content flings.
    fn on_pre_fling(&self, _available: f32) -> LocalBoxFuture<'_, f32> {
        future::ready(0.0).boxed_local()
    }

    /// Offered the velocity left after the scrolled content's fling.
    fn on_post_fling(&self, _consumed: f32, _available: f32) -> LocalBoxFuture<'_, f32> {
        future::ready(0.0).boxed_local()
    }
}

/// Builds the handler sequence used for a given state.
pub trait NestedScrollStrategy<S> {
    fn create_handlers(
        &self,
        state: &S,
        fling_behavior: Rc<dyn FlingBehavior>,
        snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
    ) -> HandlerList;

    /// Convenience for wrapping the handlers in a coordinator.
    fn create_coordinator(
        &self,
        state: &S,
        fling_behavior: Rc<dyn FlingBehavior>,
        snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
    ) -> ScrollCoordinator {
        ScrollCoordinator::new(self.create_handlers(state, fling_behavior, snap_behavior))
    }
}

#[cfg(test)]
#[path = "../tests/nested_scroll_tests.rs"]
mod tests;
