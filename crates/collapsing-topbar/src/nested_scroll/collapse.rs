use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::NestedScrollHandler;
use crate::fling::FlingBehavior;
use crate::scroll::{self, NestedScrollSource, ScrollableState};

/// Collapses `state` with upward deltas before the content scrolls.
pub struct CollapseHandler<S> {
    state: S,
    fling_behavior: Rc<dyn FlingBehavior>,
}

impl<S: ScrollableState> CollapseHandler<S> {
    pub fn new(state: S, fling_behavior: Rc<dyn FlingBehavior>) -> Self {
        Self {
            state,
            fling_behavior,
        }
    }
}

impl<S: ScrollableState> NestedScrollHandler for CollapseHandler<S> {
    fn on_pre_scroll(&self, available: f32, source: NestedScrollSource) -> f32 {
        if available >= 0.0 {
            return 0.0;
        }
        scroll::dispatch_scoped_delta(&self.state, available, source.priority())
    }

    fn on_pre_fling(&self, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            if available >= 0.0 {
                return 0.0;
            }
            let left = scroll::fling(&self.state, self.fling_behavior.as_ref(), available).await;
            available - left
        }
        .boxed_local()
    }
}
