use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use super::NestedScrollHandler;
use crate::fling::FlingBehavior;
use crate::scroll::{self, NestedScrollSource, ScrollableState};

/// When a downward delta may expand a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Before the content scrolls.
    Always,
    /// Only with what the content left over, i.e. once it reached its top.
    AtTop,
}

impl ExpandMode {
    pub fn from_expand_always(expand_always: bool) -> Self {
        if expand_always {
            ExpandMode::Always
        } else {
            ExpandMode::AtTop
        }
    }
}

/// Expands `state` with downward deltas, in the phase chosen by its [`ExpandMode`].
pub struct ExpandHandler<S> {
    state: S,
    fling_behavior: Rc<dyn FlingBehavior>,
    mode: ExpandMode,
}

impl<S: ScrollableState> ExpandHandler<S> {
    pub fn new(state: S, fling_behavior: Rc<dyn FlingBehavior>, mode: ExpandMode) -> Self {
        Self {
            state,
            fling_behavior,
            mode,
        }
    }

    pub fn mode(&self) -> ExpandMode {
        self.mode
    }

    fn expand_by(&self, available: f32, source: NestedScrollSource) -> f32 {
        if available <= 0.0 {
            return 0.0;
        }
        scroll::dispatch_scoped_delta(&self.state, available, source.priority())
    }

    async fn expand_with_fling(&self, available: f32) -> f32 {
        if available <= 0.0 {
            return 0.0;
        }
        let left = scroll::fling(&self.state, self.fling_behavior.as_ref(), available).await;
        available - left
    }
}

impl<S: ScrollableState> NestedScrollHandler for ExpandHandler<S> {
    fn on_pre_scroll(&self, available: f32, source: NestedScrollSource) -> f32 {
        match self.mode {
            ExpandMode::Always => self.expand_by(available, source),
            ExpandMode::AtTop => 0.0,
        }
    }

    fn on_post_scroll(&self, _consumed: f32, available: f32, source: NestedScrollSource) -> f32 {
        match self.mode {
            ExpandMode::Always => 0.0,
            ExpandMode::AtTop => self.expand_by(available, source),
        }
    }

    fn on_pre_fling(&self, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            match self.mode {
                ExpandMode::Always => self.expand_with_fling(available).await,
                ExpandMode::AtTop => 0.0,
            }
        }
        .boxed_local()
    }

    fn on_post_fling(&self, _consumed: f32, available: f32) -> LocalBoxFuture<'_, f32> {
        async move {
            match self.mode {
                ExpandMode::Always => 0.0,
                ExpandMode::AtTop => self.expand_with_fling(available).await,
            }
        }
        .boxed_local()
    }
}
