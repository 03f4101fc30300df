use std::rc::Rc;

use collapsing_topbar_animation::AnimationSpec;
use collapsing_topbar_core::{
    FrameClock, ListenerId, MutatePriority, MutableState, MutatorMutex,
};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::controls::{self, CollapsingTopBarControls};
use crate::layout_info::CollapsingTopBarLayoutInfo;
use crate::scroll::{ScrollScope, ScrollableState};
use crate::snap::{CollapsingTopBarSnapScope, SnapProgress};

/// Collapse axis of a top bar: its current height between the measured collapsed and
/// expanded heights.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct CollapsingTopBarState {
    inner: Rc<TopBarStateInner>,
}

struct TopBarStateInner {
    layout_info: MutableState<CollapsingTopBarLayoutInfo>,
    mutex: MutatorMutex,
    clock: FrameClock,
}

impl CollapsingTopBarState {
    /// A state created expanded reports `f32::MAX` as its height until first measured, so the
    /// first measurement pins it to the expanded height.
    pub fn new(is_expanded: bool, clock: FrameClock) -> Self {
        let initial_height = if is_expanded { f32::MAX } else { 0.0 };
        Self::with_height(initial_height, clock)
    }

    fn with_height(height: f32, clock: FrameClock) -> Self {
        Self {
            inner: Rc::new(TopBarStateInner {
                layout_info: MutableState::new(CollapsingTopBarLayoutInfo::unmeasured(height)),
                mutex: MutatorMutex::new(),
                clock,
            }),
        }
    }

    /// Rebuilds a state from the value returned by [`CollapsingTopBarState::save`].
    pub fn restore(saved_height: f32, clock: FrameClock) -> Self {
        Self::with_height(saved_height, clock)
    }

    pub fn save(&self) -> f32 {
        self.layout_info().height
    }

    pub fn layout_info(&self) -> CollapsingTopBarLayoutInfo {
        self.inner.layout_info.get()
    }

    pub fn is_collapsed(&self) -> bool {
        self.layout_info().is_collapsed()
    }

    pub fn is_expanded(&self) -> bool {
        self.layout_info().is_expanded()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.inner.clock
    }

    pub fn add_change_listener(&self, listener: impl Fn() + 'static) -> ListenerId {
        self.inner.layout_info.add_change_listener(listener)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.inner.layout_info.remove_change_listener(id)
    }

    /// Commits newly measured bounds and returns the resulting layout info.
    ///
    /// A fully expanded bar whose expanded height grew stays fully expanded; otherwise the
    /// previous height is clamped into the new bounds.
    pub fn apply_measure_result(
        &self,
        collapsed_height: i32,
        expanded_height: i32,
    ) -> CollapsingTopBarLayoutInfo {
        let last = self.layout_info();
        let height = if last.is_expanded() && expanded_height > last.expanded_height {
            expanded_height as f32
        } else {
            last.height
                .min(expanded_height as f32)
                .max(collapsed_height as f32)
        };

        let info = CollapsingTopBarLayoutInfo {
            height,
            collapsed_height,
            expanded_height,
        };
        if last.collapsed_height != collapsed_height || last.expanded_height != expanded_height {
            log::debug!("top bar bounds [{collapsed_height}, {expanded_height}], height {height}");
        }
        self.inner.layout_info.set(info);
        info
    }

    /// Animates the height towards `target_height` within a default-priority scroll scope.
    pub async fn animate_height_to(
        &self,
        current_height: f32,
        target_height: f32,
        spec: AnimationSpec,
    ) {
        let Some(mut scope) = self.begin_scroll(MutatePriority::Default) else {
            return;
        };
        controls::animate_height_to(
            &mut scope,
            &self.inner.clock,
            current_height,
            target_height,
            spec,
        )
        .await;
    }

    fn on_scroll(&self, delta: f32) -> f32 {
        let info = self.layout_info();
        let consumed = if delta < 0.0 {
            delta.max(-info.expand_height_delta())
        } else {
            delta.min(info.collapse_height_delta())
        };
        if consumed == 0.0 {
            return 0.0;
        }

        self.inner.layout_info.set(CollapsingTopBarLayoutInfo {
            height: info.height + consumed,
            ..info
        });
        log::trace!("top bar consumed {consumed} of {delta}");
        consumed
    }
}

impl ScrollableState for CollapsingTopBarState {
    fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        self.on_scroll(delta)
    }

    fn begin_scroll(&self, priority: MutatePriority) -> Option<ScrollScope<'_>> {
        self.inner
            .mutex
            .try_mutate(priority)
            .map(|guard| ScrollScope::new(self, guard))
    }

    fn is_scroll_in_progress(&self) -> bool {
        self.inner.mutex.is_locked()
    }
}

impl CollapsingTopBarControls for CollapsingTopBarState {
    fn expand(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        async move {
            let info = self.layout_info();
            self.animate_height_to(info.height, info.expanded_height as f32, spec)
                .await;
        }
        .boxed_local()
    }

    fn collapse(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        async move {
            let info = self.layout_info();
            self.animate_height_to(info.height, info.collapsed_height as f32, spec)
                .await;
        }
        .boxed_local()
    }
}

impl CollapsingTopBarSnapScope for CollapsingTopBarState {
    fn snap_with_progress(&self, _was_moving_up: bool) -> Option<SnapProgress<'_>> {
        Some(SnapProgress {
            controls: self,
            progress: self.layout_info().collapse_progress(),
        })
    }
}

impl std::fmt::Debug for CollapsingTopBarState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapsingTopBarState")
            .field("layout_info", &self.layout_info())
            .field("scrolling", &self.is_scroll_in_progress())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
