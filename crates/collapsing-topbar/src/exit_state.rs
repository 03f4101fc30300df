use std::rc::Rc;

use collapsing_topbar_animation::AnimationSpec;
use collapsing_topbar_core::{
    FrameClock, ListenerId, MutatePriority, MutableState, MutatorMutex,
};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::controls::{self, CollapsingTopBarControls};
use crate::scroll::{ScrollScope, ScrollableState};
use crate::snap::{CollapsingTopBarSnapScope, SnapProgress};

/// Packed exit height of a state created exited and not yet measured. Reads as "fully
/// exited" whatever the collapsed height turns out to be.
pub const INITIALLY_EXITED_HEIGHT: f32 = f32::MAX;

/// Exit axis: how far a collapsed top bar has additionally moved off screen.
///
/// The range is `[0, collapsed_height]` of the connected [`CollapsingTopBarState`], mirrored
/// here through [`CollapsingTopBarExitState::update_layout_info`]. The axis is disabled while
/// that mirror is zero.
///
/// [`CollapsingTopBarState`]: crate::CollapsingTopBarState
#[derive(Clone)]
pub struct CollapsingTopBarExitState {
    inner: Rc<ExitStateInner>,
}

/// `exit_height` is the packed value clamped to `collapsed_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ExitHeights {
    packed_exit_height: f32,
    collapsed_height: f32,
}

struct ExitStateInner {
    heights: MutableState<ExitHeights>,
    mutex: MutatorMutex,
    clock: FrameClock,
}

impl CollapsingTopBarExitState {
    pub fn new(is_exited: bool, clock: FrameClock) -> Self {
        let initial = if is_exited {
            INITIALLY_EXITED_HEIGHT
        } else {
            0.0
        };
        Self::with_exit_height(initial, clock)
    }

    fn with_exit_height(exit_height: f32, clock: FrameClock) -> Self {
        Self {
            inner: Rc::new(ExitStateInner {
                heights: MutableState::new(ExitHeights {
                    packed_exit_height: exit_height,
                    collapsed_height: 0.0,
                }),
                mutex: MutatorMutex::new(),
                clock,
            }),
        }
    }

    /// Rebuilds a state from the value returned by [`CollapsingTopBarExitState::save`].
    pub fn restore(saved: f32, clock: FrameClock) -> Self {
        Self::with_exit_height(saved, clock)
    }

    /// Unmeasured states keep their raw value and fully exited ones save the sentinel, so a
    /// restored state stays fully exited even if the collapsed height changes.
    pub fn save(&self) -> f32 {
        let collapsed = self.collapsed_height();
        let exit = self.exit_height();
        if collapsed == 0.0 {
            self.inner.heights.get().packed_exit_height
        } else if exit == collapsed {
            INITIALLY_EXITED_HEIGHT
        } else {
            exit
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.collapsed_height() > 0.0
    }

    pub fn exit_height(&self) -> f32 {
        let heights = self.inner.heights.get();
        heights.packed_exit_height.min(heights.collapsed_height)
    }

    /// Collapsed height of the connected top bar.
    pub fn collapsed_height(&self) -> f32 {
        self.inner.heights.get().collapsed_height
    }

    /// `1` when fully entered, `0` when fully exited.
    pub fn exit_progress(&self) -> f32 {
        let exit = self.exit_height();
        let collapsed = self.collapsed_height();
        if exit == 0.0 {
            1.0
        } else if collapsed == 0.0 {
            0.0
        } else {
            1.0 - (exit / collapsed).clamp(0.0, 1.0)
        }
    }

    pub fn is_fully_exited(&self) -> bool {
        self.is_enabled() && self.exit_height() == self.collapsed_height()
    }

    pub fn is_fully_entered(&self) -> bool {
        self.exit_height() == 0.0
    }

    pub fn clock(&self) -> &FrameClock {
        &self.inner.clock
    }

    pub fn add_change_listener(&self, listener: impl Fn() + 'static) -> ListenerId {
        self.inner.heights.add_change_listener(listener)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.inner.heights.remove_change_listener(id)
    }

    /// Disables the axis and fully enters it.
    pub fn reset(&self) {
        self.inner.heights.set(ExitHeights {
            packed_exit_height: 0.0,
            collapsed_height: 0.0,
        });
    }

    /// Follows a new collapsed height of the connected top bar.
    pub fn update_layout_info(&self, collapsed_height: i32) {
        let collapsed_height = collapsed_height.max(0) as f32;
        let last_exit = self.exit_height();
        let last_collapsed = self.collapsed_height();

        let mut heights = self.inner.heights.get();
        let was_exited = last_collapsed > 0.0 && last_exit == last_collapsed;
        if was_exited || last_exit > collapsed_height {
            heights.packed_exit_height = collapsed_height;
        }
        if last_collapsed != collapsed_height {
            log::debug!("exit range is now [0, {collapsed_height}]");
        }
        heights.collapsed_height = collapsed_height;
        self.inner.heights.set(heights);
    }

    async fn animate_exit_to(&self, target_exit_height: f32, spec: AnimationSpec) {
        let Some(mut scope) = self.begin_scroll(MutatePriority::Default) else {
            return;
        };
        // Heights grow as the bar enters, so the animated value is the negated exit height.
        controls::animate_height_to(
            &mut scope,
            &self.inner.clock,
            -self.exit_height(),
            -target_exit_height,
            spec,
        )
        .await;
    }

    fn on_scroll(&self, delta: f32) -> f32 {
        let exit = self.exit_height();
        let consumed = if delta < 0.0 {
            delta.max(exit - self.collapsed_height())
        } else {
            delta.min(exit)
        };
        if consumed == 0.0 {
            return 0.0;
        }

        // Written from the clamped height so a sentinel packed value is replaced on the first
        // consumed delta.
        self.inner.heights.update(|heights| ExitHeights {
            packed_exit_height: exit - consumed,
            ..heights
        });
        log::trace!("exit consumed {consumed} of {delta}");
        consumed
    }
}

impl ScrollableState for CollapsingTopBarExitState {
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

impl CollapsingTopBarControls for CollapsingTopBarExitState {
    fn expand(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        self.animate_exit_to(0.0, spec).boxed_local()
    }

    fn collapse(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        async move {
            let target = self.collapsed_height();
            self.animate_exit_to(target, spec).await;
        }
        .boxed_local()
    }
}

impl CollapsingTopBarSnapScope for CollapsingTopBarExitState {
    fn snap_with_progress(&self, _was_moving_up: bool) -> Option<SnapProgress<'_>> {
        if !self.is_enabled() {
            return None;
        }
        Some(SnapProgress {
            controls: self,
            progress: 1.0 - self.exit_height() / self.collapsed_height(),
        })
    }
}

impl std::fmt::Debug for CollapsingTopBarExitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapsingTopBarExitState")
            .field("exit_height", &self.exit_height())
            .field("collapsed_height", &self.collapsed_height())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/exit_state_tests.rs"]
mod tests;
