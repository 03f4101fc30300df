use collapsing_topbar_animation::AnimationSpec;
use collapsing_topbar_core::{FrameClock, MutatePriority};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::controls::{self, CollapsingTopBarControls};
use crate::exit_state::CollapsingTopBarExitState;
use crate::scroll::{MergedScrollScope, ScrollableState};
use crate::snap::{CollapsingTopBarSnapScope, SnapProgress};
use crate::state::CollapsingTopBarState;

/// Saved form of a [`CollapsingTopBarScaffoldState`]: one scalar per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedScaffoldState {
    pub top_bar_height: f32,
    pub exit_height: f32,
}

/// Collapse and exit axes driven as one.
///
/// The visible top bar height is the collapse axis height minus the exit height. Expanding and
/// collapsing move both axes in the order a scroll would: collapsing shrinks the top bar before
/// it exits, expanding enters it before it grows.
#[derive(Clone)]
pub struct CollapsingTopBarScaffoldState {
    top_bar_state: CollapsingTopBarState,
    exit_state: CollapsingTopBarExitState,
    clock: FrameClock,
}

impl CollapsingTopBarScaffoldState {
    pub fn new(is_expanded: bool, clock: FrameClock) -> Self {
        Self::from_parts(
            CollapsingTopBarState::new(is_expanded, clock.clone()),
            CollapsingTopBarExitState::new(!is_expanded, clock.clone()),
            clock,
        )
    }

    pub fn from_parts(
        top_bar_state: CollapsingTopBarState,
        exit_state: CollapsingTopBarExitState,
        clock: FrameClock,
    ) -> Self {
        Self {
            top_bar_state,
            exit_state,
            clock,
        }
    }

    pub fn restore(saved: SavedScaffoldState, clock: FrameClock) -> Self {
        Self::from_parts(
            CollapsingTopBarState::restore(saved.top_bar_height, clock.clone()),
            CollapsingTopBarExitState::restore(saved.exit_height, clock.clone()),
            clock,
        )
    }

    pub fn save(&self) -> SavedScaffoldState {
        SavedScaffoldState {
            top_bar_height: self.top_bar_state.save(),
            exit_height: self.exit_state.save(),
        }
    }

    pub fn top_bar_state(&self) -> &CollapsingTopBarState {
        &self.top_bar_state
    }

    pub fn exit_state(&self) -> &CollapsingTopBarExitState {
        &self.exit_state
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn total_top_bar_height(&self) -> f32 {
        self.top_bar_state.layout_info().height - self.exit_state.exit_height()
    }

    pub fn is_expanded(&self) -> bool {
        self.top_bar_state.is_expanded() && self.exit_state.is_fully_entered()
    }

    pub fn is_collapsed(&self) -> bool {
        self.top_bar_state.is_collapsed()
            && (!self.exit_state.is_enabled() || self.exit_state.is_fully_exited())
    }

    async fn animate_total_height_to(
        &self,
        spec: AnimationSpec,
        target_height: impl FnOnce(bool) -> f32,
    ) {
        let can_exit = self.exit_state.is_enabled();
        let target = target_height(can_exit);

        if !can_exit {
            let current = self.total_top_bar_height();
            self.top_bar_state
                .animate_height_to(current, target, spec)
                .await;
            return;
        }

        let Some(top_bar_scope) = self.top_bar_state.begin_scroll(MutatePriority::Default) else {
            return;
        };
        let Some(exit_scope) = self.exit_state.begin_scroll(MutatePriority::Default) else {
            return;
        };

        let current = self.total_top_bar_height();
        let is_collapsing = target < current;
        let mut merged = if is_collapsing {
            MergedScrollScope::new([top_bar_scope, exit_scope])
        } else {
            MergedScrollScope::new([exit_scope, top_bar_scope])
        };
        log::debug!("animating top bar {current} -> {target}");
        controls::animate_height_to(&mut merged, &self.clock, current, target, spec).await;
    }
}

impl CollapsingTopBarControls for CollapsingTopBarScaffoldState {
    fn expand(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        async move {
            let expanded = self.top_bar_state.layout_info().expanded_height as f32;
            self.animate_total_height_to(spec, |_| expanded).await;
        }
        .boxed_local()
    }

    fn collapse(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        async move {
            let collapsed = self.top_bar_state.layout_info().collapsed_height as f32;
            self.animate_total_height_to(spec, |can_exit| if can_exit { 0.0 } else { collapsed })
                .await;
        }
        .boxed_local()
    }
}

impl CollapsingTopBarSnapScope for CollapsingTopBarScaffoldState {
    fn snap_with_progress(&self, _was_moving_up: bool) -> Option<SnapProgress<'_>> {
        let expanded = self.top_bar_state.layout_info().expanded_height;
        let progress = if expanded <= 0 {
            1.0
        } else {
            self.total_top_bar_height() / expanded as f32
        };
        Some(SnapProgress {
            controls: self,
            progress,
        })
    }
}

impl std::fmt::Debug for CollapsingTopBarScaffoldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollapsingTopBarScaffoldState")
            .field("top_bar_state", &self.top_bar_state)
            .field("exit_state", &self.exit_state)
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/scaffold_state_tests.rs"]
mod tests;
