//! Scaffold linking a collapsing top bar with the body scrolled beneath it.
//!
//! The scaffold owns the nested scroll coordinator for its scroll mode, keeps the exit axis
//! in sync with the top bar's measured collapsed height and lays out the header and bodies.

mod scroll_mode;
mod state;

use std::rc::Rc;

use collapsing_topbar_animation::AnimationSpec;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::controls::CollapsingTopBarControls;
use crate::fling::{DecayFlingBehavior, FlingBehavior};
use crate::layout::Constraints;
use crate::nested_scroll::{NestedScrollHandler, NestedScrollStrategy, ScrollCoordinator};
use crate::scroll::NestedScrollSource;
use crate::snap::{CollapsingTopBarSnapBehavior, NoSnapBehavior};
use crate::top_bar::{CollapsingTopBar, TopBarChild, TopBarMeasureResult};

pub use scroll_mode::CollapsingTopBarScaffoldScrollMode;
pub use state::{CollapsingTopBarScaffoldState, SavedScaffoldState};

/// Size of a measured body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodySize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldLayout {
    pub width: i32,
    pub height: i32,
    /// Vertical position of the top bar; negative while exiting.
    pub top_bar_y: i32,
    /// Vertical position shared by every body.
    pub body_y: i32,
}

pub struct CollapsingTopBarScaffold {
    state: CollapsingTopBarScaffoldState,
    scroll_mode: CollapsingTopBarScaffoldScrollMode,
    enabled: bool,
    fling_behavior: Rc<dyn FlingBehavior>,
    snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
    top_bar: CollapsingTopBar,
    coordinator: ScrollCoordinator,
}

impl CollapsingTopBarScaffold {
    pub fn new(
        state: CollapsingTopBarScaffoldState,
        scroll_mode: CollapsingTopBarScaffoldScrollMode,
    ) -> Self {
        let fling_behavior: Rc<dyn FlingBehavior> =
            Rc::new(DecayFlingBehavior::new(state.clock().clone()));
        let snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior> = Rc::new(NoSnapBehavior);
        let coordinator =
            scroll_mode.create_coordinator(&state, fling_behavior.clone(), snap_behavior.clone());
        if !scroll_mode.can_exit() {
            state.exit_state().reset();
        }

        Self {
            top_bar: CollapsingTopBar::new(state.top_bar_state().clone()),
            state,
            scroll_mode,
            enabled: true,
            fling_behavior,
            snap_behavior,
            coordinator,
        }
    }

    pub fn with_snap_behavior(
        mut self,
        snap_behavior: impl CollapsingTopBarSnapBehavior + 'static,
    ) -> Self {
        self.snap_behavior = Rc::new(snap_behavior);
        self.rebuild_coordinator();
        self
    }

    pub fn with_fling_behavior(mut self, fling_behavior: impl FlingBehavior + 'static) -> Self {
        self.fling_behavior = Rc::new(fling_behavior);
        self.rebuild_coordinator();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn top_bar_clip_to_bounds(mut self, clip: bool) -> Self {
        self.top_bar =
            CollapsingTopBar::new(self.state.top_bar_state().clone()).clip_to_bounds(clip);
        self
    }

    pub fn state(&self) -> &CollapsingTopBarScaffoldState {
        &self.state
    }

    pub fn scroll_mode(&self) -> CollapsingTopBarScaffoldScrollMode {
        self.scroll_mode
    }

    pub fn top_bar(&self) -> &CollapsingTopBar {
        &self.top_bar
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switches scroll mode. Leaving exit-capable modes resets the exit axis.
    pub fn set_scroll_mode(&mut self, scroll_mode: CollapsingTopBarScaffoldScrollMode) {
        if self.scroll_mode == scroll_mode {
            return;
        }
        log::debug!("scroll mode {:?} -> {scroll_mode:?}", self.scroll_mode);
        self.scroll_mode = scroll_mode;
        if !scroll_mode.can_exit() {
            self.state.exit_state().reset();
        }
        self.rebuild_coordinator();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn rebuild_coordinator(&mut self) {
        self.coordinator = self.scroll_mode.create_coordinator(
            &self.state,
            self.fling_behavior.clone(),
            self.snap_behavior.clone(),
        );
    }

    /// Collapsed height the header keeps in the layout; `0` when it can exit.
    fn top_bar_min_height(&self) -> i32 {
        if self.scroll_mode.can_exit() {
            0
        } else {
            self.state.top_bar_state().layout_info().collapsed_height
        }
    }

    /// Measures the header from its measured children and forwards the result to the exit
    /// axis when the mode can exit.
    pub fn measure_top_bar(
        &self,
        children: &[TopBarChild],
        constraints: Constraints,
    ) -> TopBarMeasureResult {
        let result = self.top_bar.measure(children, constraints.loosen());
        if self.scroll_mode.can_exit() {
            self.state
                .exit_state()
                .update_layout_info(result.layout_info.collapsed_height);
        }
        result
    }

    /// Constraints to measure every body with.
    pub fn body_constraints(&self, constraints: Constraints) -> Constraints {
        let max_height = if constraints.has_bounded_height() {
            (constraints.max_height - self.top_bar_min_height()).max(0)
        } else {
            constraints.max_height
        };
        constraints.loosen().copy_with_max_height(max_height)
    }

    pub fn layout(
        &self,
        constraints: Constraints,
        top_bar: &TopBarMeasureResult,
        bodies: &[BodySize],
    ) -> ScaffoldLayout {
        let body_width = bodies.iter().map(|body| body.width).max().unwrap_or(0);
        let body_height = bodies.iter().map(|body| body.height).max().unwrap_or(0);
        let width = constraints.constrain_width(top_bar.width.max(body_width));
        let height = constraints
            .constrain_height(self.top_bar_min_height().saturating_add(body_height));

        let top_bar_height = self.state.top_bar_state().layout_info().height as i32;
        let exit_height = self.state.exit_state().exit_height() as i32;
        ScaffoldLayout {
            width,
            height,
            top_bar_y: -exit_height,
            body_y: top_bar_height - exit_height,
        }
    }

    pub fn expand(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        self.state.expand(spec)
    }

    pub fn collapse(&self, spec: AnimationSpec) -> LocalBoxFuture<'_, ()> {
        self.state.collapse(spec)
    }
}

/// Nested scroll entry points. A disabled scaffold consumes nothing.
impl NestedScrollHandler for CollapsingTopBarScaffold {
    fn on_pre_scroll(&self, available: f32, source: NestedScrollSource) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.coordinator.on_pre_scroll(available, source)
    }

    fn on_post_scroll(&self, consumed: f32, available: f32, source: NestedScrollSource) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        self.coordinator.on_post_scroll(consumed, available, source)
    }

    fn on_pre_fling(&self, available: f32) -> LocalBoxFuture<'_, f32> {
        if !self.enabled {
            return future::ready(0.0).boxed_local();
        }
        self.coordinator.on_pre_fling(available)
    }

    fn on_post_fling(&self, consumed: f32, available: f32) -> LocalBoxFuture<'_, f32> {
        if !self.enabled {
            return future::ready(0.0).boxed_local();
        }
        self.coordinator.on_post_fling(consumed, available)
    }
}

#[cfg(test)]
#[path = "../tests/scaffold_tests.rs"]
mod tests;
