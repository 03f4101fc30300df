//! Settling the top bar at an extreme after a fling.

use collapsing_topbar_animation::AnimationSpec;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use crate::controls::CollapsingTopBarControls;
use crate::defaults;

/// Controls to snap with, along with the progress the decision is based on.
pub struct SnapProgress<'a> {
    pub controls: &'a dyn CollapsingTopBarControls,
    /// `0` collapsed, `1` expanded.
    pub progress: f32,
}

/// Something that can be snapped.
pub trait CollapsingTopBarSnapScope {
    /// Picks the controls to snap and reports their progress, or `None` when there is
    /// nothing to snap.
    fn snap_with_progress(&self, was_moving_up: bool) -> Option<SnapProgress<'_>>;
}

pub trait CollapsingTopBarSnapBehavior {
    fn snap<'a>(
        &'a self,
        scope: &'a dyn CollapsingTopBarSnapScope,
        was_moving_up: bool,
    ) -> LocalBoxFuture<'a, ()>;
}

/// Leaves the top bar wherever the fling ended.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapBehavior;

impl CollapsingTopBarSnapBehavior for NoSnapBehavior {
    fn snap<'a>(
        &'a self,
        _scope: &'a dyn CollapsingTopBarSnapScope,
        _was_moving_up: bool,
    ) -> LocalBoxFuture<'a, ()> {
        future::ready(()).boxed_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTarget {
    Expand,
    Collapse,
}

/// Expands when progress is at or above `threshold`, collapses otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSnapBehavior {
    threshold: f32,
    spec: AnimationSpec,
}

impl ThresholdSnapBehavior {
    pub fn new(threshold: f32, spec: AnimationSpec) -> Self {
        Self { threshold, spec }
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self::new(threshold, defaults::animation_spec())
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn decide(&self, progress: f32) -> SnapTarget {
        if progress >= self.threshold {
            SnapTarget::Expand
        } else {
            SnapTarget::Collapse
        }
    }
}

impl Default for ThresholdSnapBehavior {
    fn default() -> Self {
        Self::with_threshold(defaults::DEFAULT_SNAP_THRESHOLD)
    }
}

impl CollapsingTopBarSnapBehavior for ThresholdSnapBehavior {
    fn snap<'a>(
        &'a self,
        scope: &'a dyn CollapsingTopBarSnapScope,
        was_moving_up: bool,
    ) -> LocalBoxFuture<'a, ()> {
        async move {
            let Some(snap) = scope.snap_with_progress(was_moving_up) else {
                return;
            };
            let target = self.decide(snap.progress);
            log::debug!(
                "snapping at progress {} (moving up: {was_moving_up}): {target:?}",
                snap.progress
            );
            match target {
                SnapTarget::Expand => snap.controls.expand(self.spec).await,
                SnapTarget::Collapse => snap.controls.collapse(self.spec).await,
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
#[path = "tests/snap_tests.rs"]
mod tests;
