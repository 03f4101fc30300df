//! Scrollable state contract and scroll scopes.
//!
//! A [`ScrollableState`] consumes deltas synchronously through
//! [`ScrollableState::dispatch_raw_delta`]. Anything that drives a state over several frames
//! (animations, flings, snapping) first acquires a [`ScrollScope`], which holds the state's
//! mutator lock at some [`MutatePriority`]. A competing request of equal or higher priority
//! preempts the scope: its later deltas are refused and whatever it already applied stays.

use collapsing_topbar_core::{MutatePriority, MutatorGuard};
use smallvec::SmallVec;

use crate::fling::FlingBehavior;

/// Target of incremental scroll deltas.
pub trait ScrollBy {
    /// Applies `pixels` and returns the part actually consumed.
    fn scroll_by(&mut self, pixels: f32) -> f32;

    /// `false` once the underlying lock was taken by someone else.
    fn is_active(&self) -> bool;
}

/// State that consumes scroll deltas.
pub trait ScrollableState {
    /// Consumes as much of `delta` as the state allows and returns the consumed amount.
    ///
    /// Does not take the scroll lock.
    fn dispatch_raw_delta(&self, delta: f32) -> f32;

    /// Acquires exclusive scrolling at `priority`, or `None` when a higher-priority scope is
    /// active.
    fn begin_scroll(&self, priority: MutatePriority) -> Option<ScrollScope<'_>>;

    fn is_scroll_in_progress(&self) -> bool;
}

/// Exclusive scrolling access to one state.
pub struct ScrollScope<'a> {
    state: &'a dyn ScrollableState,
    guard: MutatorGuard,
}

impl<'a> ScrollScope<'a> {
    pub fn new(state: &'a dyn ScrollableState, guard: MutatorGuard) -> Self {
        Self { state, guard }
    }

    pub fn priority(&self) -> MutatePriority {
        self.guard.priority()
    }
}

impl ScrollBy for ScrollScope<'_> {
    fn scroll_by(&mut self, pixels: f32) -> f32 {
        if !self.guard.is_active() {
            return 0.0;
        }
        self.state.dispatch_raw_delta(pixels)
    }

    fn is_active(&self) -> bool {
        self.guard.is_active()
    }
}

/// Several scopes acting as one: each delta is offered to the scopes in order and whatever a
/// scope leaves unconsumed goes to the next one.
pub struct MergedScrollScope<'a> {
    scopes: SmallVec<[ScrollScope<'a>; 2]>,
}

impl<'a> MergedScrollScope<'a> {
    pub fn new(scopes: impl IntoIterator<Item = ScrollScope<'a>>) -> Self {
        Self {
            scopes: scopes.into_iter().collect(),
        }
    }
}

impl ScrollBy for MergedScrollScope<'_> {
    fn scroll_by(&mut self, pixels: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        let left = self
            .scopes
            .iter_mut()
            .fold(pixels, |left, scope| left - scope.scroll_by(left));
        pixels - left
    }

    fn is_active(&self) -> bool {
        self.scopes.iter().all(|scope| scope.is_active())
    }
}

/// Origin of a nested scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedScrollSource {
    /// Direct drag.
    UserInput,
    /// Produced by a running fling or animation of the scrolled content.
    SideEffect,
}

impl NestedScrollSource {
    pub fn priority(self) -> MutatePriority {
        match self {
            NestedScrollSource::UserInput => MutatePriority::UserInput,
            NestedScrollSource::SideEffect => MutatePriority::Default,
        }
    }
}

/// Applies `delta` inside a scope held only for this call.
///
/// Taking the scope preempts animations running at a lower or equal priority.
pub fn dispatch_scoped_delta(
    state: &dyn ScrollableState,
    delta: f32,
    priority: MutatePriority,
) -> f32 {
    match state.begin_scroll(priority) {
        Some(mut scope) => scope.scroll_by(delta),
        None => {
            log::debug!("delta {delta} refused at {priority:?}");
            0.0
        }
    }
}

/// Flings `state` with `velocity` and returns the velocity left over.
pub async fn fling(
    state: &dyn ScrollableState,
    behavior: &dyn FlingBehavior,
    velocity: f32,
) -> f32 {
    let Some(mut scope) = state.begin_scroll(MutatePriority::Default) else {
        log::debug!("fling of {velocity} refused, state is busy");
        return velocity;
    };
    behavior.perform_fling(&mut scope, velocity).await
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
