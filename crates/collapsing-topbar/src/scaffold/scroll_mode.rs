use std::rc::Rc;

use smallvec::SmallVec;

use super::state::CollapsingTopBarScaffoldState;
use crate::fling::FlingBehavior;
use crate::nested_scroll::{
    CollapseHandler, ExpandHandler, ExpandMode, HandlerList, NestedScrollStrategy, SnapHandler,
};
use crate::snap::{CollapsingTopBarSnapBehavior, CollapsingTopBarSnapScope, SnapProgress};

/// How nested scrolling moves the scaffold's top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsingTopBarScaffoldScrollMode {
    /// The top bar collapses to its collapsed height and stays there.
    Collapse { expand_always: bool },
    /// The top bar collapses, then exits entirely. It enters back under the same policy it
    /// expands with.
    CollapseAndExit { expand_always: bool },
    /// The top bar collapses and exits; scrolling down always brings back the collapsed bar,
    /// expanding only once the content reaches its top.
    EnterAlwaysCollapsed,
}

impl CollapsingTopBarScaffoldScrollMode {
    pub fn collapse(expand_always: bool) -> Self {
        Self::Collapse { expand_always }
    }

    pub fn collapse_and_exit(expand_always: bool) -> Self {
        Self::CollapseAndExit { expand_always }
    }

    pub fn enter_always_collapsed() -> Self {
        Self::EnterAlwaysCollapsed
    }

    pub fn can_exit(&self) -> bool {
        self.exit_enter_always().is_some()
    }

    /// Whether the collapse axis expands before the content scrolls.
    pub fn expand_always(&self) -> bool {
        match *self {
            Self::Collapse { expand_always } | Self::CollapseAndExit { expand_always } => {
                expand_always
            }
            Self::EnterAlwaysCollapsed => false,
        }
    }

    /// Whether the exit axis enters before the content scrolls, or `None` without exit.
    pub fn exit_enter_always(&self) -> Option<bool> {
        match *self {
            Self::Collapse { .. } => None,
            Self::CollapseAndExit { expand_always } => Some(expand_always),
            Self::EnterAlwaysCollapsed => Some(true),
        }
    }
}

impl NestedScrollStrategy<CollapsingTopBarScaffoldState> for CollapsingTopBarScaffoldScrollMode {
    fn create_handlers(
        &self,
        state: &CollapsingTopBarScaffoldState,
        fling_behavior: Rc<dyn FlingBehavior>,
        snap_behavior: Rc<dyn CollapsingTopBarSnapBehavior>,
    ) -> HandlerList {
        let mut handlers: HandlerList = SmallVec::new();
        handlers.push(Box::new(CollapseHandler::new(
            state.top_bar_state().clone(),
            fling_behavior.clone(),
        )));
        if let Some(enter_always) = self.exit_enter_always() {
            handlers.push(Box::new(CollapseHandler::new(
                state.exit_state().clone(),
                fling_behavior.clone(),
            )));
            handlers.push(Box::new(ExpandHandler::new(
                state.exit_state().clone(),
                fling_behavior.clone(),
                ExpandMode::from_expand_always(enter_always),
            )));
        }
        handlers.push(Box::new(ExpandHandler::new(
            state.top_bar_state().clone(),
            fling_behavior,
            ExpandMode::from_expand_always(self.expand_always()),
        )));
        handlers.push(Box::new(SnapHandler::new(
            snap_behavior,
            Box::new(ScaffoldSnapScope::new(*self, state.clone())),
        )));
        handlers
    }
}

/// Routes a snap to the part of the scaffold the scroll mode moves.
pub(crate) struct ScaffoldSnapScope {
    mode: CollapsingTopBarScaffoldScrollMode,
    state: CollapsingTopBarScaffoldState,
}

impl ScaffoldSnapScope {
    pub(crate) fn new(
        mode: CollapsingTopBarScaffoldScrollMode,
        state: CollapsingTopBarScaffoldState,
    ) -> Self {
        Self { mode, state }
    }

    fn resolve(&self, was_moving_up: bool) -> &dyn CollapsingTopBarSnapScope {
        let Some(enter_always) = self.mode.exit_enter_always() else {
            return self.state.top_bar_state();
        };
        if enter_always == self.mode.expand_always() {
            return &self.state;
        }
        if was_moving_up {
            &self.state
        } else if self.state.top_bar_state().is_collapsed() {
            self.state.exit_state()
        } else {
            self.state.top_bar_state()
        }
    }
}

impl CollapsingTopBarSnapScope for ScaffoldSnapScope {
    fn snap_with_progress(&self, was_moving_up: bool) -> Option<SnapProgress<'_>> {
        self.resolve(was_moving_up).snap_with_progress(was_moving_up)
    }
}

#[cfg(test)]
#[path = "../tests/scroll_mode_tests.rs"]
mod tests;
