//! Measurement and placement of the top bar's direct children.
//!
//! Children are stacked on top of each other. The top bar's expanded height is that of its
//! tallest child and its collapsed height that of its shortest one, unless a child collapses
//! internally and publishes its own minimum through a [`NestedCollapseElement`].

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::exit_state::CollapsingTopBarExitState;
use crate::layout::{Constraints, Placement};
use crate::layout_info::CollapsingTopBarLayoutInfo;
use crate::nested_collapse::NestedCollapseElement;
use crate::progress::ProgressListener;
use crate::state::CollapsingTopBarState;

/// Per-child annotations. Builder calls can be chained; for repeated calls the last one wins.
#[derive(Clone, Default)]
pub struct TopBarParentData {
    progress_listener: Option<Rc<dyn ProgressListener>>,
    parallax_ratio: Option<f32>,
    nested_collapse: Option<Rc<dyn NestedCollapseElement>>,
    is_floating: bool,
}

impl TopBarParentData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(mut self, listener: impl ProgressListener + 'static) -> Self {
        self.progress_listener = Some(Rc::new(listener));
        self
    }

    /// Moves the child up by `ratio` of the collapsed distance while collapsing.
    pub fn parallax(mut self, ratio: f32) -> Self {
        self.parallax_ratio = Some(ratio);
        self
    }

    pub fn nested_collapse(mut self, element: Rc<dyn NestedCollapseElement>) -> Self {
        self.nested_collapse = Some(element);
        self
    }

    /// Excludes the child from the collapsed height computation.
    pub fn floating(mut self) -> Self {
        self.is_floating = true;
        self
    }

    pub fn parallax_ratio(&self) -> Option<f32> {
        self.parallax_ratio
    }

    pub fn is_floating(&self) -> bool {
        self.is_floating
    }
}

impl fmt::Debug for TopBarParentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopBarParentData")
            .field("progress_listener", &self.progress_listener.is_some())
            .field("parallax_ratio", &self.parallax_ratio)
            .field("nested_collapse", &self.nested_collapse.is_some())
            .field("is_floating", &self.is_floating)
            .finish()
    }
}

/// A measured child of the top bar.
#[derive(Debug, Clone, Default)]
pub struct TopBarChild {
    pub width: i32,
    pub height: i32,
    pub parent_data: TopBarParentData,
}

impl TopBarChild {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            parent_data: TopBarParentData::default(),
        }
    }

    pub fn with_parent_data(mut self, parent_data: TopBarParentData) -> Self {
        self.parent_data = parent_data;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopBarMeasureResult {
    pub width: i32,
    /// Always the expanded height; the visible part is clipped to the current height.
    pub height: i32,
    pub layout_info: CollapsingTopBarLayoutInfo,
}

/// Called after every measure pass with the committed layout info.
pub type DependentStateUpdate = Rc<dyn Fn(&CollapsingTopBarLayoutInfo)>;

pub struct CollapsingTopBar {
    state: CollapsingTopBarState,
    clip_to_bounds: bool,
    dependents: SmallVec<[DependentStateUpdate; 2]>,
}

impl CollapsingTopBar {
    pub fn new(state: CollapsingTopBarState) -> Self {
        Self {
            state,
            clip_to_bounds: true,
            dependents: SmallVec::new(),
        }
    }

    pub fn clip_to_bounds(mut self, clip: bool) -> Self {
        self.clip_to_bounds = clip;
        self
    }

    /// Keeps a state derived from the top bar's measurement in sync. `update` runs after each
    /// measure, in registration order.
    pub fn dependent_state(
        mut self,
        update: impl Fn(&CollapsingTopBarLayoutInfo) + 'static,
    ) -> Self {
        self.dependents.push(Rc::new(update));
        self
    }

    /// Feeds the collapsed height of every measure pass into `exit_state`.
    pub fn exit_state_connection(self, exit_state: CollapsingTopBarExitState) -> Self {
        self.dependent_state(move |info| exit_state.update_layout_info(info.collapsed_height))
    }

    pub fn state(&self) -> &CollapsingTopBarState {
        &self.state
    }

    /// Derives collapsed and expanded heights from `children` and commits them to the state.
    pub fn measure(
        &self,
        children: &[TopBarChild],
        constraints: Constraints,
    ) -> TopBarMeasureResult {
        let result = self.measure_children(children, constraints);
        for update in &self.dependents {
            update(&result.layout_info);
        }
        result
    }

    fn measure_children(
        &self,
        children: &[TopBarChild],
        constraints: Constraints,
    ) -> TopBarMeasureResult {
        if children.is_empty() {
            return TopBarMeasureResult {
                width: 0,
                height: 0,
                layout_info: self.state.layout_info(),
            };
        }

        let nested_min = children
            .iter()
            .filter_map(|child| child.parent_data.nested_collapse.as_ref())
            .map(|element| element.min_height())
            .min();
        let collapsed = match nested_min {
            Some(min_height) if min_height > 0 => min_height,
            _ => children
                .iter()
                .filter(|child| !child.parent_data.is_floating)
                .map(|child| child.height)
                .min()
                .unwrap_or(0),
        };
        let expanded = children.iter().map(|child| child.height).max().unwrap_or(0);

        let layout_info = self.state.apply_measure_result(
            constraints.constrain_height(collapsed),
            constraints.constrain_height(expanded),
        );
        let width = children.iter().map(|child| child.width).max().unwrap_or(0);

        TopBarMeasureResult {
            width: constraints.constrain_width(width),
            height: layout_info.expanded_height,
            layout_info,
        }
    }

    /// Places every child and notifies progress listeners.
    pub fn place(&self, children: &[TopBarChild]) -> SmallVec<[Placement; 4]> {
        let info = self.state.layout_info();
        let progress = info.collapse_progress();
        let collapsible_distance = info.collapsible_distance() as f32;

        children
            .iter()
            .map(|child| {
                let item_progress = item_progress(&info, child.height);
                if let Some(listener) = &child.parent_data.progress_listener {
                    listener.on_progress_update(progress, item_progress);
                }
                let y = match child.parent_data.parallax_ratio {
                    Some(ratio) => {
                        -(collapsible_distance * (1.0 - progress) * ratio).round() as i32
                    }
                    None => 0,
                };
                Placement::at(0, y)
            })
            .collect()
    }

    /// Height to clip drawing at, if clipping is enabled.
    pub fn clip_height(&self) -> Option<f32> {
        self.clip_to_bounds.then(|| self.state.layout_info().height)
    }
}

/// Progress of a single child: how much of its own collapsible part is still visible.
fn item_progress(info: &CollapsingTopBarLayoutInfo, child_height: i32) -> f32 {
    let distance = child_height - info.collapsed_height;
    if distance <= 0 {
        return 1.0;
    }
    let visible = info.height.min(child_height as f32) - info.collapsed_height as f32;
    visible / distance as f32
}

#[cfg(test)]
#[path = "tests/top_bar_tests.rs"]
mod tests;
