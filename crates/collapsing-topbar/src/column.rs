//! Column whose children collapse one after another.
//!
//! The column sits inside a top bar and spreads the top bar's collapse over its children.
//! Children marked not collapsible stay fully visible and define the column's minimum height,
//! which the top bar picks up as its collapsed height through [`NestedCollapseState`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::layout::Placement;
use crate::nested_collapse::{NestedCollapseElement, NestedCollapseState};
use crate::progress::ProgressListener;
use crate::state::CollapsingTopBarState;

/// Order in which collapsible children give up their height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollapseDirection {
    /// Last child first.
    #[default]
    BottomUp,
    /// First child first.
    TopToBottom,
}

#[derive(Clone, Default)]
pub struct ColumnParentData {
    progress_listener: Option<Rc<dyn ProgressListener>>,
    not_collapsible: bool,
    clip_to_collapse: bool,
}

impl ColumnParentData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(mut self, listener: impl ProgressListener + 'static) -> Self {
        self.progress_listener = Some(Rc::new(listener));
        self
    }

    /// Keeps the child fully visible; it is pushed up once the children below it are gone.
    pub fn not_collapsible(mut self) -> Self {
        self.not_collapsible = true;
        self
    }

    /// Requests the collapsed part of the child to be clipped away.
    pub fn clip_to_collapse(mut self) -> Self {
        self.clip_to_collapse = true;
        self
    }

    pub fn is_not_collapsible(&self) -> bool {
        self.not_collapsible
    }
}

impl fmt::Debug for ColumnParentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnParentData")
            .field("progress_listener", &self.progress_listener.is_some())
            .field("not_collapsible", &self.not_collapsible)
            .field("clip_to_collapse", &self.clip_to_collapse)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColumnChild {
    pub width: i32,
    pub height: i32,
    pub parent_data: ColumnParentData,
}

impl ColumnChild {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            parent_data: ColumnParentData::default(),
        }
    }

    pub fn with_parent_data(mut self, parent_data: ColumnParentData) -> Self {
        self.parent_data = parent_data;
        self
    }
}

/// Input of [`place_column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnItem {
    pub height: i32,
    pub not_collapsible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnItemPlacement {
    /// Index of the child in column order.
    pub index: usize,
    pub placement: Placement,
    pub progress: f32,
    /// Collapsed part of the child's height. `None` for pinned children.
    pub clip_height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPlacementResult {
    pub total_progress: f32,
    /// Placements in drawing order.
    pub items: SmallVec<[ColumnItemPlacement; 8]>,
}

impl ColumnPlacementResult {
    pub fn item(&self, index: usize) -> Option<&ColumnItemPlacement> {
        self.items.iter().find(|item| item.index == index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMeasureResult {
    pub width: i32,
    pub height: i32,
    pub min_height: i32,
}

pub struct CollapsingTopBarColumn {
    state: CollapsingTopBarState,
    direction: CollapseDirection,
    nested_collapse: Rc<NestedCollapseState>,
    last_total_height: Cell<i32>,
}

impl CollapsingTopBarColumn {
    pub fn new(state: CollapsingTopBarState) -> Self {
        Self {
            state,
            direction: CollapseDirection::default(),
            nested_collapse: Rc::new(NestedCollapseState::new()),
            last_total_height: Cell::new(i32::MAX),
        }
    }

    pub fn with_direction(mut self, direction: CollapseDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn direction(&self) -> CollapseDirection {
        self.direction
    }

    /// Element to attach to the column's own top bar child.
    pub fn nested_collapse_element(&self) -> Rc<dyn NestedCollapseElement> {
        self.nested_collapse.clone()
    }

    pub fn measure(&self, children: &[ColumnChild]) -> ColumnMeasureResult {
        let width = children.iter().map(|child| child.width).max().unwrap_or(0);
        let height: i32 = children.iter().map(|child| child.height).sum();
        let min_height: i32 = children
            .iter()
            .filter(|child| child.parent_data.not_collapsible)
            .map(|child| child.height)
            .sum();

        self.last_total_height.set(height);
        self.nested_collapse.set_min_height(min_height);
        ColumnMeasureResult {
            width,
            height,
            min_height,
        }
    }

    /// Places children for the current top bar height and notifies their listeners.
    ///
    /// Clip heights are reported only for children that asked for clipping.
    pub fn place(&self, children: &[ColumnChild]) -> ColumnPlacementResult {
        // Heights beyond the column itself are irrelevant to it.
        let visible_height = self
            .state
            .layout_info()
            .height
            .min(self.last_total_height.get() as f32);
        let items: SmallVec<[ColumnItem; 8]> = children
            .iter()
            .map(|child| ColumnItem {
                height: child.height,
                not_collapsible: child.parent_data.not_collapsible,
            })
            .collect();

        let mut result = place_column(&items, visible_height, self.direction);
        for item in result.items.iter_mut() {
            let parent_data = &children[item.index].parent_data;
            if let Some(listener) = &parent_data.progress_listener {
                listener.on_progress_update(result.total_progress, item.progress);
            }
            if !parent_data.clip_to_collapse {
                item.clip_height = None;
            }
        }
        result
    }
}

/// Distributes `total - visible_height` of collapse over `items`.
///
/// The collapse offset may exceed the collapsible height when the whole top bar is exiting;
/// the excess moves pinned children up.
pub fn place_column(
    items: &[ColumnItem],
    visible_height: f32,
    direction: CollapseDirection,
) -> ColumnPlacementResult {
    let total: i32 = items.iter().map(|item| item.height).sum();
    let min_height: i32 = items
        .iter()
        .filter(|item| item.not_collapsible)
        .map(|item| item.height)
        .sum();
    let collapsible = total - min_height;

    let offset = (total as f32 - visible_height).max(0.0);
    let total_progress = if collapsible <= 0 {
        1.0
    } else {
        1.0 - (offset / collapsible as f32).min(1.0)
    };

    let items = match direction {
        CollapseDirection::BottomUp => place_bottom_up(items, total, offset as i32),
        CollapseDirection::TopToBottom => place_top_to_bottom(items, offset as i32),
    };
    ColumnPlacementResult {
        total_progress,
        items,
    }
}

fn absorbed_progress(height: i32, absorbed: i32) -> f32 {
    if height == 0 {
        1.0
    } else {
        1.0 - absorbed as f32 / height as f32
    }
}

fn place_bottom_up(
    items: &[ColumnItem],
    total: i32,
    offset: i32,
) -> SmallVec<[ColumnItemPlacement; 8]> {
    let mut placements = SmallVec::new();
    let mut unhandled = offset;
    let mut bottom = total;
    let mut frozen = false;

    for (index, item) in items.iter().enumerate().rev() {
        let natural_y = bottom - item.height;
        bottom = natural_y;

        if item.not_collapsible {
            // Everything below is gone: the pinned child rides up with the rest.
            if unhandled > 0 {
                placements.push(ColumnItemPlacement {
                    index,
                    placement: Placement::at(0, natural_y - unhandled).with_z_index(1.0),
                    progress: 1.0,
                    clip_height: None,
                });
                continue;
            }
            frozen = true;
        }

        if frozen {
            placements.push(ColumnItemPlacement {
                index,
                placement: Placement::at(0, natural_y),
                progress: 1.0,
                clip_height: (!item.not_collapsible).then_some(0),
            });
            continue;
        }

        let absorbed = item.height.min(unhandled);
        unhandled = (unhandled - absorbed).max(0);
        placements.push(ColumnItemPlacement {
            index,
            placement: Placement::at(0, natural_y - absorbed),
            progress: absorbed_progress(item.height, absorbed),
            clip_height: Some(absorbed),
        });
    }
    placements
}

fn place_top_to_bottom(items: &[ColumnItem], offset: i32) -> SmallVec<[ColumnItemPlacement; 8]> {
    let mut placements: SmallVec<[ColumnItemPlacement; 8]> = SmallVec::new();
    let mut remaining = offset;
    let mut shift = 0;
    let mut natural_y = 0;

    for (index, item) in items.iter().enumerate() {
        if item.not_collapsible {
            placements.push(ColumnItemPlacement {
                index,
                placement: Placement::at(0, natural_y - shift).with_z_index(1.0),
                progress: 1.0,
                clip_height: None,
            });
        } else {
            let absorbed = item.height.min(remaining);
            remaining -= absorbed;
            placements.push(ColumnItemPlacement {
                index,
                placement: Placement::at(0, natural_y - shift - absorbed),
                progress: absorbed_progress(item.height, absorbed),
                clip_height: Some(absorbed),
            });
            shift += absorbed;
        }
        natural_y += item.height;
    }

    // Offset past the collapsible height lifts the whole stack.
    if remaining > 0 {
        for item in &mut placements {
            item.placement.y -= remaining;
        }
    }

    // Later children are drawn first so earlier ones cover what slides beneath them.
    placements.reverse();
    placements
}

#[cfg(test)]
#[path = "tests/column_tests.rs"]
mod tests;
