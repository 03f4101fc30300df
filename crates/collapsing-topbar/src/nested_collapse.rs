use std::cell::Cell;

/// Child of a top bar that collapses internally and cannot shrink below `min_height`.
pub trait NestedCollapseElement {
    fn min_height(&self) -> i32;
}

/// Minimum height published by a [`CollapsingTopBarColumn`] on every measure.
///
/// [`CollapsingTopBarColumn`]: crate::CollapsingTopBarColumn
#[derive(Debug, Default)]
pub struct NestedCollapseState {
    min_height: Cell<i32>,
}

impl NestedCollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_min_height(&self, min_height: i32) {
        self.min_height.set(min_height);
    }
}

impl NestedCollapseElement for NestedCollapseState {
    fn min_height(&self) -> i32 {
        self.min_height.get()
    }
}
