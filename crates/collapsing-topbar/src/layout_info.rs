/// Measured bounds and current height of a collapsing top bar.
///
/// `collapsed_height <= height <= expanded_height` holds after every mutation made through
/// [`CollapsingTopBarState`](crate::CollapsingTopBarState).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapsingTopBarLayoutInfo {
    pub height: f32,
    pub collapsed_height: i32,
    pub expanded_height: i32,
}

impl CollapsingTopBarLayoutInfo {
    /// Bounds used before the first measurement.
    pub(crate) fn unmeasured(height: f32) -> Self {
        Self {
            height,
            collapsed_height: 0,
            expanded_height: i32::MAX,
        }
    }

    /// `0` when fully collapsed, `1` when fully expanded.
    pub fn collapse_progress(&self) -> f32 {
        if self.collapsed_height == self.expanded_height {
            return 1.0;
        }
        (self.expand_height_delta() / self.collapsible_distance() as f32).clamp(0.0, 1.0)
    }

    /// Distance left to grow until fully expanded.
    pub fn collapse_height_delta(&self) -> f32 {
        self.expanded_height as f32 - self.height
    }

    /// Distance left to shrink until fully collapsed.
    pub fn expand_height_delta(&self) -> f32 {
        self.height - self.collapsed_height as f32
    }

    pub fn collapsible_distance(&self) -> i32 {
        self.expanded_height.saturating_sub(self.collapsed_height)
    }

    pub fn is_collapsed(&self) -> bool {
        self.height == self.collapsed_height as f32
    }

    pub fn is_expanded(&self) -> bool {
        self.height == self.expanded_height as f32
    }
}
