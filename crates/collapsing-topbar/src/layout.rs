//! Integer pixel constraints and placements.

/// Size bounds imposed by a parent. `i32::MAX` stands for "unbounded".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Constraints {
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Constraints {
    pub const UNBOUNDED: i32 = i32::MAX;

    pub fn tight(width: i32, height: i32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: height,
            max_height: height,
        }
    }

    pub fn loose(max_width: i32, max_height: i32) -> Self {
        Self {
            min_width: 0,
            max_width,
            min_height: 0,
            max_height,
        }
    }

    pub fn unbounded() -> Self {
        Self::loose(Self::UNBOUNDED, Self::UNBOUNDED)
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height != Self::UNBOUNDED
    }

    pub fn constrain_width(&self, width: i32) -> i32 {
        width.clamp(self.min_width, self.max_width.max(self.min_width))
    }

    pub fn constrain_height(&self, height: i32) -> i32 {
        height.clamp(self.min_height, self.max_height.max(self.min_height))
    }

    /// Drops both minimums to zero.
    pub fn loosen(self) -> Self {
        Self {
            min_width: 0,
            min_height: 0,
            ..self
        }
    }

    pub fn copy_with_max_height(self, max_height: i32) -> Self {
        Self {
            max_height,
            min_height: self.min_height.min(max_height),
            ..self
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Where a child ends up relative to its parent's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub z_index: f32,
}

impl Placement {
    pub fn at(x: i32, y: i32) -> Self {
        Self { x, y, z_index: 0.0 }
    }

    pub fn with_z_index(mut self, z_index: f32) -> Self {
        self.z_index = z_index;
        self
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
