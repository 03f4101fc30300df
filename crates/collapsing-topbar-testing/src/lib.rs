//! Testing utilities for the collapsing top bar crates.

pub mod assertions;
pub mod frame_driver;

pub use assertions::{assert_approx_eq, assert_in_range, PIXEL_TOLERANCE};
pub use frame_driver::{FrameDriver, FRAME_NANOS};
