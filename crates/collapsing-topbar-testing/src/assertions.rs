//! Assertion helpers for pixel and progress values.

/// Tolerance used by most pixel comparisons.
pub const PIXEL_TOLERANCE: f32 = 0.01;

/// Assert that `actual` is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that `actual` lies in `[low, high]`.
#[track_caller]
pub fn assert_in_range(actual: f32, low: f32, high: f32, msg: &str) {
    assert!(
        actual >= low && actual <= high,
        "{}: {} not in [{}, {}]",
        msg,
        actual,
        low,
        high
    );
}
