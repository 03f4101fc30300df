//! Shared defaults for snapping, programmatic animations and flings.

use collapsing_topbar_animation::{
    AnimationSpec, FlingCalculator, SplineBasedDecaySpec, SpringSpec,
};

/// Collapse progress at or above which a snap expands the top bar.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 0.5;

/// Distance in pixels under which a height animation is considered settled.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Velocities at or below this (pixels per second) are not worth flinging.
pub const MIN_FLING_VELOCITY: f32 = 1.0;

/// A fling frame whose delta is consumed short by more than this has hit a bound.
pub const BOUNDARY_EPSILON: f32 = 0.5;

pub const DEFAULT_FLING_FRICTION: f32 = FlingCalculator::DEFAULT_FRICTION;

/// Screen density the default fling is tuned for.
pub const DEFAULT_DENSITY: f32 = 1.0;

/// Critically damped, medium-low stiffness spring used by expand, collapse and snap.
pub fn animation_spec() -> AnimationSpec {
    AnimationSpec::Spring(SpringSpec::new(
        SpringSpec::DAMPING_RATIO_NO_BOUNCY,
        SpringSpec::STIFFNESS_MEDIUM_LOW,
        VISIBILITY_THRESHOLD,
    ))
}

pub fn fling_decay_spec() -> SplineBasedDecaySpec {
    SplineBasedDecaySpec::with_calculator(FlingCalculator::new(
        DEFAULT_FLING_FRICTION,
        DEFAULT_DENSITY,
    ))
}
