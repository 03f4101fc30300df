//! Animation drivers for the collapsing top bar.
//!
//! Animations produce a sequence of values, one per frame of a [`FrameClock`], and hand each
//! value to the caller which decides how to apply it (usually as a scroll delta).
//!
//! [`FrameClock`]: collapsing_topbar_core::FrameClock

mod animation;
mod decay_spec;

pub use animation::{
    animate, AnimationEnd, AnimationSpec, Easing, SpringSpec, TargetAnimation, TweenSpec,
};
pub use decay_spec::{
    DecayAnimation, DecayFrame, FlingCalculator, FlingInfo, FlingSpline, FloatDecayAnimationSpec,
    SplineBasedDecaySpec, SplineSample,
};
