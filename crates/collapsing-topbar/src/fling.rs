use collapsing_topbar_animation::{DecayAnimation, SplineBasedDecaySpec};
use collapsing_topbar_core::FrameClock;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::defaults;
use crate::scroll::ScrollBy;

/// Turns a release velocity into a series of scroll deltas.
pub trait FlingBehavior {
    /// Flings within `scope` and returns the velocity that could not be consumed.
    fn perform_fling<'a>(
        &'a self,
        scope: &'a mut dyn ScrollBy,
        initial_velocity: f32,
    ) -> LocalBoxFuture<'a, f32>;
}

/// Spline decay fling, stopping as soon as the scope stops consuming.
#[derive(Debug, Clone)]
pub struct DecayFlingBehavior {
    clock: FrameClock,
    decay: SplineBasedDecaySpec,
}

impl DecayFlingBehavior {
    pub fn new(clock: FrameClock) -> Self {
        Self::with_decay(clock, defaults::fling_decay_spec())
    }

    pub fn with_decay(clock: FrameClock, decay: SplineBasedDecaySpec) -> Self {
        Self { clock, decay }
    }
}

impl FlingBehavior for DecayFlingBehavior {
    fn perform_fling<'a>(
        &'a self,
        scope: &'a mut dyn ScrollBy,
        initial_velocity: f32,
    ) -> LocalBoxFuture<'a, f32> {
        async move {
            if initial_velocity.abs() <= defaults::MIN_FLING_VELOCITY {
                return initial_velocity;
            }

            let mut animation = DecayAnimation::new(&self.decay, initial_velocity);
            let mut velocity_left = initial_velocity;
            loop {
                let frame_time = self.clock.next_frame().await;
                if !scope.is_active() {
                    log::debug!("fling interrupted with {velocity_left} left");
                    return velocity_left;
                }

                let frame = animation.advance(frame_time);
                let consumed = scope.scroll_by(frame.delta);
                velocity_left = frame.velocity;
                if (frame.delta - consumed).abs() > defaults::BOUNDARY_EPSILON {
                    log::debug!("fling hit a bound with {velocity_left} left");
                    return velocity_left;
                }
                if frame.finished {
                    return velocity_left;
                }
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
#[path = "tests/fling_tests.rs"]
mod tests;
