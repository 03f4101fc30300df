//! Target animations: a start value, an end value and a curve between them.
//!
//! [`TargetAnimation`] is a plain stepper that maps frame timestamps to values. [`animate`]
//! wraps it in a future that awaits frames from a [`FrameClock`].

use collapsing_topbar_core::FrameClock;

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    #[default]
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    /// Custom cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Maps a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

#[derive(Clone, Copy)]
struct Cubic {
    a: f32,
    b: f32,
    c: f32,
}

impl Cubic {
    fn through(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn sample(self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let x = Cubic::through(x1, x2);
    let y = Cubic::through(y1, y2);

    // Newton first, bisection when the slope flattens out.
    let mut t = fraction;
    for _ in 0..8 {
        let error = x.sample(t) - fraction;
        if error.abs() < 1e-6 {
            return y.sample(t);
        }
        let slope = x.slope(t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    let (mut low, mut high) = (0.0f32, 1.0f32);
    t = fraction;
    for _ in 0..24 {
        let error = x.sample(t) - fraction;
        if error.abs() < 1e-6 {
            break;
        }
        if error > 0.0 {
            high = t;
        } else {
            low = t;
        }
        t = 0.5 * (low + high);
    }
    y.sample(t)
}

/// Duration based animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// Frames per second of velocity used to derive a velocity threshold from a position one.
const VELOCITY_THRESHOLD_MULTIPLIER: f32 = 1000.0 / 16.0;

/// Physics based animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, lower values overshoot.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Velocity (units per second) under which the spring may settle.
    pub velocity_threshold: f32,
    /// Distance from the target under which the spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

    /// Spring whose settle velocity is derived from `visibility_threshold`.
    pub fn new(damping_ratio: f32, stiffness: f32, visibility_threshold: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: visibility_threshold * VELOCITY_THRESHOLD_MULTIPLIER,
            position_threshold: visibility_threshold,
        }
    }

    fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM, 0.01)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationSpec {
    Tween(TweenSpec),
    Spring(SpringSpec),
}

impl Default for AnimationSpec {
    fn default() -> Self {
        AnimationSpec::Spring(SpringSpec::default())
    }
}

impl From<TweenSpec> for AnimationSpec {
    fn from(spec: TweenSpec) -> Self {
        AnimationSpec::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        AnimationSpec::Spring(spec)
    }
}

/// Spring integration step in seconds.
const SPRING_TIMESTEP: f32 = 0.016;

/// Steps an animation from `from` to `to` given successive frame timestamps.
///
/// The first frame anchors the start time and yields the initial value. The last value
/// produced is always exactly `to`.
#[derive(Debug, Clone)]
pub struct TargetAnimation {
    from: f32,
    to: f32,
    spec: AnimationSpec,
    value: f32,
    velocity: f32,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    finished: bool,
}

impl TargetAnimation {
    pub fn new(from: f32, to: f32, spec: AnimationSpec) -> Self {
        Self::with_velocity(from, to, 0.0, spec)
    }

    /// Starts the animation already moving at `initial_velocity` (springs only).
    pub fn with_velocity(from: f32, to: f32, initial_velocity: f32, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            spec,
            value: from,
            velocity: initial_velocity,
            start_time_nanos: None,
            last_frame_nanos: None,
            finished: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances to `frame_time_nanos` and returns the new value.
    pub fn advance(&mut self, frame_time_nanos: u64) -> f32 {
        if self.finished {
            return self.value;
        }
        if self.from == self.to && self.velocity == 0.0 {
            self.finish();
            return self.value;
        }

        match self.spec {
            AnimationSpec::Tween(spec) => self.advance_tween(spec, frame_time_nanos),
            AnimationSpec::Spring(spec) => self.advance_spring(spec, frame_time_nanos),
        }
        self.value
    }

    fn advance_tween(&mut self, spec: TweenSpec, frame_time_nanos: u64) {
        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed = frame_time_nanos.saturating_sub(start);
        let delay = spec.delay_millis.saturating_mul(1_000_000);
        if elapsed < delay {
            return;
        }

        let duration = spec.duration_millis.saturating_mul(1_000_000);
        let linear = if duration == 0 {
            1.0
        } else {
            ((elapsed - delay) as f64 / duration as f64).min(1.0) as f32
        };
        if linear >= 1.0 {
            self.finish();
            return;
        }
        let fraction = spec.easing.transform(linear);
        self.value = self.from + (self.to - self.from) * fraction;
    }

    fn advance_spring(&mut self, spec: SpringSpec, frame_time_nanos: u64) {
        let Some(last) = self.last_frame_nanos.replace(frame_time_nanos) else {
            return;
        };
        let dt = frame_time_nanos.saturating_sub(last) as f32 / 1_000_000_000.0;
        if dt <= 0.0 {
            return;
        }

        let damping = spec.damping();
        let mut simulated = 0.0f32;
        while simulated < dt {
            let step = SPRING_TIMESTEP.min(dt - simulated);
            let displacement = self.value - self.to;
            let force = -spec.stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.value += self.velocity * step;
            simulated += step;
        }

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (self.value - self.to).abs() < spec.position_threshold;
        if at_rest && near_target {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.value = self.to;
        self.velocity = 0.0;
        self.finished = true;
    }
}

/// How a call to [`animate`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The final value was delivered.
    Finished,
    /// The value callback asked to stop early.
    Cancelled,
}

/// Runs an animation from `from` to `to` on `clock`.
///
/// `on_value` receives every produced value, including the final one, and returns `false`
/// to stop the animation.
pub async fn animate(
    clock: &FrameClock,
    from: f32,
    to: f32,
    spec: AnimationSpec,
    mut on_value: impl FnMut(f32) -> bool,
) -> AnimationEnd {
    let mut animation = TargetAnimation::new(from, to, spec);
    loop {
        let frame_time = clock.next_frame().await;
        let value = animation.advance(frame_time);
        if !on_value(value) {
            log::debug!("animation {from} -> {to} cancelled at {value}");
            return AnimationEnd::Cancelled;
        }
        if animation.is_finished() {
            return AnimationEnd::Finished;
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
