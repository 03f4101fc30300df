//! Fling decay modelled on the Android scroller spline.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SAMPLES: usize = 100;
const MAX_BISECTIONS: usize = 64;

struct SplineTable {
    positions: [f32; SAMPLES + 1],
}

/// Solves `curve(u) = alpha` on `[low, 1]` by bisection. Returns `u` and `3u(1 - u)`.
fn solve(alpha: f32, low: f32, curve: impl Fn(f32, f32) -> f32) -> (f32, f32) {
    let (mut low, mut high) = (low, 1.0f32);
    let mut mid = low;
    let mut coef = 0.0;
    for _ in 0..MAX_BISECTIONS {
        mid = low + (high - low) / 2.0;
        coef = 3.0 * mid * (1.0 - mid);
        let value = curve(mid, coef);
        if (value - alpha).abs() < 1e-5 {
            break;
        }
        if value > alpha {
            high = mid;
        } else {
            low = mid;
        }
    }
    (mid, coef)
}

static SPLINE: LazyLock<SplineTable> = LazyLock::new(|| {
    let mut positions = [0.0f32; SAMPLES + 1];
    let mut x_low = 0.0f32;

    for (i, position) in positions.iter_mut().enumerate().take(SAMPLES) {
        let alpha = i as f32 / SAMPLES as f32;
        let (x, coef) = solve(alpha, x_low, |x, c| {
            c * ((1.0 - x) * P1 + x * P2) + x * x * x
        });
        x_low = x;
        *position = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }
    positions[SAMPLES] = 1.0;

    SplineTable { positions }
});

/// Point on the fling spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Fraction of the total distance travelled.
    pub distance: f32,
    /// Derivative of `distance` with respect to normalized time.
    pub velocity: f32,
}

/// Normalized fling curve: time in `[0, 1]` to travelled fraction in `[0, 1]`.
pub struct FlingSpline;

impl FlingSpline {
    pub fn sample(time: f32) -> SplineSample {
        let time = time.clamp(0.0, 1.0);
        let index = (SAMPLES as f32 * time) as usize;
        if index >= SAMPLES {
            return SplineSample {
                distance: 1.0,
                velocity: 0.0,
            };
        }

        let t_low = index as f32 / SAMPLES as f32;
        let t_high = (index + 1) as f32 / SAMPLES as f32;
        let d_low = SPLINE.positions[index];
        let d_high = SPLINE.positions[index + 1];
        let velocity = (d_high - d_low) / (t_high - t_low);
        SplineSample {
            distance: d_low + (time - t_low) * velocity,
            velocity,
        }
    }

    fn deceleration(velocity: f32, friction: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64 / friction as f64).ln()
    }
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `ln(0.78) / ln(0.9)`
const DECELERATION_RATE: f64 = 2.358_201_6;

fn physical_coefficient(density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84
}

/// Distance and duration of one fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    pub initial_velocity: f32,
    /// Unsigned distance in pixels.
    pub distance: f32,
    pub duration_millis: i64,
}

impl FlingInfo {
    const NONE: FlingInfo = FlingInfo {
        initial_velocity: 0.0,
        distance: 0.0,
        duration_millis: 0,
    };

    fn progress(&self, time_millis: i64) -> f32 {
        if self.duration_millis > 0 {
            time_millis as f32 / self.duration_millis as f32
        } else {
            1.0
        }
    }

    /// Signed offset from the fling origin.
    pub fn position(&self, time_millis: i64) -> f32 {
        self.distance
            * self.initial_velocity.signum()
            * FlingSpline::sample(self.progress(time_millis)).distance
    }

    /// Signed velocity in pixels per second.
    pub fn velocity(&self, time_millis: i64) -> f32 {
        if self.duration_millis <= 0 {
            return 0.0;
        }
        FlingSpline::sample(self.progress(time_millis)).velocity
            * self.initial_velocity.signum()
            * self.distance
            / self.duration_millis as f32
            * 1000.0
    }

    pub fn is_finished(&self, time_millis: i64) -> bool {
        time_millis >= self.duration_millis
    }
}

/// Computes fling distance and duration from an initial velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is pixels per density-independent pixel.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            coefficient: physical_coefficient(density),
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn deceleration(&self, velocity: f32) -> f64 {
        FlingSpline::deceleration(velocity, self.friction * self.coefficient)
    }

    pub fn fling_duration_millis(&self, velocity: f32) -> i64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    pub fn fling_distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.deceleration(velocity);
        let scale = (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp() as f32;
        self.friction * self.coefficient * scale
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        if velocity == 0.0 || !velocity.is_finite() {
            return FlingInfo::NONE;
        }
        FlingInfo {
            initial_velocity: velocity,
            distance: self.fling_distance(velocity),
            duration_millis: self.fling_duration_millis(velocity),
        }
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

/// Animation without a target: starts with a velocity and slows down to rest.
pub trait FloatDecayAnimationSpec {
    fn value_from_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32)
        -> f32;

    fn velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self::with_calculator(FlingCalculator::with_density(density))
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }
}

impl FloatDecayAnimationSpec for SplineBasedDecaySpec {
    fn value_from_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        initial_value + info.position(play_time_nanos / 1_000_000)
    }

    fn velocity_from_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        info.velocity(play_time_nanos / 1_000_000)
    }

    fn duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        self.calculator
            .fling_duration_millis(initial_velocity)
            .saturating_mul(1_000_000)
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + self.calculator.fling_distance(initial_velocity) * initial_velocity.signum()
    }
}

/// One step of a [`DecayAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFrame {
    /// Change in value since the previous frame.
    pub delta: f32,
    /// Velocity at this frame, pixels per second.
    pub velocity: f32,
    pub finished: bool,
}

/// Frame stepper over a decay spec. The first frame anchors time and yields no movement.
pub struct DecayAnimation<'a> {
    spec: &'a dyn FloatDecayAnimationSpec,
    initial_velocity: f32,
    duration_nanos: i64,
    start_time_nanos: Option<u64>,
    last_value: f32,
}

impl<'a> DecayAnimation<'a> {
    pub fn new(spec: &'a dyn FloatDecayAnimationSpec, initial_velocity: f32) -> Self {
        Self {
            spec,
            initial_velocity,
            duration_nanos: spec.duration_nanos(0.0, initial_velocity),
            start_time_nanos: None,
            last_value: 0.0,
        }
    }

    pub fn advance(&mut self, frame_time_nanos: u64) -> DecayFrame {
        let start = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let play_time = i64::try_from(frame_time_nanos.saturating_sub(start)).unwrap_or(i64::MAX);

        let finished = play_time >= self.duration_nanos;
        let value = if finished {
            self.spec.target_value(0.0, self.initial_velocity)
        } else {
            self.spec
                .value_from_nanos(play_time, 0.0, self.initial_velocity)
        };
        let velocity = if finished {
            0.0
        } else {
            self.spec
                .velocity_from_nanos(play_time, 0.0, self.initial_velocity)
        };

        let delta = value - self.last_value;
        self.last_value = value;
        DecayFrame {
            delta,
            velocity,
            finished,
        }
    }
}

#[cfg(test)]
#[path = "tests/decay_spec_tests.rs"]
mod tests;
