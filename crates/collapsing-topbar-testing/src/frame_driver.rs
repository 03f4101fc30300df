//! Headless frame driver.
//!
//! Owns a single-threaded executor and a [`FrameClock`]. Tests spawn animation or fling
//! futures, then step frames the way a host would: poll tasks, drain frame callbacks, poll
//! again.
//!
//! ```
//! use collapsing_topbar_testing::FrameDriver;
//!
//! let mut driver = FrameDriver::new();
//! let clock = driver.clock();
//! driver.spawn(async move {
//!     clock.next_frame().await;
//! });
//! assert!(driver.run_until_idle(10));
//! ```

use collapsing_topbar_core::FrameClock;
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use std::future::Future;

/// Nanoseconds between two frames at 62.5 fps.
pub const FRAME_NANOS: u64 = 16_000_000;

pub struct FrameDriver {
    pool: LocalPool,
    clock: FrameClock,
    frame_time_nanos: u64,
    frame_interval_nanos: u64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_clock(FrameClock::new())
    }

    pub fn with_clock(clock: FrameClock) -> Self {
        Self {
            pool: LocalPool::new(),
            clock,
            frame_time_nanos: 0,
            frame_interval_nanos: FRAME_NANOS,
        }
    }

    pub fn clock(&self) -> FrameClock {
        self.clock.clone()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Spawns a task on the local executor and polls it until it stalls.
    pub fn spawn(&mut self, future: impl Future<Output = ()> + 'static) {
        if let Err(err) = self.pool.spawner().spawn_local(future) {
            panic!("failed to spawn test task: {err:?}");
        }
        self.pool.run_until_stalled();
    }

    /// Polls every task that can make progress without a new frame.
    pub fn run_until_stalled(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Delivers one frame and polls the tasks it woke.
    ///
    /// Returns the number of frame callbacks that ran.
    pub fn advance_frame(&mut self) -> usize {
        self.pool.run_until_stalled();
        let drained = self.clock.drain_frame_callbacks(self.frame_time_nanos);
        self.frame_time_nanos += self.frame_interval_nanos;
        self.pool.run_until_stalled();
        drained
    }

    /// Advances `count` frames.
    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Advances frames until nothing waits on the clock.
    ///
    /// Returns `false` if work was still pending after `max_frames`.
    pub fn run_until_idle(&mut self, max_frames: usize) -> bool {
        self.pool.run_until_stalled();
        for _ in 0..max_frames {
            if !self.clock.has_pending_callbacks() {
                return true;
            }
            self.advance_frame();
        }
        let idle = !self.clock.has_pending_callbacks();
        if !idle {
            log::warn!("frame driver still busy after {max_frames} frames");
        }
        idle
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
