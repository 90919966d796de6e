#![forbid(unsafe_code)]

//! Cooperative tick source for driving the engine.
//!
//! The caller owns the loop and reports elapsed time; [`FrameClock::poll`]
//! answers how many ticks fell due. A zero interval fires exactly once per
//! poll, which is how "as fast as possible" runs. Backlog after a stall is
//! capped at [`MAX_CATCH_UP_TICKS`] so a long pause does not produce a burst.

use crate::pattern::{FrameStats, PatternEngine};
use crate::timing::TimingController;
use gpath_render::QuadSurface;
use std::time::Duration;

/// Most ticks a single poll can report.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClock {
    interval: Duration,
    accumulated: Duration,
    running: bool,
    ticks: u64,
}

impl FrameClock {
    /// A running clock with the given tick interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            running: true,
            ticks: 0,
        }
    }

    pub fn from_timing(timing: &TimingController) -> Self {
        Self::new(timing.interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. Time accumulated toward the old interval is dropped.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.accumulated = Duration::ZERO;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop firing. Accumulated time is discarded.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total ticks fired since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time left before the next tick, or `None` while stopped.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.running
            .then(|| self.interval.saturating_sub(self.accumulated))
    }

    /// Account for `elapsed` and return the number of ticks now due.
    pub fn poll(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        if self.interval.is_zero() {
            self.ticks += 1;
            return 1;
        }

        self.accumulated += elapsed;
        let interval_ns = self.interval.as_nanos();
        let due = self.accumulated.as_nanos() / interval_ns;
        if due == 0 {
            return 0;
        }
        let fired = due.min(MAX_CATCH_UP_TICKS as u128) as u32;
        self.accumulated = Duration::from_nanos((self.accumulated.as_nanos() % interval_ns) as u64);
        self.ticks += fired as u64;
        fired
    }

    /// Poll, then advance and render once if any tick fell due.
    ///
    /// Several due ticks coalesce into one alternation, so every rendered
    /// frame shows the opposite phase of the one before it. Returns the stats
    /// of the rendered frame, or `None` when nothing fell due.
    pub fn drive<S: QuadSurface + ?Sized>(
        &mut self,
        engine: &mut PatternEngine,
        surface: &mut S,
        elapsed: Duration,
    ) -> Option<FrameStats> {
        let due = self.poll(elapsed);
        if due == 0 {
            return None;
        }
        engine.advance_frame();
        gpath_core::trace!(due, ticks = self.ticks, "clock fired");
        Some(engine.render_frame(surface))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_timing(&TimingController::default())
    }
}
