#![forbid(unsafe_code)]

//! Rate to tick-interval mapping.
//!
//! | Request            | Interval       |
//! |--------------------|----------------|
//! | `Max`              | 0 ms           |
//! | `Hz(h)`, `h <= 0`  | 100 000 ms     |
//! | `Hz(h)`, `h >= 60` | 0 ms           |
//! | `Hz(h)` otherwise  | `1000 / h` ms, truncated |
//!
//! `Max` is matched before the rate value is looked at, so the max-speed
//! toggle and a slider at zero never share a code path.

use std::time::Duration;

/// Rates at or above this collapse to "as fast as possible".
pub const MAX_THROTTLED_HZ: i32 = 60;

/// Interval used for a non-positive rate; effectively paused.
pub const PAUSED_INTERVAL_MS: u64 = 100_000;

/// A requested alternation rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateSetting {
    /// Alternations per second, as set on the slider.
    Hz(i32),
    /// No throttling; advance on every available tick.
    Max,
}

impl RateSetting {
    /// Tick interval in milliseconds.
    pub const fn interval_ms(self) -> u64 {
        match self {
            Self::Max => 0,
            Self::Hz(hz) if hz <= 0 => PAUSED_INTERVAL_MS,
            Self::Hz(hz) if hz >= MAX_THROTTLED_HZ => 0,
            Self::Hz(hz) => (1000 / hz) as u64,
        }
    }

    /// Tick interval as a [`Duration`].
    pub const fn interval(self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    /// Whether this request pauses alternation (a slider dragged to zero).
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Hz(hz) if hz <= 0)
    }
}

impl Default for RateSetting {
    fn default() -> Self {
        Self::Hz(MAX_THROTTLED_HZ)
    }
}

/// Holds the rate slider value and the max-speed toggle.
///
/// The two are kept apart so switching max speed off returns to whatever the
/// slider was at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingController {
    slider_hz: i32,
    max_rate: bool,
}

impl TimingController {
    pub fn new(slider_hz: i32, max_rate: bool) -> Self {
        Self {
            slider_hz,
            max_rate,
        }
    }

    /// Set the slider rate in Hz. The max-speed toggle is left as is.
    pub fn set_rate(&mut self, hz: i32) {
        self.slider_hz = hz;
        gpath_core::debug!(hz, interval_ms = self.interval_ms(), "rate changed");
    }

    pub fn set_max_rate(&mut self, enabled: bool) {
        self.max_rate = enabled;
        gpath_core::debug!(enabled, interval_ms = self.interval_ms(), "max rate toggled");
    }

    pub fn slider_hz(&self) -> i32 {
        self.slider_hz
    }

    pub fn is_max_rate(&self) -> bool {
        self.max_rate
    }

    /// The effective request: `Max` while the toggle is on, the slider otherwise.
    pub fn rate(&self) -> RateSetting {
        if self.max_rate {
            RateSetting::Max
        } else {
            RateSetting::Hz(self.slider_hz)
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.rate().interval_ms()
    }

    pub fn interval(&self) -> Duration {
        self.rate().interval()
    }

    pub fn is_paused(&self) -> bool {
        self.rate().is_paused()
    }
}

impl Default for TimingController {
    fn default() -> Self {
        Self::new(MAX_THROTTLED_HZ, false)
    }
}
