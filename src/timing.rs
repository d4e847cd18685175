//! Helpers for pacing the game loop and timing in-game events.

use std::time::Duration;

#[cfg(test)]
pub(crate) use mock_instant::Instant;
#[cfg(not(test))]
pub(crate) use std::time::Instant;

/// Keeps track of time between relatively steady pulses.
///
/// Ticks try to stay lined up with the original tick, but if [`Self::tick`] is called more than half a period
/// delayed, the next tick will be reset relative to the current time instead. If called early it will always advance
/// by exactly one tick.
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period in seconds. The first tick is right now.
    pub fn new(period: f32) -> Self {
        Self {
            next: Instant::now(),
            period: Duration::from_secs_f32(period),
        }
    }

    /// A timer that ticks `rate` times a second.
    pub fn per_second(rate: u32) -> Self {
        Self::new(1.0 / rate.max(1) as f32)
    }

    /// How much time is left before the timer ticks over. Minimum 0.
    pub fn remaining(&self) -> Duration {
        let now = Instant::now();
        if self.next > now {
            self.next - now
        } else {
            Duration::ZERO
        }
    }

    /// Move on to the next tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next + self.period / 2 {
            self.next += self.period;
        } else {
            self.next = now + self.period;
        }
    }
}
