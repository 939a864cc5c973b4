//! Fixed-interval frame clock
//!
//! Converts elapsed wall time into whole animation pulses. Cadence is
//! best-effort: time accumulates between updates and is paid out one
//! interval at a time, capped per update so a long stall cannot trigger
//! an unbounded burst of ticks.

use std::time::Duration;

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    max_pulses: u32,
    accumulator: Duration,
    running: bool,
    total_pulses: u64,
}

impl FrameClock {
    /// A stopped clock; a zero interval is bumped to 1ms
    pub fn new(interval: Duration, max_pulses: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            max_pulses: max_pulses.max(1),
            accumulator: Duration::ZERO,
            running: false,
            total_pulses: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Duration::from_millis(settings.tick_interval_ms),
            settings.max_catchup_pulses,
        )
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn total_pulses(&self) -> u64 {
        self.total_pulses
    }

    /// Start (or resume) from an empty accumulator
    pub fn start(&mut self) {
        self.accumulator = Duration::ZERO;
        self.running = true;
    }

    /// Stop and discard any partial interval
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Feed elapsed time, returning how many pulses are due now
    pub fn pulses(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }

        // Clamp stalls so the backlog never exceeds one burst
        let cap = self
            .interval
            .checked_mul(self.max_pulses)
            .unwrap_or(Duration::MAX);
        self.accumulator = self.accumulator.saturating_add(elapsed).min(cap);

        let mut pulses = 0;
        while self.accumulator >= self.interval && pulses < self.max_pulses {
            self.accumulator -= self.interval;
            pulses += 1;
        }

        self.total_pulses += pulses as u64;
        pulses
    }
}
