use std::time::Duration;

/// Delay between frames on startup and after a reset, in microseconds.
pub const DEFAULT_DELAY_US: u64 = 100_000;
pub const MIN_DELAY_US: u64 = 1_000;
pub const MAX_DELAY_US: u64 = 500_000;

/// Amount by which a single key press changes the delay.
pub const DELAY_STEP_US: u64 = 10_000;

/// Inter-frame delay, always within `[MIN_DELAY_US, MAX_DELAY_US]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Speed {
    delay_us: u64,
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            delay_us: DEFAULT_DELAY_US,
        }
    }
}

impl Speed {
    /// Lengthen the delay by one step.
    pub fn slow_down(&mut self) {
        self.delay_us = (self.delay_us + DELAY_STEP_US).min(MAX_DELAY_US);
    }

    /// Shorten the delay by one step.
    pub fn speed_up(&mut self) {
        self.delay_us = self
            .delay_us
            .saturating_sub(DELAY_STEP_US)
            .max(MIN_DELAY_US);
    }

    pub fn reset(&mut self) {
        self.delay_us = DEFAULT_DELAY_US;
    }

    pub fn delay_us(&self) -> u64 {
        self.delay_us
    }

    pub fn delay(&self) -> Duration {
        Duration::from_micros(self.delay_us)
    }
}
