use tracing::debug;

use crate::grid::Grid;

/// Once more than this many ticks elapsed, the baseline is retaken. This gives a rearm period of 16
/// ticks.
pub const REARM_AFTER: u32 = 15;

/// Minimum number of ticks since the baseline before a match counts as stable.
pub const MIN_ELAPSED: u32 = 10;

/// Heuristic convergence detector.
///
/// Keeps a snapshot of the grid and the number of ticks since it was taken. An evolved grid that
/// matches the snapshot after at least [`MIN_ELAPSED`] ticks is considered stable. This catches
/// still lifes and oscillators whose period divides the distance to the baseline, but it is not a
/// cycle detector: long period oscillators and spaceships are never reported.
#[derive(Clone, Debug)]
pub struct StabilityDetector {
    baseline: Grid,
    elapsed: u32,
}

impl StabilityDetector {
    /// Take the initial baseline from the seed.
    pub fn new(seed: &Grid) -> Self {
        Self {
            baseline: seed.clone(),
            elapsed: 0,
        }
    }

    /// Per-tick bookkeeping, run against the grid *before* it is evolved.
    pub fn observe(&mut self, current: &Grid) {
        if self.elapsed > REARM_AFTER {
            debug!("retaking stability baseline");

            self.baseline.clone_from(current);
            self.elapsed = 0;
        }

        self.elapsed += 1;
    }

    /// Whether `next` matches the baseline late enough in the window to count.
    pub fn is_stable(&self, next: &Grid) -> bool {
        self.elapsed >= MIN_ELAPSED && *next == self.baseline
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn baseline(&self) -> &Grid {
        &self.baseline
    }
}
