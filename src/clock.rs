//! Wall-clock pacing for the fixed-timestep loop.

use std::time::{Duration, Instant};

/// Decides when the next tick is due and how much time it covers.
///
/// Each tick is credited the whole milliseconds that actually passed since the
/// previous one. The sub-millisecond remainder stays on the clock, so the sum
/// of credited ticks never drifts from wall time by more than a millisecond.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
    step: Duration,
}

impl TickClock {
    pub fn new(start: Instant, step_ms: u32) -> Self {
        Self {
            last: start,
            step: Duration::from_millis(u64::from(step_ms.max(1))),
        }
    }

    /// How long to wait for input before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.step
            .saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Milliseconds to feed the engine, once at least one step has passed.
    pub fn advance(&mut self, now: Instant) -> Option<u32> {
        let since = now.saturating_duration_since(self.last);
        if since < self.step {
            return None;
        }
        let ms = since.as_millis().min(u128::from(u32::MAX)) as u32;
        self.last += Duration::from_millis(u64::from(ms));
        Some(ms)
    }
}
