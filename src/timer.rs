//! Repeating tick scheduler driven by the frame loop
//!
//! There is no timer thread. The scheduler stores the next deadline and the
//! UI polls it every frame with the current time; each full period that has
//! passed yields one tick. The UI asks egui to repaint at the next deadline
//! so polling keeps happening while the window is idle.

use std::time::{Duration, Instant};
use tracing::debug;

/// Period between two session ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(1430);

/// Arms and disarms the repeating session tick
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl TickScheduler {
    /// Create a disarmed scheduler with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Check if the tick is armed
    pub fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Arm the tick; the first one fires one period after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
        debug!("[TIMER] Armed with {:?} period", self.period);
    }

    /// Cancel any pending tick
    pub fn disarm(&mut self) {
        if self.next_deadline.take().is_some() {
            debug!("[TIMER] Disarmed");
        }
    }

    /// Tear down and re-arm if currently armed
    pub fn rearm(&mut self, now: Instant) {
        if self.is_armed() {
            self.arm(now);
        }
    }

    /// Number of ticks due at `now`
    ///
    /// Advances the deadline by one period per tick returned, so a late
    /// frame catches up without drifting the cadence.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut deadline) = self.next_deadline else {
            return 0;
        };

        let mut due = 0;
        while now >= deadline {
            due += 1;
            deadline += self.period;
        }
        self.next_deadline = Some(deadline);
        due
    }

    /// Time left until the next tick, if armed
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
