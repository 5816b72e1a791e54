//! Timer utilities.
//!
//! All ShakeCursor time values are `Duration`s measured from a monotonic
//! epoch chosen by the host. Timers are deadlines on that clock, fired by
//! polling with the current time.

use std::time::Duration;

/// A single-shot timer driven by explicit clock values.
///
/// Starting an active timer restarts it from zero; stopping an inactive
/// timer does nothing. The timer fires at most once per start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleShotTimer {
    interval: Duration,
    deadline: Option<Duration>,
}

impl SingleShotTimer {
    /// Create an inactive timer with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// (Re)start the timer at `now`.
    pub fn start(&mut self, now: Duration) {
        self.deadline = Some(now + self.interval);
    }

    /// Stop the timer.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Whether the timer is running.
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the timer will fire, if running.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Returns true and deactivates the timer if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
