//! Deferred work owned by a component
//!
//! A [`Deferred`] holds at most one pending deadline. Scheduling again replaces
//! the pending deadline, cancelling drops it. The owner polls it from its event
//! handler (hosts send [`EventKind::Tick`](crate::EventKind::Tick) regularly),
//! so the work runs on the same thread as every other state change.
//!
//! Because the deadline lives inside the component, dropping the component
//! drops the pending work with it; nothing can fire into a torn-down instance.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tui_select_core::Deferred;
//! use tokio::time::Instant;
//!
//! let mut close = Deferred::new();
//! let start = Instant::now();
//! close.schedule_at(start, Duration::from_millis(150));
//!
//! assert!(!close.fire_if_due(start + Duration::from_millis(100)));
//! assert!(close.fire_if_due(start + Duration::from_millis(150)));
//! // Fired once, then idle
//! assert!(!close.is_pending());
//! ```

use std::time::Duration;
use tokio::time::Instant;

/// A single pending deadline
#[derive(Debug, Clone, Default)]
pub struct Deferred {
    due: Option<Instant>,
}

impl Deferred {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule to fire `delay` from now, replacing any pending deadline
    pub fn schedule(&mut self, delay: Duration) {
        self.schedule_at(Instant::now(), delay);
    }

    /// Schedule to fire `delay` after `now`, replacing any pending deadline
    pub fn schedule_at(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.due = None;
    }

    /// Whether a deadline is pending
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// The pending deadline
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    /// Consume the deadline if it has passed
    ///
    /// Returns `true` exactly once per schedule.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_never_fires() {
        let mut deferred = Deferred::new();
        assert!(!deferred.is_pending());
        assert!(!deferred.fire_if_due(Instant::now()));
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut deferred = Deferred::new();
        let start = Instant::now();

        deferred.schedule_at(start, Duration::from_millis(100));
        deferred.schedule_at(start + Duration::from_millis(80), Duration::from_millis(100));

        assert!(!deferred.fire_if_due(start + Duration::from_millis(120)));
        assert!(deferred.fire_if_due(start + Duration::from_millis(180)));
    }

    #[test]
    fn test_cancel() {
        let mut deferred = Deferred::new();
        let start = Instant::now();
        deferred.schedule_at(start, Duration::from_millis(10));

        deferred.cancel();

        assert!(!deferred.is_pending());
        assert!(!deferred.fire_if_due(start + Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_uses_tokio_clock() {
        let mut deferred = Deferred::new();
        deferred.schedule(Duration::from_millis(150));

        tokio::time::advance(Duration::from_millis(149)).await;
        assert!(!deferred.fire_if_due(Instant::now()));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(deferred.fire_if_due(Instant::now()));
    }
}
