#![forbid(unsafe_code)]

//! Cancellable deferred actions.
//!
//! [`DeferredAction`] is a single-shot deadline owned by whoever schedules it.
//! It never spawns a thread or registers a global timer: the host passes the
//! current time in, polls [`fire_if_due`](DeferredAction::fire_if_due) from its
//! tick, and can ask for [`deadline`](DeferredAction::deadline) to decide when
//! to wake up next.
//!
//! # Invariants
//!
//! 1. At most one deadline is pending; [`schedule`](DeferredAction::schedule)
//!    replaces any earlier one.
//! 2. A cancelled action never fires, no matter how late the next poll is.
//! 3. Firing consumes the deadline; a second poll at the same instant is a no-op.
//!
//! # Example
//!
//! ```
//! use dropkit_core::deferred::DeferredAction;
//! use web_time::{Duration, Instant};
//!
//! let mut reset = DeferredAction::new(Duration::from_millis(500));
//! let t0 = Instant::now();
//! reset.schedule(t0);
//! assert!(!reset.fire_if_due(t0 + Duration::from_millis(499)));
//! assert!(reset.fire_if_due(t0 + Duration::from_millis(500)));
//! assert!(!reset.is_pending());
//! ```

use web_time::{Duration, Instant};

/// A restartable, cancellable single-shot deadline.
#[derive(Debug, Clone)]
pub struct DeferredAction {
    delay: Duration,
    due: Option<Instant>,
}

impl DeferredAction {
    /// Create an idle action that fires `delay` after each [`schedule`](Self::schedule).
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// The configured delay.
    #[inline]
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay. A pending deadline keeps its original due time.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Arm (or re-arm) the action to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    /// Disarm the action. Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// Whether a deadline is pending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// The pending deadline, if any.
    #[inline]
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Whether the pending deadline has been reached at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Fire the action if it is due, consuming the deadline.
    ///
    /// Returns `true` exactly once per armed deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.due = None;
            #[cfg(feature = "tracing")]
            tracing::trace!(target: crate::logging::CORE_TARGET, message = "deferred.fire");
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn starts_idle() {
        let action = DeferredAction::new(DELAY);
        assert!(!action.is_pending());
        assert_eq!(action.deadline(), None);
        assert_eq!(action.delay(), DELAY);
    }

    #[test]
    fn fires_at_deadline_once() {
        let mut action = DeferredAction::new(DELAY);
        let t0 = Instant::now();
        action.schedule(t0);
        assert_eq!(action.deadline(), Some(t0 + DELAY));
        assert!(!action.fire_if_due(t0));
        assert!(action.fire_if_due(t0 + DELAY));
        assert!(!action.fire_if_due(t0 + DELAY));
    }

    #[test]
    fn schedule_restarts_deadline() {
        let mut action = DeferredAction::new(DELAY);
        let t0 = Instant::now();
        action.schedule(t0);
        let t1 = t0 + Duration::from_millis(400);
        action.schedule(t1);
        assert!(!action.fire_if_due(t0 + DELAY));
        assert!(action.fire_if_due(t1 + DELAY));
    }

    #[test]
    fn cancelled_action_never_fires() {
        let mut action = DeferredAction::new(DELAY);
        let t0 = Instant::now();
        action.schedule(t0);
        assert!(action.cancel());
        assert!(!action.cancel());
        assert!(!action.fire_if_due(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn set_delay_applies_to_next_schedule() {
        let mut action = DeferredAction::new(DELAY);
        let t0 = Instant::now();
        action.schedule(t0);
        action.set_delay(Duration::from_millis(100));
        assert_eq!(action.deadline(), Some(t0 + DELAY));
        action.schedule(t0);
        assert_eq!(action.deadline(), Some(t0 + Duration::from_millis(100)));
    }
}
