#![forbid(unsafe_code)]

//! Type-ahead matching.
//!
//! Typed characters accumulate (case-folded) into a buffer. Each keystroke
//! re-arms a decay deadline; once it passes, the buffer starts over. The
//! buffer resolves to the first *enabled* option whose label starts with it.
//!
//! The deadline is a [`DeferredAction`] owned by the matcher, so there is no
//! timer to leak: [`cancel`](TypeaheadMatcher::cancel) disarms it and dropping
//! the matcher drops it.

use dropkit_core::deferred::DeferredAction;
use web_time::{Duration, Instant};

use super::options::OptionList;
use crate::starts_with_ignore_case;

/// Default decay window between keystrokes.
pub const DEFAULT_TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

/// Keystroke buffer with a decay deadline.
#[derive(Debug, Clone)]
pub struct TypeaheadMatcher {
    buffer: String,
    reset: DeferredAction,
}

impl Default for TypeaheadMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TYPEAHEAD_TIMEOUT)
    }
}

impl TypeaheadMatcher {
    /// Create a matcher whose buffer decays `timeout` after the last keystroke.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: String::new(),
            reset: DeferredAction::new(timeout),
        }
    }

    /// The accumulated, lowercased search text.
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether a search is in progress (the buffer is non-empty).
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.reset.delay()
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.reset.set_delay(timeout);
    }

    /// When the buffer will reset, if a reset is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.reset.deadline()
    }

    /// Feed one character and resolve the buffer against `options`.
    ///
    /// Returns the index of the first enabled option whose label starts with
    /// the buffer, or `focused` unchanged when nothing matches. A miss keeps
    /// the buffer so later keystrokes within the window extend it.
    pub fn on_character(
        &mut self,
        ch: char,
        now: Instant,
        options: &OptionList,
        focused: Option<usize>,
    ) -> Option<usize> {
        // A late keystroke may arrive before the host's tick fired the reset.
        self.tick(now);
        self.buffer.extend(ch.to_lowercase());
        self.reset.schedule(now);
        find_prefix(options, &self.buffer).or(focused)
    }

    /// Fire the decay deadline if it has passed. Returns `true` if the buffer was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.reset.fire_if_due(now) {
            self.buffer.clear();
            true
        } else {
            false
        }
    }

    /// Clear the buffer and disarm the deadline.
    pub fn cancel(&mut self) {
        self.buffer.clear();
        self.reset.cancel();
    }
}

/// First enabled option whose label starts with `prefix_lower`.
#[must_use]
pub fn find_prefix(options: &OptionList, prefix_lower: &str) -> Option<usize> {
    options
        .iter()
        .position(|option| !option.is_disabled() && starts_with_ignore_case(option.label(), prefix_lower))
}
