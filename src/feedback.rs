//! Display timers for transient feedback.
//!
//! This module contains the timers behind the bump flash and the hint overlay. They only decide how
//! long something stays on screen; the engine never looks at them.

use std::time::{Duration, Instant};

/// Time a bumped cell stays highlighted, in milliseconds.
pub(crate) const BUMP_DISPLAY_MS: u64 = 300;

/// Time a hint path stays visible, in milliseconds.
pub(crate) const HINT_DISPLAY_MS: u64 = 3000;

/// A visual cue that expires after a fixed duration.
///
/// Starting a new flash simply replaces the old value in its slot, which cancels the previous timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Flash {
    /// Moment the cue appeared.
    started: Instant,
    /// How long the cue remains visible.
    duration: Duration,
}

impl Flash {
    /// Starts a flash lasting `millis` milliseconds from `now`.
    pub(crate) const fn starting_at(now: Instant, millis: u64) -> Self {
        Self {
            started: now,
            duration: Duration::from_millis(millis),
        }
    }

    /// Starts a bump flash now.
    pub(crate) fn bump() -> Self {
        Self::starting_at(Instant::now(), BUMP_DISPLAY_MS)
    }

    /// Starts a hint flash now.
    pub(crate) fn hint() -> Self {
        Self::starting_at(Instant::now(), HINT_DISPLAY_MS)
    }

    /// Whether the cue should be gone at `now`.
    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_expires_after_duration() {
        let start = Instant::now();
        let flash = Flash::starting_at(start, BUMP_DISPLAY_MS);

        assert!(!flash.is_expired_at(start));
        assert!(!flash.is_expired_at(start + Duration::from_millis(299)));
        assert!(flash.is_expired_at(start + Duration::from_millis(300)));
    }

    #[test]
    fn test_hint_outlasts_bump() {
        let start = Instant::now();
        let later = start + Duration::from_millis(1000);

        assert!(Flash::starting_at(start, BUMP_DISPLAY_MS).is_expired_at(later));
        assert!(!Flash::starting_at(start, HINT_DISPLAY_MS).is_expired_at(later));
    }

    #[test]
    fn test_clock_going_backwards_is_not_expired() {
        let start = Instant::now() + Duration::from_secs(5);

        assert!(!Flash::starting_at(start, HINT_DISPLAY_MS).is_expired_at(Instant::now()));
    }
}
