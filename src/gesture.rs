//! Touch gesture helpers that do not depend on any UI toolkit.
//!
//! The platform layer forwards raw events together with the instant they
//! happened; these types decide what the events mean.

use std::time::{Duration, Instant};

/// Two presses closer together than this count as a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// A drag keeps suppressing taps for this long after it is released.
pub const DEFAULT_SCROLL_SETTLE: Duration = Duration::from_millis(150);

/// Recognizes a double tap on a single surface (e.g. one note card).
#[derive(Debug, Clone)]
pub struct DoubleTap {
    window: Duration,
    last_press: Option<Instant>,
}

impl Default for DoubleTap {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_WINDOW)
    }
}

impl DoubleTap {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    /// Record a press. Returns true when it lands within the window of the
    /// previous press; every press becomes the new previous press.
    pub fn press(&mut self, now: Instant) -> bool {
        let fired = matches!(
            self.last_press,
            Some(prev) if now.saturating_duration_since(prev) < self.window
        );
        self.last_press = Some(now);
        fired
    }
}

/// Tracks whether a scroll gesture is still in effect, so that releasing a
/// drag is not mistaken for a tap.
#[derive(Debug, Clone)]
pub struct ScrollGuard {
    settle: Duration,
    dragging: bool,
    released_at: Option<Instant>,
}

impl Default for ScrollGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_SETTLE)
    }
}

impl ScrollGuard {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            dragging: false,
            released_at: None,
        }
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.released_at = None;
    }

    pub fn end_drag(&mut self, now: Instant) {
        self.dragging = false;
        self.released_at = Some(now);
    }

    /// True while dragging and until the settle delay after release has passed.
    pub fn is_active(&self, now: Instant) -> bool {
        if self.dragging {
            return true;
        }
        match self.released_at {
            Some(released) => now.saturating_duration_since(released) < self.settle,
            None => false,
        }
    }
}
