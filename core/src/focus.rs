//! Audio-focus arbitration
//!
//! Announcements hold a transient, duckable focus grant (accessibility/speech
//! usage) from tone request through the final word. A denial only degrades
//! ducking behavior; the announcement still plays.

use tracing::debug;

/// Result of a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Granted,
    Denied,
}

/// Acquires and releases the audio-focus grant around a sequence run.
///
/// `release` without a held grant must be a no-op, and `acquire` while a
/// grant is held replaces it. At most one grant exists at a time.
pub trait FocusArbiter: Send {
    fn acquire(&mut self) -> FocusOutcome;
    fn release(&mut self);
}

/// In-process model of a transient, may-duck focus grant.
///
/// Desktop audio stacks have no system-wide focus arbitration, so this
/// tracks the grant state locally and leaves ducking to the platform.
#[derive(Debug, Default)]
pub struct TransientFocus {
    held: bool,
}

impl TransientFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl FocusArbiter for TransientFocus {
    fn acquire(&mut self) -> FocusOutcome {
        if self.held {
            debug!("replacing held audio-focus grant");
        }
        self.held = true;
        FocusOutcome::Granted
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            debug!("audio focus released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_without_grant_is_noop() {
        let mut focus = TransientFocus::new();
        focus.release();
        assert!(!focus.is_held());
    }

    #[test]
    fn acquire_replaces_held_grant() {
        let mut focus = TransientFocus::new();
        assert_eq!(focus.acquire(), FocusOutcome::Granted);
        assert_eq!(focus.acquire(), FocusOutcome::Granted);
        assert!(focus.is_held());

        focus.release();
        assert!(!focus.is_held());
    }
}
