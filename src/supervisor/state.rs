//! Shared supervisor state
//!
//! The retry timer and teardown flag mutated from both the tick context and
//! the link-event context. Always accessed through a `SharedState` wrapper;
//! the fields themselves carry no synchronization.

use crate::settings::NetworkSettings;

/// Fixed delay between reconnect attempts, in milliseconds.
///
/// There is no exponential backoff; a tick cadence finer than this window
/// (one second works well) gives retry timing its resolution.
pub const RECONNECT_DELAY_MS: u64 = 60_000;

/// State shared between the supervision tick and link event handling.
///
/// Lives for the whole process, one instance per managed radio. Connectivity
/// itself is never stored here; it is queried live from the interface.
#[derive(Debug)]
pub struct SupervisorState {
    /// Settings snapshot used by the next connect attempt
    pub(crate) settings: NetworkSettings,
    /// When the last attempt window opened; `None` means attempt on the
    /// next tick regardless of elapsed time
    pub(crate) last_attempt_ms: Option<u64>,
    /// True while a supervisor-issued disconnect awaits its
    /// `StationStopped` confirmation
    pub(crate) stopping: bool,
}

impl SupervisorState {
    /// Create supervisor state holding the given settings snapshot.
    ///
    /// The retry timer starts cleared, so the first tick attempts
    /// immediately.
    pub fn new(settings: NetworkSettings) -> Self {
        Self {
            settings,
            last_attempt_ms: None,
            stopping: false,
        }
    }

    /// Whether a connect attempt is due at `now_ms`.
    ///
    /// Due when no attempt window is open, or the window is at least
    /// [`RECONNECT_DELAY_MS`] old. A clock reading older than the window
    /// start counts as zero elapsed time rather than wrapping.
    pub fn retry_due(&self, now_ms: u64) -> bool {
        match self.last_attempt_ms {
            None => true,
            Some(opened_ms) => now_ms.saturating_sub(opened_ms) >= RECONNECT_DELAY_MS,
        }
    }

    /// Open an attempt window at `now_ms`.
    pub(crate) fn mark_attempt(&mut self, now_ms: u64) {
        self.last_attempt_ms = Some(now_ms);
    }

    /// Clear the attempt window so the next tick attempts immediately.
    pub(crate) fn force_retry(&mut self) {
        self.last_attempt_ms = None;
    }

    /// True while a supervisor-issued teardown awaits confirmation.
    pub fn is_stopping(&self) -> bool {
        self.stopping
    }

    /// When the current attempt window opened, if one is open.
    pub fn last_attempt_ms(&self) -> Option<u64> {
        self.last_attempt_ms
    }

    /// The settings snapshot the next attempt will use.
    pub fn settings(&self) -> &NetworkSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_due() {
        let state = SupervisorState::new(NetworkSettings::default());
        assert!(state.retry_due(0));
        assert!(state.retry_due(1_000_000));
        assert!(!state.is_stopping());
    }

    #[test]
    fn test_retry_window_boundaries() {
        let mut state = SupervisorState::new(NetworkSettings::default());
        state.mark_attempt(1_000);

        assert!(!state.retry_due(1_000));
        assert!(!state.retry_due(60_999));
        assert!(state.retry_due(61_000));
        assert!(state.retry_due(120_000));
    }

    #[test]
    fn test_force_retry_clears_window() {
        let mut state = SupervisorState::new(NetworkSettings::default());
        state.mark_attempt(5_000);
        assert!(!state.retry_due(5_001));

        state.force_retry();
        assert_eq!(state.last_attempt_ms(), None);
        assert!(state.retry_due(5_001));
    }

    #[test]
    fn test_clock_stepping_backwards_is_not_due() {
        let mut state = SupervisorState::new(NetworkSettings::default());
        state.mark_attempt(100_000);

        // A reading older than the window start must not wrap into a huge
        // elapsed time.
        assert!(!state.retry_due(40_000));
    }
}
