// Chunk: docs/chunks/process_state - Cross-session panel state
//!
//! State that survives from one selection session to the next.
//!
//! The navigator owns exactly one [`ProcessState`]. It is reset when the
//! navigator is created or reloaded and otherwise only changed by the session
//! callbacks and the close command.

/// Panel flags shared across selection sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessState {
    /// The navigator's panel is currently shown
    pub panel_open: bool,
    /// Last index the host highlighted (or the initial index of the panel)
    pub highlighted_index: usize,
    /// A bare dismissal commits index 0 instead of the highlighted index
    pub reset_on_close: bool,
    /// The open panel belongs to the navigator, not to another host panel
    pub active: bool,
}

impl ProcessState {
    /// Restores the startup defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolves the index a commit or dismissal lands on.
    ///
    /// An explicit pick is returned as is. A dismissal (`None`) lands on 0 when
    /// `reset_on_close` is set; otherwise it lands on the highlighted index and
    /// sets `reset_on_close`, so the next bare dismissal lands on 0.
    pub fn resolve_done_index(&mut self, index: Option<usize>) -> usize {
        match index {
            Some(index) => index,
            None if self.reset_on_close => 0,
            None => {
                self.reset_on_close = true;
                self.highlighted_index
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_pick_is_untouched() {
        let mut state = ProcessState {
            highlighted_index: 4,
            ..Default::default()
        };
        assert_eq!(state.resolve_done_index(Some(2)), 2);
        assert!(!state.reset_on_close);
    }

    #[test]
    fn test_dismiss_with_reset_lands_on_zero() {
        let mut state = ProcessState {
            highlighted_index: 3,
            reset_on_close: true,
            ..Default::default()
        };
        assert_eq!(state.resolve_done_index(None), 0);
        assert!(state.reset_on_close);
    }

    #[test]
    fn test_dismiss_without_reset_lands_on_highlight_then_zero() {
        let mut state = ProcessState {
            highlighted_index: 3,
            ..Default::default()
        };
        assert_eq!(state.resolve_done_index(None), 3);
        assert!(state.reset_on_close);
        assert_eq!(state.resolve_done_index(None), 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = ProcessState {
            panel_open: true,
            highlighted_index: 7,
            reset_on_close: true,
            active: true,
        };
        state.reset();
        assert_eq!(state, ProcessState::default());
    }
}
