//! Fullscreen state machine.
//!
//! Fullscreen entry is a fire-and-forget platform request; the browser
//! confirms it (or the user leaves with Escape) asynchronously through a
//! change notification. The machine therefore only advances in [`observe`],
//! driven by what the platform reports, never by the request call itself.
//!
//! [`observe`]: FullscreenMachine::observe

/// The two observable display states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    /// Windowed, the initial state.
    #[default]
    Normal,
    /// The wrapper element is the platform's fullscreen element.
    Fullscreen,
}

/// Outcome of feeding one platform notification into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Entered fullscreen. The caller should center the wrapper and request
    /// pointer lock; the previous alignment has been recorded.
    Entered,
    /// Left fullscreen. Carries the alignment recorded on entry, to be
    /// written back verbatim. `None` only if nothing was ever recorded.
    Exited {
        /// Wrapper text-alignment captured when fullscreen was entered.
        restore_alignment: Option<String>,
    },
    /// The notification did not change the observed state.
    Unchanged,
}

/// Notification-driven two-state machine tracking fullscreen status.
///
/// The authoritative state lives in the platform; this machine mirrors it and
/// keeps the one piece of bookkeeping the platform does not: the wrapper's
/// text alignment from before fullscreen was entered.
#[derive(Debug, Default)]
pub struct FullscreenMachine {
    state: FullscreenState,
    saved_alignment: Option<String>,
}

impl FullscreenMachine {
    /// Create a machine in the `Normal` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mirrored state.
    #[must_use]
    pub const fn state(&self) -> FullscreenState {
        self.state
    }

    /// Whether the machine currently mirrors fullscreen.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        matches!(self.state, FullscreenState::Fullscreen)
    }

    /// Alignment recorded on the last fullscreen entry, if any.
    #[must_use]
    pub fn saved_alignment(&self) -> Option<&str> {
        self.saved_alignment.as_deref()
    }

    /// Feed one platform notification into the machine.
    ///
    /// `platform_fullscreen` is the platform's answer to "is there a
    /// fullscreen element right now"; `current_alignment` is the wrapper's
    /// text alignment at the moment of the notification, recorded so it can
    /// be restored on exit.
    pub fn observe(&mut self, platform_fullscreen: bool, current_alignment: &str) -> Transition {
        match (self.state, platform_fullscreen) {
            (FullscreenState::Normal, true) => {
                self.saved_alignment = Some(current_alignment.to_string());
                self.state = FullscreenState::Fullscreen;
                Transition::Entered
            }
            (FullscreenState::Fullscreen, false) => {
                self.state = FullscreenState::Normal;
                Transition::Exited {
                    restore_alignment: self.saved_alignment.take(),
                }
            }
            _ => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_normal() {
        let machine = FullscreenMachine::new();
        assert_eq!(machine.state(), FullscreenState::Normal);
        assert!(!machine.is_fullscreen());
        assert_eq!(machine.saved_alignment(), None);
    }

    #[test]
    fn test_enter_records_alignment() {
        let mut machine = FullscreenMachine::new();
        let transition = machine.observe(true, "left");
        assert_eq!(transition, Transition::Entered);
        assert!(machine.is_fullscreen());
        assert_eq!(machine.saved_alignment(), Some("left"));
    }

    #[test]
    fn test_exit_restores_exact_alignment() {
        let mut machine = FullscreenMachine::new();
        machine.observe(true, "right");
        let transition = machine.observe(false, "center");
        assert_eq!(
            transition,
            Transition::Exited {
                restore_alignment: Some("right".to_string())
            }
        );
        assert!(!machine.is_fullscreen());
        // Restoring consumes the saved value.
        assert_eq!(machine.saved_alignment(), None);
    }

    #[test]
    fn test_enter_with_no_prior_alignment() {
        let mut machine = FullscreenMachine::new();
        machine.observe(true, "");
        assert_eq!(machine.saved_alignment(), Some(""));
        let transition = machine.observe(false, "center");
        assert_eq!(
            transition,
            Transition::Exited {
                restore_alignment: Some(String::new())
            }
        );
    }

    #[test]
    fn test_duplicate_notifications_are_noops() {
        let mut machine = FullscreenMachine::new();
        assert_eq!(machine.observe(false, ""), Transition::Unchanged);

        machine.observe(true, "left");
        // A second "entered" notification must not overwrite the recording.
        assert_eq!(machine.observe(true, "center"), Transition::Unchanged);
        assert_eq!(machine.saved_alignment(), Some("left"));
    }

    #[test]
    fn test_exit_without_entry_is_unchanged() {
        let mut machine = FullscreenMachine::new();
        assert_eq!(machine.observe(false, "left"), Transition::Unchanged);
        assert_eq!(machine.saved_alignment(), None);
    }

    #[test]
    fn test_reentry_after_exit() {
        let mut machine = FullscreenMachine::new();
        machine.observe(true, "left");
        machine.observe(false, "center");
        let transition = machine.observe(true, "justify");
        assert_eq!(transition, Transition::Entered);
        assert_eq!(machine.saved_alignment(), Some("justify"));
    }
}
