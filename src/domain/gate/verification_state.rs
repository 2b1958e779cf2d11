//! Per-event verification lifecycle.

use crate::domain::foundation::StateMachine;

/// Where one event is in its walk through the gate.
///
/// Lives only for the duration of a single dispatch; nothing is retained
/// between events, so every event starts `Unverified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationState {
    /// Initial state: no verdict yet.
    #[default]
    Unverified,

    /// The gate admitted the user for this event.
    Verified,

    /// The reply was composed and handed off. Terminal.
    Replied,
}

impl StateMachine for VerificationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use VerificationState::*;
        matches!(
            (self, target),
            (Unverified, Verified) | (Unverified, Replied) | (Verified, Replied)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VerificationState::*;
        match self {
            Unverified => vec![Verified, Replied],
            Verified => vec![Replied],
            Replied => vec![],
        }
    }
}
