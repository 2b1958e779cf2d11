//! State machine trait for status enums.
//!
//! Gives lifecycle enums one way to validate transitions, so a handler that
//! walks an event from receipt to reply cannot skip a step silently.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal transitions; validated transitions and the
/// terminal check come for free.
///
/// # Example
///
/// ```ignore
/// let state = VerificationState::Unverified;
/// let state = state.transition_to(VerificationState::Verified)?;
/// let state = state.transition_to(VerificationState::Replied)?;
/// assert!(state.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
