//! Pure mapping from a membership lookup outcome to a verdict.

use super::{DenialReason, GateVerdict, MembershipStatus};

/// Decides the verdict for one completed membership lookup.
///
/// This is the only place `GateVerdict::Allowed` is derived from a lookup:
/// a resolved status in good standing admits, any other resolved status is
/// `NotMember`, and any failure is `OracleError`. The failure itself is
/// opaque here; callers log it before deciding.
pub fn decide<E>(outcome: &Result<MembershipStatus, E>) -> GateVerdict {
    match outcome {
        Ok(status) if status.is_in_good_standing() => GateVerdict::Allowed,
        Ok(_) => GateVerdict::Denied(DenialReason::NotMember),
        Err(_) => GateVerdict::Denied(DenialReason::OracleError),
    }
}
