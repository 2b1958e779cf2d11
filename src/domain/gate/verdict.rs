//! Outcome of a single gate check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision controlling whether an interaction proceeds.
///
/// Derived per event and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum GateVerdict {
    /// The user is in good standing with the required group.
    Allowed,
    /// The interaction is refused for the given reason.
    Denied(DenialReason),
}

impl GateVerdict {
    /// Returns true if the interaction may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateVerdict::Allowed)
    }

    /// Returns true if the interaction is refused.
    pub fn is_denied(&self) -> bool {
        matches!(self, GateVerdict::Denied(_))
    }

    /// Converts the verdict to a Result type, with a denial becoming an error.
    pub fn into_result(self) -> Result<(), DenialReason> {
        match self {
            GateVerdict::Allowed => Ok(()),
            GateVerdict::Denied(reason) => Err(reason),
        }
    }
}

impl fmt::Display for GateVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateVerdict::Allowed => write!(f, "allowed"),
            GateVerdict::Denied(reason) => write!(f, "denied ({})", reason),
        }
    }
}

/// Why an interaction was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The event carried no resolvable user.
    NoIdentity,

    /// The lookup succeeded but the user lacks a qualifying status.
    NotMember,

    /// The lookup failed or the configured group could not be resolved.
    OracleError,
}

impl DenialReason {
    /// Stable label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::NoIdentity => "no_identity",
            DenialReason::NotMember => "not_member",
            DenialReason::OracleError => "oracle_error",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_is_allowed() {
        let verdict = GateVerdict::Allowed;
        assert!(verdict.is_allowed());
        assert!(!verdict.is_denied());
        assert!(verdict.into_result().is_ok());
    }

    #[test]
    fn denied_carries_reason() {
        let verdict = GateVerdict::Denied(DenialReason::NotMember);
        assert!(verdict.is_denied());
        assert_eq!(verdict.into_result(), Err(DenialReason::NotMember));
    }

    #[test]
    fn display_includes_reason_label() {
        let verdict = GateVerdict::Denied(DenialReason::OracleError);
        assert_eq!(verdict.to_string(), "denied (oracle_error)");
        assert_eq!(GateVerdict::Allowed.to_string(), "allowed");
    }

    #[test]
    fn verdict_serializes_with_tag() {
        let json = serde_json::to_string(&GateVerdict::Denied(DenialReason::NoIdentity)).unwrap();
        assert_eq!(json, r#"{"verdict":"denied","reason":"no_identity"}"#);
    }
}
