//! A user's relationship to the required group, as reported by the oracle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship kinds a membership lookup can resolve to.
///
/// Produced per check and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Created the group.
    Owner,

    /// Group administrator.
    Administrator,

    /// Regular member.
    Member,

    /// Member under restrictions (muted, limited permissions).
    Restricted,

    /// Was a member and left.
    Left,

    /// Removed and banned from the group.
    Banned,

    /// The group has no record of the user at all.
    Absent,

    /// The oracle returned a status this build does not know.
    Unrecognized(String),
}

impl MembershipStatus {
    /// Every status a lookup can resolve to, excluding `Unrecognized`.
    pub const KNOWN: [MembershipStatus; 7] = [
        MembershipStatus::Owner,
        MembershipStatus::Administrator,
        MembershipStatus::Member,
        MembershipStatus::Restricted,
        MembershipStatus::Left,
        MembershipStatus::Banned,
        MembershipStatus::Absent,
    ];

    /// Returns true if this status admits the user.
    ///
    /// Only owners, administrators and regular members are in good standing.
    /// Everything else, including restricted members and statuses this build
    /// does not recognize, is denied.
    pub fn is_in_good_standing(&self) -> bool {
        matches!(
            self,
            MembershipStatus::Owner | MembershipStatus::Administrator | MembershipStatus::Member
        )
    }

    /// Short label used in logs.
    pub fn as_str(&self) -> &str {
        match self {
            MembershipStatus::Owner => "owner",
            MembershipStatus::Administrator => "administrator",
            MembershipStatus::Member => "member",
            MembershipStatus::Restricted => "restricted",
            MembershipStatus::Left => "left",
            MembershipStatus::Banned => "banned",
            MembershipStatus::Absent => "absent",
            MembershipStatus::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_admin_and_member_are_in_good_standing() {
        assert!(MembershipStatus::Owner.is_in_good_standing());
        assert!(MembershipStatus::Administrator.is_in_good_standing());
        assert!(MembershipStatus::Member.is_in_good_standing());
    }

    #[test]
    fn other_known_statuses_are_not_in_good_standing() {
        for status in [
            MembershipStatus::Restricted,
            MembershipStatus::Left,
            MembershipStatus::Banned,
            MembershipStatus::Absent,
        ] {
            assert!(!status.is_in_good_standing(), "{status} must not admit");
        }
    }

    #[test]
    fn unrecognized_status_is_not_in_good_standing() {
        let status = MembershipStatus::Unrecognized("member_plus".to_string());
        assert!(!status.is_in_good_standing());
        assert_eq!(status.as_str(), "member_plus");
    }

    #[test]
    fn known_list_has_exactly_three_admitting_statuses() {
        let admitting = MembershipStatus::KNOWN
            .iter()
            .filter(|s| s.is_in_good_standing())
            .count();
        assert_eq!(admitting, 3);
    }
}
