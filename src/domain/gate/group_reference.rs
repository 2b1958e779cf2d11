//! The group a user must belong to before the bot talks to them.

use std::fmt;

use crate::domain::foundation::ValidationError;

/// Marker that distinguishes a public handle from any other reference.
const PUBLIC_HANDLE_MARKER: char = '@';

/// Base of canonical join links for public handles.
const PUBLIC_LINK_BASE: &str = "https://t.me/";

/// Reference to the required group.
///
/// Set once at startup from configuration and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupReference {
    /// Public handle, stored without the leading `@`.
    PublicHandle(String),

    /// Anything else: a numeric chat id or a direct invite link. Used as-is.
    Direct(String),
}

impl GroupReference {
    /// Parses a configured group reference.
    ///
    /// Surrounding whitespace is ignored. A value starting with `@` is a public
    /// handle and must have something after the marker.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("required_chat"));
        }

        match raw.strip_prefix(PUBLIC_HANDLE_MARKER) {
            Some("") => Err(ValidationError::invalid_format(
                "required_chat",
                "public handle has no name after '@'",
            )),
            Some(handle) => Ok(GroupReference::PublicHandle(handle.to_string())),
            None => Ok(GroupReference::Direct(raw.to_string())),
        }
    }

    /// The value the membership oracle is queried with.
    pub fn lookup_key(&self) -> String {
        match self {
            GroupReference::PublicHandle(handle) => format!("{PUBLIC_HANDLE_MARKER}{handle}"),
            GroupReference::Direct(value) => value.clone(),
        }
    }

    /// Link a user follows to join the group.
    ///
    /// Public handles get the canonical `https://t.me/<handle>` link; direct
    /// references are returned verbatim.
    pub fn join_url(&self) -> String {
        match self {
            GroupReference::PublicHandle(handle) => format!("{PUBLIC_LINK_BASE}{handle}"),
            GroupReference::Direct(value) => value.clone(),
        }
    }

    /// Returns true for public handles.
    pub fn is_public_handle(&self) -> bool {
        matches!(self, GroupReference::PublicHandle(_))
    }
}

impl fmt::Display for GroupReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lookup_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn handle_is_parsed_without_marker() {
        let group = GroupReference::parse("@HoneyBdisigne").unwrap();
        assert_eq!(group, GroupReference::PublicHandle("HoneyBdisigne".to_string()));
        assert!(group.is_public_handle());
    }

    #[test]
    fn handle_join_url_is_canonical_link() {
        let group = GroupReference::parse("@rustaceans").unwrap();
        assert_eq!(group.join_url(), "https://t.me/rustaceans");
    }

    #[test]
    fn handle_lookup_key_keeps_marker() {
        let group = GroupReference::parse("@rustaceans").unwrap();
        assert_eq!(group.lookup_key(), "@rustaceans");
    }

    #[test]
    fn direct_link_is_used_verbatim() {
        let group = GroupReference::parse("https://t.me/+AbCdEf123").unwrap();
        assert_eq!(group.join_url(), "https://t.me/+AbCdEf123");
        assert_eq!(group.lookup_key(), "https://t.me/+AbCdEf123");
        assert!(!group.is_public_handle());
    }

    #[test]
    fn numeric_chat_id_is_direct() {
        let group = GroupReference::parse("-1001234567890").unwrap();
        assert_eq!(group, GroupReference::Direct("-1001234567890".to_string()));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let group = GroupReference::parse("  @spaced \n").unwrap();
        assert_eq!(group.join_url(), "https://t.me/spaced");
    }

    #[test]
    fn empty_reference_is_rejected() {
        assert!(matches!(
            GroupReference::parse("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn bare_marker_is_rejected() {
        assert!(matches!(
            GroupReference::parse("@"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    proptest! {
        #[test]
        fn any_handle_links_to_its_name(name in "[A-Za-z][A-Za-z0-9_]{3,31}") {
            let group = GroupReference::parse(&format!("@{name}")).unwrap();
            prop_assert_eq!(group.join_url(), format!("https://t.me/{name}"));
        }

        #[test]
        fn any_non_handle_links_verbatim(value in "[a-z0-9:/.+_-]{1,40}") {
            let group = GroupReference::parse(&value).unwrap();
            prop_assert_eq!(group.join_url(), value);
        }
    }
}
