//! Who sent an inbound event.

use crate::domain::foundation::UserId;

/// Identity of the user behind one inbound event.
///
/// Supplied by the event and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    id: UserId,
    display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
        }
    }

    /// Attaches a display name. Blank names are dropped.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.display_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
