//! Outbound reply content.

use serde::{Deserialize, Serialize};

/// Text plus inline actions sent back on the conversation an event came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundReply {
    pub text: String,
    /// Rendered one per row, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<InlineAction>,
}

impl OutboundReply {
    /// Creates a plain text reply with no actions.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    /// Appends an action.
    pub fn with_action(mut self, action: InlineAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Target of the first link action, if any.
    pub fn link(&self) -> Option<&str> {
        self.actions.iter().find_map(|a| match &a.target {
            ActionTarget::Url(url) => Some(url.as_str()),
            ActionTarget::Callback(_) => None,
        })
    }

    /// Returns true if any action routes back with the given callback id.
    pub fn has_callback(&self, id: &str) -> bool {
        self.actions
            .iter()
            .any(|a| matches!(&a.target, ActionTarget::Callback(data) if data == id))
    }
}

/// A button-like element attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineAction {
    pub label: String,
    pub target: ActionTarget,
}

impl InlineAction {
    /// Button that opens an external link.
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Url(url.into()),
        }
    }

    /// Button that sends a callback back to the bot.
    pub fn callback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: ActionTarget::Callback(data.into()),
        }
    }
}

/// Where an inline action leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTarget {
    Url(String),
    Callback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_reply_has_no_actions() {
        let reply = OutboundReply::text("hello");
        assert!(!reply.has_actions());
        assert_eq!(reply.link(), None);
    }

    #[test]
    fn actions_keep_insertion_order() {
        let reply = OutboundReply::text("join")
            .with_action(InlineAction::link("Join", "https://t.me/x"))
            .with_action(InlineAction::callback("Check", "check_sub"));
        assert_eq!(reply.actions.len(), 2);
        assert_eq!(reply.link(), Some("https://t.me/x"));
        assert!(reply.has_callback("check_sub"));
        assert!(!reply.has_callback("other"));
    }
}
