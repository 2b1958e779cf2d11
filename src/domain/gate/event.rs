//! Inbound events the dispatcher routes through the gate.

use std::fmt;

use crate::domain::foundation::{CallbackId, ChatId};

use super::UserIdentity;

/// Command that opens a conversation with the bot.
pub const ENTRY_COMMAND: &str = "start";

/// Callback identifier carried by the recheck button.
pub const RECHECK_ACTION_ID: &str = "check_sub";

/// One inbound event, classified once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The user sent the entry command.
    EntryCommand {
        identity: Option<UserIdentity>,
        reply_to: ChatId,
    },

    /// The user pressed the recheck button.
    ///
    /// `reply_to` is absent when the message carrying the button is no
    /// longer reachable.
    RecheckAction {
        callback_id: CallbackId,
        identity: Option<UserIdentity>,
        reply_to: Option<ChatId>,
    },

    /// Any other message.
    OtherMessage {
        identity: Option<UserIdentity>,
        reply_to: ChatId,
    },
}

impl InboundEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InboundEvent::EntryCommand { .. } => EventKind::EntryCommand,
            InboundEvent::RecheckAction { .. } => EventKind::RecheckAction,
            InboundEvent::OtherMessage { .. } => EventKind::OtherMessage,
        }
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        match self {
            InboundEvent::EntryCommand { identity, .. }
            | InboundEvent::RecheckAction { identity, .. }
            | InboundEvent::OtherMessage { identity, .. } => identity.as_ref(),
        }
    }

    /// Conversation the reply goes to, if any.
    pub fn reply_to(&self) -> Option<ChatId> {
        match self {
            InboundEvent::EntryCommand { reply_to, .. }
            | InboundEvent::OtherMessage { reply_to, .. } => Some(*reply_to),
            InboundEvent::RecheckAction { reply_to, .. } => *reply_to,
        }
    }

    /// Callback to acknowledge before replying. Only recheck actions have one.
    pub fn callback_id(&self) -> Option<&CallbackId> {
        match self {
            InboundEvent::RecheckAction { callback_id, .. } => Some(callback_id),
            _ => None,
        }
    }
}

/// Discriminant of [`InboundEvent`], used to pick the success reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EntryCommand,
    RecheckAction,
    OtherMessage,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::EntryCommand => "entry_command",
            EventKind::RecheckAction => "recheck_action",
            EventKind::OtherMessage => "other_message",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
