//! Classifies raw Bot API updates into gate events.

use crate::domain::foundation::{CallbackId, ChatId, UserId};
use crate::domain::gate::{InboundEvent, UserIdentity, ENTRY_COMMAND, RECHECK_ACTION_ID};

use super::wire_types::{CallbackQuery, Message, Update, User};

/// What to do with one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedUpdate {
    /// Run it through the dispatcher.
    Dispatch(InboundEvent),
    /// A button the gate does not own: acknowledge it and do nothing else.
    AcknowledgeOnly(CallbackId),
    /// Nothing to do.
    Ignore,
}

/// Maps an update to its routing decision.
///
/// `bot_username` is used to tell `/start@this_bot` from a command addressed
/// to another bot in a shared group. When unknown, any addressed `/start`
/// counts as the entry command.
pub fn route_update(update: Update, bot_username: Option<&str>) -> RoutedUpdate {
    if let Some(query) = update.callback_query {
        return route_callback(query);
    }

    // Edits are never answered; only fresh messages reach the gate.
    match update.message {
        Some(message) => RoutedUpdate::Dispatch(message_event(message, bot_username)),
        None => RoutedUpdate::Ignore,
    }
}

fn route_callback(query: CallbackQuery) -> RoutedUpdate {
    let Ok(callback_id) = CallbackId::new(query.id) else {
        return RoutedUpdate::Ignore;
    };

    if query.data.as_deref() != Some(RECHECK_ACTION_ID) {
        return RoutedUpdate::AcknowledgeOnly(callback_id);
    }

    RoutedUpdate::Dispatch(InboundEvent::RecheckAction {
        callback_id,
        identity: identity_from(query.from.as_ref()),
        reply_to: query.message.map(|m| ChatId::new(m.chat.id)),
    })
}

fn message_event(message: Message, bot_username: Option<&str>) -> InboundEvent {
    let identity = identity_from(message.from.as_ref());
    let reply_to = ChatId::new(message.chat.id);

    let is_entry = message
        .text
        .as_deref()
        .is_some_and(|text| is_entry_command(text, bot_username));

    if is_entry {
        InboundEvent::EntryCommand { identity, reply_to }
    } else {
        InboundEvent::OtherMessage { identity, reply_to }
    }
}

/// True for `/start`, `/start payload` and `/start@bot` addressed to this bot.
/// The command name is matched case-insensitively.
fn is_entry_command(text: &str, bot_username: Option<&str>) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let Some(command) = first.strip_prefix('/') else {
        return false;
    };

    match command.split_once('@') {
        None => command.eq_ignore_ascii_case(ENTRY_COMMAND),
        Some((name, target)) => {
            name.eq_ignore_ascii_case(ENTRY_COMMAND)
                && bot_username.map_or(true, |bot| bot.eq_ignore_ascii_case(target))
        }
    }
}

fn identity_from(user: Option<&User>) -> Option<UserIdentity> {
    let user = user?;
    let id = UserId::new(user.id).ok()?;
    Some(UserIdentity::new(id).with_display_name(user.full_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: serde_json::Value) -> Update {
        serde_json::from_value(json).unwrap()
    }

    fn text_update(text: &str) -> Update {
        update(serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 1,
                "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
                "chat": {"id": 42, "type": "private"},
                "text": text
            }
        }))
    }

    fn callback_update(data: &str, with_message: bool) -> Update {
        let mut query = serde_json::json!({
            "id": "cb-1",
            "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
            "chat_instance": "1",
            "data": data
        });
        if with_message {
            query["message"] = serde_json::json!({
                "message_id": 5,
                "chat": {"id": 42, "type": "private"}
            });
        }
        update(serde_json::json!({"update_id": 2, "callback_query": query}))
    }

    #[test]
    fn start_is_entry_command() {
        let routed = route_update(text_update("/start"), None);
        let RoutedUpdate::Dispatch(event) = routed else {
            panic!("expected dispatch");
        };
        assert!(matches!(event, InboundEvent::EntryCommand { .. }));
        assert_eq!(event.reply_to(), Some(ChatId::new(42)));
        assert_eq!(event.identity().unwrap().display_name(), Some("Anna"));
    }

    #[test]
    fn start_with_payload_is_entry_command() {
        let routed = route_update(text_update("/start ref_123"), None);
        assert!(matches!(
            routed,
            RoutedUpdate::Dispatch(InboundEvent::EntryCommand { .. })
        ));
    }

    #[test]
    fn entry_command_ignores_case() {
        for text in ["/Start", "/START", "/sTaRt ref_1", "/START@GateBot"] {
            let routed = route_update(text_update(text), Some("GateBot"));
            assert!(
                matches!(routed, RoutedUpdate::Dispatch(InboundEvent::EntryCommand { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn start_addressed_to_this_bot_is_entry_command() {
        let routed = route_update(text_update("/start@GateBot"), Some("gatebot"));
        assert!(matches!(
            routed,
            RoutedUpdate::Dispatch(InboundEvent::EntryCommand { .. })
        ));
    }

    #[test]
    fn start_addressed_to_another_bot_is_other_message() {
        let routed = route_update(text_update("/start@OtherBot"), Some("GateBot"));
        assert!(matches!(
            routed,
            RoutedUpdate::Dispatch(InboundEvent::OtherMessage { .. })
        ));
    }

    #[test]
    fn lookalike_commands_are_other_messages() {
        for text in ["/started", "start", "hello /start", "/help"] {
            let routed = route_update(text_update(text), None);
            assert!(
                matches!(routed, RoutedUpdate::Dispatch(InboundEvent::OtherMessage { .. })),
                "{text}"
            );
        }
    }

    #[test]
    fn message_without_text_is_other_message() {
        let routed = route_update(
            update(serde_json::json!({
                "update_id": 3,
                "message": {
                    "message_id": 1,
                    "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
                    "chat": {"id": 42, "type": "private"},
                    "sticker": {"file_id": "x"}
                }
            })),
            None,
        );
        assert!(matches!(
            routed,
            RoutedUpdate::Dispatch(InboundEvent::OtherMessage { .. })
        ));
    }

    #[test]
    fn message_without_sender_has_no_identity() {
        let routed = route_update(
            update(serde_json::json!({
                "update_id": 4,
                "message": {
                    "message_id": 1,
                    "chat": {"id": -100, "type": "channel"},
                    "text": "/start"
                }
            })),
            None,
        );
        let RoutedUpdate::Dispatch(event) = routed else {
            panic!("expected dispatch");
        };
        assert!(event.identity().is_none());
    }

    #[test]
    fn edited_message_is_ignored() {
        let routed = route_update(
            update(serde_json::json!({
                "update_id": 5,
                "edited_message": {
                    "message_id": 1,
                    "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
                    "chat": {"id": 42, "type": "private"},
                    "text": "/start"
                }
            })),
            None,
        );
        assert_eq!(routed, RoutedUpdate::Ignore);
    }

    #[test]
    fn recheck_callback_is_recheck_action() {
        let routed = route_update(callback_update("check_sub", true), None);
        let RoutedUpdate::Dispatch(event) = routed else {
            panic!("expected dispatch");
        };
        assert_eq!(event.callback_id().map(CallbackId::as_str), Some("cb-1"));
        assert_eq!(event.reply_to(), Some(ChatId::new(42)));
    }

    #[test]
    fn recheck_callback_without_message_has_no_reply_target() {
        let routed = route_update(callback_update("check_sub", false), None);
        let RoutedUpdate::Dispatch(event) = routed else {
            panic!("expected dispatch");
        };
        assert_eq!(event.reply_to(), None);
    }

    #[test]
    fn foreign_callback_is_acknowledged_only() {
        let routed = route_update(callback_update("vote_up", true), None);
        assert_eq!(
            routed,
            RoutedUpdate::AcknowledgeOnly(CallbackId::new("cb-1").unwrap())
        );
    }

    #[test]
    fn update_without_routed_kind_is_ignored() {
        let routed = route_update(update(serde_json::json!({"update_id": 6})), None);
        assert_eq!(routed, RoutedUpdate::Ignore);
    }
}
