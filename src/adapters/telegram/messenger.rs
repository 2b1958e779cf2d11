//! `Messenger` backed by `sendMessage` and `answerCallbackQuery`.

use async_trait::async_trait;

use crate::domain::foundation::{CallbackId, ChatId};
use crate::domain::gate::{ActionTarget, OutboundReply};
use crate::ports::{Messenger, MessengerError};

use super::bot_api::{BotApiError, TelegramBotApi};
use super::wire_types::{InlineKeyboardButton, InlineKeyboardMarkup, SendMessageRequest};

#[async_trait]
impl Messenger for TelegramBotApi {
    async fn send_reply(&self, chat: ChatId, reply: &OutboundReply) -> Result<(), MessengerError> {
        self.send_message(&to_send_message(chat, reply))
            .await
            .map_err(to_messenger_error)
    }

    async fn acknowledge(&self, callback: &CallbackId) -> Result<(), MessengerError> {
        self.answer_callback_query(callback.as_str())
            .await
            .map_err(to_messenger_error)
    }
}

/// Builds the `sendMessage` payload, one button per keyboard row.
pub(crate) fn to_send_message(chat: ChatId, reply: &OutboundReply) -> SendMessageRequest {
    let reply_markup = reply.has_actions().then(|| InlineKeyboardMarkup {
        inline_keyboard: reply
            .actions
            .iter()
            .map(|action| {
                let (url, callback_data) = match &action.target {
                    ActionTarget::Url(url) => (Some(url.clone()), None),
                    ActionTarget::Callback(data) => (None, Some(data.clone())),
                };
                vec![InlineKeyboardButton {
                    text: action.label.clone(),
                    url,
                    callback_data,
                }]
            })
            .collect(),
    });

    SendMessageRequest {
        chat_id: chat.as_i64(),
        text: reply.text.clone(),
        reply_markup,
    }
}

fn to_messenger_error(error: BotApiError) -> MessengerError {
    match error {
        BotApiError::Api { code, description } => MessengerError::Rejected { code, description },
        other => MessengerError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gate::InlineAction;

    #[test]
    fn plain_reply_has_no_keyboard() {
        let request = to_send_message(ChatId::new(7), &OutboundReply::text("hello"));
        assert_eq!(request.chat_id, 7);
        assert_eq!(request.text, "hello");
        assert!(request.reply_markup.is_none());
    }

    #[test]
    fn actions_become_one_button_per_row() {
        let reply = OutboundReply::text("join")
            .with_action(InlineAction::link("Join", "https://t.me/group"))
            .with_action(InlineAction::callback("Check", "check_sub"));

        let markup = to_send_message(ChatId::new(7), &reply).reply_markup.unwrap();

        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(
            markup.inline_keyboard[0],
            vec![InlineKeyboardButton {
                text: "Join".to_string(),
                url: Some("https://t.me/group".to_string()),
                callback_data: None,
            }]
        );
        assert_eq!(
            markup.inline_keyboard[1][0].callback_data.as_deref(),
            Some("check_sub")
        );
    }

    #[test]
    fn api_errors_become_rejections() {
        let err = to_messenger_error(BotApiError::Api {
            code: 403,
            description: "Forbidden: bot was blocked by the user".to_string(),
        });
        assert!(matches!(err, MessengerError::Rejected { code: 403, .. }));
    }

    #[test]
    fn network_errors_become_transport() {
        let err = to_messenger_error(BotApiError::Timeout { timeout_secs: 5 });
        assert!(matches!(err, MessengerError::Transport(_)));
    }
}
