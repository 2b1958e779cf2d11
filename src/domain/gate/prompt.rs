//! Reply texts and the join prompt.
//!
//! Rendering is pure: the same verdict and group always produce the same
//! reply, which keeps repeated recheck presses idempotent.

use super::{DenialReason, EventKind, GroupReference, InlineAction, OutboundReply, RECHECK_ACTION_ID};

pub(crate) const WELCOME_TEXT: &str = "✅ Доступ открыт. Напиши любое сообщение.";
pub(crate) const RECHECK_PASSED_TEXT: &str = "✅ Проверка пройдена. Теперь бот открыт.";
pub(crate) const BOT_ACTIVE_TEXT: &str = "🔥 Бот работает. (Дальше добавим команды.)";

pub(crate) const NO_IDENTITY_TEXT: &str = "⚠️ Не вижу пользователя. Напиши /start ещё раз.";

pub(crate) const TROUBLESHOOTING_TEXT: &str = "⚠️ Не смог проверить вступление.\n\
Проверь: бот добавлен в группу и лучше сделан админом.\n\
И @username группы указан верно.";

pub(crate) const JOIN_PROMPT_TEXT: &str = "🔒 Доступ к боту только для участников группы.\n\
1) Вступи в группу\n\
2) Нажми «Проверить»";

const JOIN_BUTTON_LABEL: &str = "📌 Вступить в группу";
const RECHECK_BUTTON_LABEL: &str = "✅ Я вступил — проверить";

/// Builds replies for verdicts, parameterized by the required group.
#[derive(Debug, Clone)]
pub struct PromptRenderer {
    group: GroupReference,
}

impl PromptRenderer {
    pub fn new(group: GroupReference) -> Self {
        Self { group }
    }

    pub fn group(&self) -> &GroupReference {
        &self.group
    }

    /// Reply for a refused interaction.
    ///
    /// Only `NotMember` carries actions: a link to the group and the recheck
    /// button. Oracle failures get troubleshooting text aimed at whoever runs
    /// the bot, never the underlying error.
    pub fn render(&self, reason: &DenialReason) -> OutboundReply {
        match reason {
            DenialReason::NotMember => OutboundReply::text(JOIN_PROMPT_TEXT)
                .with_action(InlineAction::link(JOIN_BUTTON_LABEL, self.group.join_url()))
                .with_action(InlineAction::callback(RECHECK_BUTTON_LABEL, RECHECK_ACTION_ID)),
            DenialReason::OracleError => OutboundReply::text(TROUBLESHOOTING_TEXT),
            DenialReason::NoIdentity => OutboundReply::text(NO_IDENTITY_TEXT),
        }
    }

    /// Reply for an admitted interaction of the given kind.
    pub fn render_success(&self, kind: EventKind) -> OutboundReply {
        match kind {
            EventKind::EntryCommand => OutboundReply::text(WELCOME_TEXT),
            EventKind::RecheckAction => OutboundReply::text(RECHECK_PASSED_TEXT),
            EventKind::OtherMessage => OutboundReply::text(BOT_ACTIVE_TEXT),
        }
    }
}
