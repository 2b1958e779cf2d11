//! `MembershipOracle` backed by `getChatMember`.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::gate::{GroupReference, MembershipStatus};
use crate::ports::{MembershipOracle, OracleError};

use super::bot_api::{BotApiError, TelegramBotApi};

/// Error descriptions that mean "the group has no record of this user".
///
/// These are well-formed negative answers, not failures.
const USER_ABSENT_MARKERS: [&str; 2] = ["user not found", "PARTICIPANT_ID_INVALID"];

#[async_trait]
impl MembershipOracle for TelegramBotApi {
    async fn lookup(
        &self,
        group: &GroupReference,
        user_id: UserId,
    ) -> Result<MembershipStatus, OracleError> {
        match self.get_chat_member(&group.lookup_key(), user_id.as_i64()).await {
            Ok(member) => Ok(status_from_wire(&member.status)),
            Err(e) => classify_failure(e),
        }
    }
}

/// Maps a Bot API member status string onto the gate's vocabulary.
pub(crate) fn status_from_wire(status: &str) -> MembershipStatus {
    match status {
        "creator" => MembershipStatus::Owner,
        "administrator" => MembershipStatus::Administrator,
        "member" => MembershipStatus::Member,
        "restricted" => MembershipStatus::Restricted,
        "left" => MembershipStatus::Left,
        "kicked" => MembershipStatus::Banned,
        other => MembershipStatus::Unrecognized(other.to_string()),
    }
}

/// Splits API failures into "user absent" answers and real oracle errors.
fn classify_failure(error: BotApiError) -> Result<MembershipStatus, OracleError> {
    match error {
        BotApiError::Api { code, description } => {
            if USER_ABSENT_MARKERS.iter().any(|m| description.contains(m)) {
                Ok(MembershipStatus::Absent)
            } else {
                Err(OracleError::Rejected { code, description })
            }
        }
        BotApiError::Network(message) => Err(OracleError::Transport(message)),
        BotApiError::Timeout { timeout_secs } => Err(OracleError::Timeout { timeout_secs }),
        BotApiError::Parse(message) => Err(OracleError::Malformed(message)),
    }
}
