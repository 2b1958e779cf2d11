//! Messenger port - delivering replies back to the platform.

use async_trait::async_trait;

use crate::domain::foundation::{CallbackId, ChatId};
use crate::domain::gate::OutboundReply;

/// Port for sending replies and acknowledging button presses.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a reply to a conversation.
    async fn send_reply(&self, chat: ChatId, reply: &OutboundReply) -> Result<(), MessengerError>;

    /// Tells the platform a button press was received, so the pressing
    /// client stops showing a loading state.
    async fn acknowledge(&self, callback: &CallbackId) -> Result<(), MessengerError>;
}

/// Reply delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery rejected ({code}): {description}")]
    Rejected { code: i64, description: String },
}
