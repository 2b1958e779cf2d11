//! In-memory Messenger that records what would have been sent.
//!
//! Used by tests and by local runs without a platform connection.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{CallbackId, ChatId};
use crate::domain::gate::OutboundReply;
use crate::ports::{Messenger, MessengerError};

/// Messenger that keeps every reply and acknowledgement in memory.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    replies: Mutex<Vec<(ChatId, OutboundReply)>>,
    acknowledgements: Mutex<Vec<CallbackId>>,
    fail_sends: bool,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a messenger whose sends always fail (acknowledgements still succeed).
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Replies sent so far, oldest first.
    pub fn replies(&self) -> Vec<(ChatId, OutboundReply)> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Callbacks acknowledged so far, oldest first.
    pub fn acknowledgements(&self) -> Vec<CallbackId> {
        self.acknowledgements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_reply(&self, chat: ChatId, reply: &OutboundReply) -> Result<(), MessengerError> {
        if self.fail_sends {
            return Err(MessengerError::Transport("simulated send failure".to_string()));
        }
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((chat, reply.clone()));
        Ok(())
    }

    async fn acknowledge(&self, callback: &CallbackId) -> Result<(), MessengerError> {
        self.acknowledgements
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(callback.clone());
        Ok(())
    }
}
