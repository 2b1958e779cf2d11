//! Hands classified updates to the dispatcher.
//!
//! Shared by the long-polling and webhook transports. Updates from one
//! conversation are handled one at a time and in arrival order; different
//! conversations proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::application::handlers::{DispatchOutcome, InteractionDispatcher};
use crate::ports::Messenger;

use super::event_mapper::{route_update, RoutedUpdate};
use super::wire_types::Update;

/// Routes raw updates into the gate.
pub struct UpdateRouter {
    dispatcher: Arc<InteractionDispatcher>,
    messenger: Arc<dyn Messenger>,
    bot_username: Option<String>,
    /// Queue of every conversation with work in flight. A lane is removed by
    /// its worker once drained.
    lanes: Mutex<HashMap<i64, mpsc::UnboundedSender<Update>>>,
}

impl UpdateRouter {
    pub fn new(dispatcher: Arc<InteractionDispatcher>, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            dispatcher,
            messenger,
            bot_username: None,
            lanes: Mutex::new(HashMap::new()),
        }
    }

    /// Username used to recognize `/start@username`.
    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Processes one update to completion. Returns the dispatch outcome when
    /// the update reached the gate.
    pub async fn route(&self, update: Update) -> Option<DispatchOutcome> {
        let update_id = update.update_id;

        match route_update(update, self.bot_username.as_deref()) {
            RoutedUpdate::Dispatch(event) => Some(self.dispatcher.dispatch(event).await),
            RoutedUpdate::AcknowledgeOnly(callback) => {
                tracing::debug!(update_id, callback_id = %callback, "acknowledging foreign callback");
                if let Err(e) = self.messenger.acknowledge(&callback).await {
                    tracing::warn!(update_id, error = %e, "failed to acknowledge callback");
                }
                None
            }
            RoutedUpdate::Ignore => {
                tracing::trace!(update_id, "ignoring update");
                None
            }
        }
    }

    /// Queues an update behind earlier updates of the same conversation and
    /// returns immediately.
    pub fn spawn(self: &Arc<Self>, update: Update) {
        let Some(conversation) = conversation_of(&update) else {
            let router = Arc::clone(self);
            tokio::spawn(async move {
                router.route(update).await;
            });
            return;
        };

        let mut lanes = self.lock_lanes();
        let update = match lanes.get(&conversation) {
            Some(lane) => match lane.send(update) {
                Ok(()) => return,
                Err(mpsc::error::SendError(update)) => update,
            },
            None => update,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        // Receiver is held below, so this cannot fail.
        let _ = tx.send(update);
        lanes.insert(conversation, tx);
        drop(lanes);

        let router = Arc::clone(self);
        tokio::spawn(async move { router.drain_lane(conversation, rx).await });
    }

    /// Number of conversations with queued or running updates.
    pub fn active_conversations(&self) -> usize {
        self.lock_lanes().len()
    }

    async fn drain_lane(&self, conversation: i64, mut rx: mpsc::UnboundedReceiver<Update>) {
        loop {
            // Emptiness check and removal happen under the map lock, so a
            // concurrent `spawn` either lands in this lane or starts a new one.
            let next = {
                let mut lanes = self.lock_lanes();
                match rx.try_recv() {
                    Ok(update) => Some(update),
                    Err(_) => {
                        lanes.remove(&conversation);
                        None
                    }
                }
            };

            match next {
                Some(update) => {
                    self.route(update).await;
                }
                None => {
                    tracing::trace!(conversation, "conversation lane drained");
                    return;
                }
            }
        }
    }

    fn lock_lanes(&self) -> std::sync::MutexGuard<'_, HashMap<i64, mpsc::UnboundedSender<Update>>> {
        self.lanes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Conversation an update belongs to: its chat, or the pressing user for a
/// callback whose message is gone.
fn conversation_of(update: &Update) -> Option<i64> {
    if let Some(message) = &update.message {
        return Some(message.chat.id);
    }
    let query = update.callback_query.as_ref()?;
    query
        .message
        .as_ref()
        .map(|m| m.chat.id)
        .or_else(|| query.from.as_ref().map(|u| u.id))
}
