//! InteractionDispatcher - routes every inbound event through the gate.

use std::sync::Arc;

use crate::domain::foundation::StateMachine;
use crate::domain::gate::{
    GateVerdict, InboundEvent, OutboundReply, PromptRenderer, VerificationState,
};
use crate::ports::Messenger;

use super::CheckMembershipHandler;

/// What happened to one dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub verdict: GateVerdict,
    /// Reply composed for the event, whether or not it was delivered.
    pub reply: OutboundReply,
    /// True if the reply reached the messenger without error.
    pub delivered: bool,
    pub state: VerificationState,
}

/// Gates inbound events and replies with either the event's success text
/// or the denial prompt.
///
/// Holds no per-user state; every event is checked independently.
pub struct InteractionDispatcher {
    gate: CheckMembershipHandler,
    renderer: PromptRenderer,
    messenger: Arc<dyn Messenger>,
}

impl InteractionDispatcher {
    pub fn new(
        gate: CheckMembershipHandler,
        renderer: PromptRenderer,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            gate,
            renderer,
            messenger,
        }
    }

    /// Dispatches one event to completion.
    ///
    /// Recheck presses are acknowledged before anything else so the client
    /// does not hang on a spinner while the lookup runs. Delivery problems are
    /// logged and reported in the outcome, never returned as errors.
    pub async fn dispatch(&self, event: InboundEvent) -> DispatchOutcome {
        let kind = event.kind();
        let mut state = VerificationState::default();

        if let Some(callback) = event.callback_id() {
            if let Err(e) = self.messenger.acknowledge(callback).await {
                tracing::warn!(callback_id = %callback, error = %e, "failed to acknowledge callback");
            }
        }

        let verdict = self.gate.handle(event.identity()).await;

        let reply = match verdict {
            GateVerdict::Allowed => {
                state = advance(state, VerificationState::Verified);
                self.renderer.render_success(kind)
            }
            GateVerdict::Denied(reason) => self.renderer.render(&reason),
        };

        tracing::info!(
            kind = %kind,
            user_id = event.identity().map(|i| i.id().as_i64()).unwrap_or_default(),
            verdict = %verdict,
            "gate check completed"
        );

        let delivered = match event.reply_to() {
            Some(chat) => match self.messenger.send_reply(chat, &reply).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(chat_id = %chat, error = %e, "failed to deliver reply");
                    false
                }
            },
            None => {
                tracing::debug!(kind = %kind, "event has no reply target, reply dropped");
                false
            }
        };

        state = advance(state, VerificationState::Replied);

        DispatchOutcome {
            verdict,
            reply,
            delivered,
            state,
        }
    }
}

/// Moves the per-event state forward. The dispatcher only requests legal
/// transitions; an illegal one is logged and the current state kept.
fn advance(current: VerificationState, target: VerificationState) -> VerificationState {
    current.transition_to(target).unwrap_or_else(|e| {
        tracing::error!(error = %e, "invalid verification state transition");
        current
    })
}
