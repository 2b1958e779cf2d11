//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the state machine trait and validation errors
//! that the gate vocabulary is built from.

mod errors;
mod ids;
mod state_machine;

pub use errors::ValidationError;
pub use ids::{CallbackId, ChatId, UserId};
pub use state_machine::StateMachine;
