//! Application handlers.
//!
//! Handlers that orchestrate domain decisions across ports.

pub mod gate;

pub use gate::{CheckMembershipHandler, DispatchOutcome, InteractionDispatcher};
