//! Application layer - Handlers.
//!
//! This layer wires the pure gate domain to the oracle and messenger ports.

pub mod handlers;

pub use handlers::{CheckMembershipHandler, DispatchOutcome, InteractionDispatcher};
