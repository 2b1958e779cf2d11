//! Gate handlers.
//!
//! - `CheckMembershipHandler` - decides a verdict for one user (one oracle call)
//! - `InteractionDispatcher` - gates an inbound event and sends the reply

mod check_membership;
mod dispatch_interaction;

pub use check_membership::CheckMembershipHandler;
pub use dispatch_interaction::{DispatchOutcome, InteractionDispatcher};
