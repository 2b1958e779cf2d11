//! Gate module - membership verification vocabulary.
//!
//! Everything here is pure: the oracle call and reply delivery live behind
//! ports, and the application layer wires them together.
//!
//! - `MembershipStatus` - relationship kinds a lookup resolves to
//! - `GroupReference` - the required group, with join-link derivation
//! - `GateVerdict` / `DenialReason` - outcome of one check
//! - `decide` - the only derivation of a verdict from a lookup
//! - `InboundEvent` - tagged union of routed event kinds
//! - `PromptRenderer` - denial and success replies

mod decision;
mod event;
mod group_reference;
mod identity;
mod membership_status;
mod prompt;
mod reply;
mod verdict;
mod verification_state;

pub use decision::decide;
pub use event::{EventKind, InboundEvent, ENTRY_COMMAND, RECHECK_ACTION_ID};
pub use group_reference::GroupReference;
pub use identity::UserIdentity;
pub use membership_status::MembershipStatus;
pub use prompt::PromptRenderer;
pub use reply::{ActionTarget, InlineAction, OutboundReply};
pub use verdict::{DenialReason, GateVerdict};
pub use verification_state::VerificationState;
