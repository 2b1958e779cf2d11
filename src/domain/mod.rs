//! Domain layer containing the gate's decision logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, errors, state machine)
//! - `gate` - Membership verification: statuses, verdicts, events, prompts

pub mod foundation;
pub mod gate;
