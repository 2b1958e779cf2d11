//! Gate adapters - in-memory implementations of the gate's ports.
//!
//! - `StubMembershipOracle` - Development/testing oracle with a fixed outcome
//! - `RecordingMessenger` - Messenger that records instead of sending

mod recording_messenger;
mod stub_membership_oracle;

pub use recording_messenger::RecordingMessenger;
pub use stub_membership_oracle::StubMembershipOracle;
