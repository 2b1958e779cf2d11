//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gate and the messaging platform. Adapters implement these ports.
//!
//! - `MembershipOracle` - membership lookups against the required group
//! - `Messenger` - reply delivery and button acknowledgement

mod membership_oracle;
mod messenger;

pub use membership_oracle::{MembershipOracle, OracleError};
pub use messenger::{Messenger, MessengerError};
