//! Membership oracle port.
//!
//! The gate asks this port one question per check: "what is this user's
//! relationship to group G?". Implementations talk to the messaging
//! platform; the gate only consumes the outcome.
//!
//! # Design
//!
//! Failures are returned, never thrown. The gate turns any `Err` into an
//! `OracleError` verdict, so implementations must not fold failures into a
//! status. The one exception is a well-formed "this user is not in the
//! group" answer, which is a status (`MembershipStatus::Absent`), not an
//! error.
//!
//! # Example
//!
//! ```ignore
//! use gatekeeper_bot::ports::MembershipOracle;
//!
//! async fn is_member(oracle: &dyn MembershipOracle, group: &GroupReference, user: UserId) -> bool {
//!     matches!(oracle.lookup(group, user).await, Ok(status) if status.is_in_good_standing())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::gate::{GroupReference, MembershipStatus};

/// Port answering membership questions about the required group.
#[async_trait]
pub trait MembershipOracle: Send + Sync {
    /// Looks up the user's status in the group. Exactly one remote call.
    async fn lookup(
        &self,
        group: &GroupReference,
        user_id: UserId,
    ) -> Result<MembershipStatus, OracleError>;
}

/// Membership lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The request never got a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// No answer within the configured bound.
    #[error("lookup timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The platform refused the lookup (unknown group, bot not in group, bad token).
    #[error("lookup rejected ({code}): {description}")]
    Rejected {
        /// Platform error code.
        code: i64,
        /// Platform error description.
        description: String,
    },

    /// The response could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}
