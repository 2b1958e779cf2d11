//! CheckMembershipHandler - the gate decision engine.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::gate::{
    decide, DenialReason, GateVerdict, GroupReference, MembershipStatus, UserIdentity,
};
use crate::ports::{MembershipOracle, OracleError};

/// Decides whether a user may interact with the bot.
///
/// One oracle call per check, no retries: the denial prompt already offers
/// the user a recheck button. Oracle failures are logged here and folded into
/// `Denied(OracleError)`; nothing is raised to the caller.
pub struct CheckMembershipHandler {
    oracle: Arc<dyn MembershipOracle>,
    group: GroupReference,
    timeout: Option<Duration>,
}

impl CheckMembershipHandler {
    pub fn new(oracle: Arc<dyn MembershipOracle>, group: GroupReference) -> Self {
        Self {
            oracle,
            group,
            timeout: None,
        }
    }

    /// Bounds each oracle call. `None` leaves it to the transport's own timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn group(&self) -> &GroupReference {
        &self.group
    }

    /// Checks one user against the required group.
    ///
    /// An absent identity is denied without consulting the oracle.
    pub async fn handle(&self, identity: Option<&UserIdentity>) -> GateVerdict {
        let Some(identity) = identity else {
            tracing::debug!("event carries no user identity, skipping membership lookup");
            return GateVerdict::Denied(DenialReason::NoIdentity);
        };

        let user_id = identity.id();
        let outcome = self.lookup(identity).await;

        match &outcome {
            Ok(status) => {
                tracing::debug!(
                    user_id = %user_id,
                    group = %self.group,
                    status = %status,
                    "membership resolved"
                );
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    group = %self.group,
                    error = %e,
                    "membership lookup failed; check the bot is in the group and the group reference is correct"
                );
            }
        }

        decide(&outcome)
    }

    async fn lookup(&self, identity: &UserIdentity) -> Result<MembershipStatus, OracleError> {
        let call = self.oracle.lookup(&self.group, identity.id());
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(OracleError::Timeout {
                    timeout_secs: limit.as_secs(),
                })),
            None => call.await,
        }
    }
}
