//! Stub implementation of MembershipOracle for development and testing.
//!
//! Answers every lookup with one configured outcome and counts invocations,
//! so tests can assert when the oracle was (or was not) consulted.
//!
//! # Usage
//!
//! ```ignore
//! use gatekeeper_bot::adapters::gate::StubMembershipOracle;
//!
//! let oracle = StubMembershipOracle::with_status(MembershipStatus::Member);
//! // Or simulate an outage:
//! let oracle = StubMembershipOracle::failing(OracleError::Transport("reset".into()));
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::UserId;
use crate::domain::gate::{GroupReference, MembershipStatus};
use crate::ports::{MembershipOracle, OracleError};

/// Stub MembershipOracle with a fixed, swappable outcome.
#[derive(Debug)]
pub struct StubMembershipOracle {
    outcome: Mutex<Result<MembershipStatus, OracleError>>,
    delay: Duration,
    calls: AtomicUsize,
    last_lookup: Mutex<Option<(String, UserId)>>,
}

impl Default for StubMembershipOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl StubMembershipOracle {
    /// Create a stub that reports every user as a regular member.
    pub fn new() -> Self {
        Self::with_status(MembershipStatus::Member)
    }

    /// Create a stub that resolves every lookup to `status`.
    pub fn with_status(status: MembershipStatus) -> Self {
        Self::with_outcome(Ok(status))
    }

    /// Create a stub that fails every lookup with `error`.
    pub fn failing(error: OracleError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<MembershipStatus, OracleError>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_lookup: Mutex::new(None),
        }
    }

    /// Simulate lookup latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Change the status returned by subsequent lookups.
    pub fn set_status(&self, status: MembershipStatus) {
        *self.outcome.lock().unwrap_or_else(|e| e.into_inner()) = Ok(status);
    }

    /// Number of lookups performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Group key and user of the most recent lookup.
    pub fn last_lookup(&self) -> Option<(String, UserId)> {
        self.last_lookup
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl MembershipOracle for StubMembershipOracle {
    async fn lookup(
        &self,
        group: &GroupReference,
        user_id: UserId,
    ) -> Result<MembershipStatus, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_lookup.lock().unwrap_or_else(|e| e.into_inner()) =
            Some((group.lookup_key(), user_id));

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.outcome
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> GroupReference {
        GroupReference::parse("@group").unwrap()
    }

    fn user() -> UserId {
        UserId::new(42).unwrap()
    }

    #[tokio::test]
    async fn default_reports_member() {
        let oracle = StubMembershipOracle::new();
        let status = oracle.lookup(&group(), user()).await.unwrap();
        assert_eq!(status, MembershipStatus::Member);
    }

    #[tokio::test]
    async fn failing_returns_configured_error() {
        let oracle = StubMembershipOracle::failing(OracleError::Malformed("eof".to_string()));
        let err = oracle.lookup(&group(), user()).await.unwrap_err();
        assert_eq!(err, OracleError::Malformed("eof".to_string()));
    }

    #[tokio::test]
    async fn counts_calls_and_records_last_lookup() {
        let oracle = StubMembershipOracle::with_status(MembershipStatus::Left);
        assert_eq!(oracle.call_count(), 0);

        oracle.lookup(&group(), user()).await.unwrap();
        oracle.lookup(&group(), user()).await.unwrap();

        assert_eq!(oracle.call_count(), 2);
        assert_eq!(oracle.last_lookup(), Some(("@group".to_string(), user())));
    }

    #[tokio::test]
    async fn set_status_changes_later_lookups() {
        let oracle = StubMembershipOracle::with_status(MembershipStatus::Left);
        oracle.set_status(MembershipStatus::Administrator);
        let status = oracle.lookup(&group(), user()).await.unwrap();
        assert_eq!(status, MembershipStatus::Administrator);
    }
}
