//! Gate configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::gate::GroupReference;

use super::error::ValidationError;

/// Gate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Group users must belong to: `@handle` or a direct invite link
    #[serde(default = "default_required_chat")]
    pub required_chat: String,

    /// Bound on one membership lookup in seconds; 0 disables the bound
    #[serde(default = "default_oracle_timeout")]
    pub oracle_timeout_secs: u64,
}

impl GateConfig {
    /// Parse the configured group.
    pub fn group_reference(&self) -> Result<GroupReference, ValidationError> {
        GroupReference::parse(&self.required_chat)
            .map_err(|_| ValidationError::MissingRequired("REQUIRED_CHAT"))
    }

    pub fn oracle_timeout(&self) -> Option<Duration> {
        (self.oracle_timeout_secs > 0).then(|| Duration::from_secs(self.oracle_timeout_secs))
    }

    /// Validate gate configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.group_reference()?;
        if self.oracle_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            required_chat: default_required_chat(),
            oracle_timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_required_chat() -> String {
    "@HoneyBdisigne".to_string()
}

fn default_oracle_timeout() -> u64 {
    10
}
