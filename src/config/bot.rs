//! Bot API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Bot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Bot token issued by BotFather
    #[serde(default = "empty_token")]
    pub token: SecretString,

    /// Bot API endpoint (override for a local Bot API server)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for ordinary API calls in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Server-side wait of one `getUpdates` long poll in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,

    /// How updates reach the bot
    #[serde(default)]
    pub mode: TransportMode,
}

/// Update delivery mode
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Polling,
    Webhook,
}

impl BotConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }

    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_token() {
            return Err(ValidationError::MissingRequired("BOT_TOKEN"));
        }
        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ValidationError::InvalidApiBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.poll_timeout_secs > 50 {
            return Err(ValidationError::InvalidPollTimeout);
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: empty_token(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            poll_timeout_secs: default_poll_timeout(),
            mode: TransportMode::default(),
        }
    }
}

fn empty_token() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_poll_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token(token: &str) -> BotConfig {
        BotConfig {
            token: SecretString::new(token.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.api_base_url, "https://api.telegram.org");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.poll_timeout(), Duration::from_secs(30));
        assert_eq!(config.mode, TransportMode::Polling);
    }

    #[test]
    fn test_missing_token_fails_validation() {
        assert_eq!(
            BotConfig::default().validate(),
            Err(ValidationError::MissingRequired("BOT_TOKEN"))
        );
        assert_eq!(
            with_token("   ").validate(),
            Err(ValidationError::MissingRequired("BOT_TOKEN"))
        );
    }

    #[test]
    fn test_valid_token_passes() {
        assert!(with_token("123:ABC").validate().is_ok());
    }

    #[test]
    fn test_invalid_timeouts() {
        let config = BotConfig {
            request_timeout_secs: 0,
            ..with_token("123:ABC")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));

        let config = BotConfig {
            poll_timeout_secs: 90,
            ..with_token("123:ABC")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPollTimeout));
    }

    #[test]
    fn test_invalid_api_base_url() {
        let config = BotConfig {
            api_base_url: "api.telegram.org".to_string(),
            ..with_token("123:ABC")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidApiBaseUrl));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = with_token("123:TOPSECRET");
        assert!(!format!("{:?}", config).contains("TOPSECRET"));
    }
}
