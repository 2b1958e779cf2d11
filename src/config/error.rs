//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Long-poll timeout must be at most 50 seconds")]
    InvalidPollTimeout,

    #[error("Invalid listen address: {0}")]
    InvalidListenAddress(String),

    #[error("Bot API base URL must be an http(s) URL")]
    InvalidApiBaseUrl,

    #[error("Webhook public URL must use HTTPS")]
    PublicUrlMustBeHttps,

    #[error("Webhook secret token must be 1-256 characters of A-Z, a-z, 0-9, _ or -")]
    InvalidSecretToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failure_converts_into_config_error() {
        let err: ConfigError = config::ConfigError::Message("bad port".to_string()).into();
        assert!(matches!(err, ConfigError::LoadError(_)));
        assert!(err.to_string().contains("bad port"));
    }

    #[test]
    fn missing_required_names_the_variable() {
        let err = ValidationError::MissingRequired("BOT_TOKEN");
        assert_eq!(err.to_string(), "Required configuration missing: BOT_TOKEN");
    }
}
