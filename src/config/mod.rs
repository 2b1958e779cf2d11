//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GATEKEEPER` prefix and nested values use double underscores as separators.
//! The bare `BOT_TOKEN` and `REQUIRED_CHAT` variables are honoured on top.
//!
//! # Example
//!
//! ```no_run
//! use gatekeeper_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gating on {}", config.gate.required_chat);
//! ```

mod bot;
mod error;
mod gate;
mod logging;
mod server;

pub use bot::{BotConfig, TransportMode};
pub use error::{ConfigError, ValidationError};
pub use gate::GateConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and handed to the adapters; never mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bot API configuration (token, endpoint, transport)
    #[serde(default)]
    pub bot: BotConfig,

    /// Gate configuration (required group, lookup bound)
    #[serde(default)]
    pub gate: GateConfig,

    /// Webhook listener configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GATEKEEPER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `BOT_TOKEN` and `REQUIRED_CHAT` when set
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GATEKEEPER__BOT__TOKEN=123:ABC` -> `bot.token = 123:ABC`
    /// - `GATEKEEPER__SERVER__PORT=8443` -> `server.port = 8443`
    /// - `BOT_TOKEN=123:ABC` -> `bot.token = 123:ABC`
    ///
    /// A missing token is not a load error; `validate` reports it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GATEKEEPER")
                    .separator("__"),
            )
            .set_override_option("bot.token", non_empty_env("BOT_TOKEN"))?
            .set_override_option("gate.required_chat", non_empty_env("REQUIRED_CHAT"))?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid. The
    /// webhook listener is only checked in webhook mode.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bot.validate()?;
        self.gate.validate()?;
        if self.is_webhook_mode() {
            self.server.validate_for_webhook()?;
        }
        Ok(())
    }

    pub fn is_webhook_mode(&self) -> bool {
        self.bot.mode == TransportMode::Webhook
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 8] = [
        "BOT_TOKEN",
        "REQUIRED_CHAT",
        "GATEKEEPER__BOT__TOKEN",
        "GATEKEEPER__BOT__MODE",
        "GATEKEEPER__GATE__REQUIRED_CHAT",
        "GATEKEEPER__GATE__ORACLE_TIMEOUT_SECS",
        "GATEKEEPER__SERVER__PORT",
        "GATEKEEPER__SERVER__PUBLIC_URL",
    ];

    /// Helper to clear environment variables before and after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_prefixed_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("GATEKEEPER__BOT__TOKEN", "123:ABC"),
            ("GATEKEEPER__GATE__REQUIRED_CHAT", "@mygroup"),
        ])
        .unwrap();

        assert_eq!(config.bot.token.expose_secret(), "123:ABC");
        assert_eq!(config.gate.required_chat, "@mygroup");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_plain_variables_override() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("GATEKEEPER__BOT__TOKEN", "prefixed"),
            ("BOT_TOKEN", "plain"),
            ("REQUIRED_CHAT", "https://t.me/+invite"),
        ])
        .unwrap();

        assert_eq!(config.bot.token.expose_secret(), "plain");
        assert_eq!(config.gate.required_chat, "https://t.me/+invite");
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.gate.required_chat, "@HoneyBdisigne");
        assert_eq!(config.bot.mode, TransportMode::Polling);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_token_is_validation_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("BOT_TOKEN"))
        );
    }

    #[test]
    fn test_numeric_and_enum_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("BOT_TOKEN", "123:ABC"),
            ("GATEKEEPER__BOT__MODE", "webhook"),
            ("GATEKEEPER__SERVER__PORT", "8443"),
            ("GATEKEEPER__GATE__ORACLE_TIMEOUT_SECS", "0"),
        ])
        .unwrap();

        assert!(config.is_webhook_mode());
        assert_eq!(config.server.port, 8443);
        assert_eq!(config.gate.oracle_timeout(), None);
    }

    #[test]
    fn test_webhook_mode_requires_public_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("BOT_TOKEN", "123:ABC"),
            ("GATEKEEPER__BOT__MODE", "webhook"),
        ])
        .unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("PUBLIC_URL"))
        );

        let config = load_with(&[
            ("BOT_TOKEN", "123:ABC"),
            ("GATEKEEPER__BOT__MODE", "webhook"),
            ("GATEKEEPER__SERVER__PUBLIC_URL", "https://bot.example.com"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
