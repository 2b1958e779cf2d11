//! Telegram Bot API client.
//!
//! Thin JSON-over-HTTPS client for the handful of methods the gate needs.
//! Implements the `MembershipOracle` and `Messenger` ports (see `oracle.rs`
//! and `messenger.rs`) and feeds the update poller.
//!
//! # Security
//!
//! - The bot token is held as `secrecy::SecretString` and only exposed while
//!   building a request URL
//! - Transport errors are stripped of their URL before logging, because the
//!   URL embeds the token
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(token).with_request_timeout(Duration::from_secs(10));
//! let api = TelegramBotApi::new(config)?;
//! ```

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::BotConfig;

use super::wire_types::{
    AnswerCallbackQueryRequest, ApiResponse, ChatMember, DeleteWebhookRequest,
    GetChatMemberRequest, GetUpdatesRequest, SendMessageRequest, SetWebhookRequest, Update, User,
};

/// Default Bot API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Update kinds the bot subscribes to.
pub const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Extra time granted to a long poll on top of its server-side timeout.
const LONG_POLL_GRACE: Duration = Duration::from_secs(10);

/// Bot API client configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    token: SecretString,
    api_base_url: String,
    request_timeout: Duration,
}

impl TelegramConfig {
    /// Create a configuration for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into().trim().to_string()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    /// Create configuration from the loaded bot settings.
    pub fn from_bot_config(bot: &BotConfig) -> Self {
        Self::new(bot.token.expose_secret().as_str())
            .with_base_url(bot.api_base_url.clone())
            .with_request_timeout(bot.request_timeout())
    }

    /// Set a custom API base URL (local Bot API server, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout for ordinary (non long-poll) requests.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Bot API call failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BotApiError {
    /// The request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the request timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The API answered `ok: false`.
    #[error("api error ({code}): {description}")]
    Api { code: i64, description: String },

    /// The response body was not a valid API envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Telegram Bot API client.
pub struct TelegramBotApi {
    config: TelegramConfig,
    http_client: Client,
}

impl TelegramBotApi {
    /// Create a new client with the given configuration.
    pub fn new(config: TelegramConfig) -> Result<Self, BotApiError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| BotApiError::Network(e.without_url().to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Builds the endpoint URL for a method. Contains the token; never log it.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url,
            self.config.token.expose_secret(),
            method
        )
    }

    /// Calls a Bot API method and unwraps the response envelope.
    async fn call<P, R>(
        &self,
        method: &str,
        payload: &P,
        timeout: Option<Duration>,
    ) -> Result<R, BotApiError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let effective_timeout = timeout.unwrap_or(self.config.request_timeout);
        let mut request = self.http_client.post(self.method_url(method)).json(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, effective_timeout))?;

        // Error responses carry the same JSON envelope as successes, so the
        // body is parsed regardless of the HTTP status.
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, effective_timeout))?;

        parse_envelope(&body).map_err(|e| {
            tracing::debug!(method, http_status = %status, error = %e, "bot api call failed");
            e
        })
    }

    /// `getMe`: the bot's own account.
    pub async fn get_me(&self) -> Result<User, BotApiError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// `getChatMember`: a user's membership record in a chat.
    pub async fn get_chat_member(
        &self,
        chat_id: &str,
        user_id: i64,
    ) -> Result<ChatMember, BotApiError> {
        let request = GetChatMemberRequest {
            chat_id: chat_id.to_string(),
            user_id,
        };
        self.call("getChatMember", &request, None).await
    }

    /// `sendMessage`.
    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<(), BotApiError> {
        let _: serde_json::Value = self.call("sendMessage", request, None).await?;
        Ok(())
    }

    /// `answerCallbackQuery` with no notification text.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), BotApiError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id: callback_query_id.to_string(),
        };
        let _: bool = self.call("answerCallbackQuery", &request, None).await?;
        Ok(())
    }

    /// `getUpdates` long poll. Blocks server-side for up to `poll_timeout`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, BotApiError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES.to_vec(),
        };
        self.call("getUpdates", &request, Some(poll_timeout + LONG_POLL_GRACE))
            .await
    }

    /// `setWebhook`: route updates to `url` instead of `getUpdates`.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), BotApiError> {
        let request = SetWebhookRequest {
            url: url.to_string(),
            secret_token: secret_token.map(str::to_string),
            allowed_updates: ALLOWED_UPDATES.to_vec(),
        };
        let _: bool = self.call("setWebhook", &request, None).await?;
        Ok(())
    }

    /// `deleteWebhook`, keeping pending updates for the poller.
    pub async fn delete_webhook(&self) -> Result<(), BotApiError> {
        let request = DeleteWebhookRequest {
            drop_pending_updates: false,
        };
        let _: bool = self.call("deleteWebhook", &request, None).await?;
        Ok(())
    }
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> BotApiError {
    if error.is_timeout() {
        BotApiError::Timeout {
            timeout_secs: timeout.as_secs(),
        }
    } else {
        BotApiError::Network(error.without_url().to_string())
    }
}

/// Unwraps a Bot API response envelope.
fn parse_envelope<R: DeserializeOwned>(body: &[u8]) -> Result<R, BotApiError> {
    let envelope: ApiResponse<R> =
        serde_json::from_slice(body).map_err(|e| BotApiError::Parse(e.to_string()))?;

    if !envelope.ok {
        return Err(BotApiError::Api {
            code: envelope.error_code.unwrap_or_default(),
            description: envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    envelope
        .result
        .ok_or_else(|| BotApiError::Parse("ok response without result".to_string()))
}
