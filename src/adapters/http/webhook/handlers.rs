//! HTTP handlers for webhook delivery.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::telegram::{Update, UpdateRouter};

use super::dto::{ErrorResponse, HealthResponse};

/// Header the platform echoes the configured secret in.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook endpoints.
#[derive(Clone)]
pub struct WebhookAppState {
    pub router: Arc<UpdateRouter>,
    /// When set, deliveries must carry it in `SECRET_TOKEN_HEADER`.
    pub secret_token: Option<SecretString>,
}

impl WebhookAppState {
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.secret_token else {
            return true;
        };
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();

        expected.expose_secret().as_bytes().ct_eq(presented).into()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /telegram/webhook - Accept one update.
///
/// The update is queued behind earlier updates of its conversation; the
/// platform gets its 200 as soon as the body is parsed, so a slow lookup never
/// triggers a redelivery.
pub async fn receive_update(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    if !state.is_authorized(&headers) {
        tracing::warn!("webhook delivery with invalid secret token rejected");
        return Err(WebhookApiError::Unauthorized);
    }

    let update: Update = serde_json::from_slice(&body)
        .map_err(|e| WebhookApiError::MalformedUpdate(e.to_string()))?;

    tracing::debug!(update_id = update.update_id, "webhook update received");
    state.router.spawn(update);

    Ok(StatusCode::OK)
}

/// GET /health - Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Webhook request failures.
#[derive(Debug)]
pub enum WebhookApiError {
    Unauthorized,
    MalformedUpdate(String),
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            WebhookApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHORIZED", "invalid secret token"),
            ),
            WebhookApiError::MalformedUpdate(reason) => {
                tracing::warn!(reason = %reason, "malformed webhook update");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("MALFORMED_UPDATE", reason),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
