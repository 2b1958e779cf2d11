//! Axum router configuration for webhook delivery.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, receive_update, WebhookAppState};

/// Path the platform is told to deliver updates to.
pub const WEBHOOK_PATH: &str = "/telegram/webhook";

/// Create the webhook router.
///
/// # Routes
/// - `POST /telegram/webhook` - Receive an update
/// - `GET /health` - Liveness check
pub fn webhook_router() -> Router<WebhookAppState> {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .route("/health", get(health))
}
