//! HTTP adapter for webhook delivery.
//!
//! - `POST /telegram/webhook` - Receive one update pushed by the platform
//! - `GET /health` - Liveness check

pub mod dto;
mod handlers;
mod routes;

pub use handlers::{health, receive_update, WebhookAppState, SECRET_TOKEN_HEADER};
pub use routes::{webhook_router, WEBHOOK_PATH};
