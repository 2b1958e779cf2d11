//! HTTP adapters - inbound endpoints served with axum.

pub mod webhook;

pub use webhook::{webhook_router, WebhookAppState};
