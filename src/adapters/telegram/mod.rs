//! Telegram adapter - the Bot API behind the gate's ports.
//!
//! - `TelegramBotApi` - HTTPS client; implements `MembershipOracle` and `Messenger`
//! - `route_update` - classifies raw updates into gate events
//! - `UpdateRouter` - feeds classified updates to the dispatcher
//! - `UpdatePoller` - long-polling transport
//!
//! The webhook transport lives in `adapters::http::webhook` and shares the
//! same `UpdateRouter`.

mod bot_api;
mod event_mapper;
mod messenger;
mod oracle;
mod poller;
mod update_router;
pub mod wire_types;

pub use bot_api::{BotApiError, TelegramBotApi, TelegramConfig, ALLOWED_UPDATES, DEFAULT_API_BASE_URL};
pub use event_mapper::{route_update, RoutedUpdate};
pub use poller::UpdatePoller;
pub use update_router::UpdateRouter;
pub use wire_types::Update;
