//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the gate to external systems:
//! - `gate` - In-memory oracle and messenger for tests and local runs
//! - `telegram` - Bot API client, update routing and long polling
//! - `http` - Webhook endpoint

pub mod gate;
pub mod http;
pub mod telegram;

pub use gate::{RecordingMessenger, StubMembershipOracle};
pub use telegram::{TelegramBotApi, TelegramConfig, UpdatePoller, UpdateRouter};
