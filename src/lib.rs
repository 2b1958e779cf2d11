//! Gatekeeper Bot - admits chat users only while they belong to a required group.
//!
//! Every inbound interaction is checked against the platform's membership
//! record for the configured group. Members get the bot's normal replies;
//! everyone else gets a prompt with a join link and a recheck button.
//!
//! Layout follows ports and adapters:
//! - `domain` - group references, membership statuses, verdicts, prompts
//! - `ports` - `MembershipOracle` and `Messenger`
//! - `application` - the gate check and the interaction dispatcher
//! - `adapters` - Telegram Bot API, webhook endpoint, in-memory doubles
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
