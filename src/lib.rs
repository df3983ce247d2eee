//! # trello-bot
//!
//! A chat bot plugin for managing Trello cards with text commands:
//! `trello card`, `trello show`, `trello join` and `trello leave`.
//!
//! Inbound text is wrapped in a [`Message`](domain::entities::Message), routed
//! by the [`PluginManager`](plugins::PluginManager) to the
//! [`TrelloPlugin`](plugins::TrelloPlugin), and the single formatted answer
//! comes back through the message's one-shot reply channel.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;

pub use application::errors::{BotError, ConfigError};
pub use application::messaging::{Dispatch, MessageDispatcher};
pub use domain::entities::{Message, Payload, Reply, ReplyFields};
pub use plugins::{Plugin, PluginManager, TrelloPlugin};
