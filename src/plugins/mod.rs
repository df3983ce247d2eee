//! Plugin system for trello-bot
//!
//! Plugins claim messages by pattern and answer through the message's reply channel

pub mod manager;
pub mod trait_def;
pub mod trello;

pub use manager::{PluginInfo, PluginManager};
pub use trait_def::Plugin;
pub use trello::TrelloPlugin;
