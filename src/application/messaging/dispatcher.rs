//! Message dispatcher - Routes messages to plugins and replies to the bot

use std::sync::Arc;
use crate::domain::entities::Message;
use crate::domain::traits::Bot;
use crate::plugins::PluginManager;

/// What happened to one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    /// A plugin claimed the message
    pub handled: bool,
    /// Replies the bot accepted
    pub delivered: usize,
}

/// Plays the chat framework: wraps text in a `Message`, hands it to the
/// plugins and delivers whatever comes back on the reply channel.
pub struct MessageDispatcher {
    plugins: Arc<PluginManager>,
    bot: Arc<dyn Bot>,
    botname: String,
}

impl MessageDispatcher {
    pub fn new(plugins: Arc<PluginManager>, bot: Arc<dyn Bot>, botname: impl Into<String>) -> Self {
        Self {
            plugins,
            bot,
            botname: botname.into(),
        }
    }

    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    /// Process a raw text message
    pub async fn process(&self, channel: impl Into<String>, text: impl Into<String>) -> Dispatch {
        let message = Message::new(channel, self.botname.as_str(), text);
        self.process_message(message).await
    }

    /// Process a message through the plugins
    pub async fn process_message(&self, message: Message) -> Dispatch {
        let channel = message.channel.clone();
        let preview: String = message.text.chars().take(50).collect();
        tracing::debug!("[{}] {}", channel, preview);

        let mut replies = message.subscribe();
        let handled = self.plugins.dispatch(message).await;

        let mut delivered = 0;
        while let Some(reply) = replies.recv().await {
            match self.bot.deliver(&reply).await {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("[{}] Error: {}", channel, e),
            }
        }

        tracing::debug!("[{}] Processed OK ({} replies)", channel, delivered);
        Dispatch { handled, delivered }
    }
}
