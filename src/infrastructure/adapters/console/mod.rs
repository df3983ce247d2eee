//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::sync::mpsc;
use crate::domain::entities::Reply;
use crate::domain::traits::{Bot, BotInfo};
use crate::application::errors::BotError;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    sender: Option<mpsc::Sender<String>>,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
            },
            sender: None,
        }
    }

    /// Also forward every delivered text to `sender`
    pub fn with_sender(mut self, sender: mpsc::Sender<String>) -> Self {
        self.sender = Some(sender);
        self
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new("trellobot")
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn deliver(&self, reply: &Reply) -> Result<(), BotError> {
        let text = reply.text.as_deref().unwrap_or_default();
        println!("[BOT] {}", text);

        if let Some(sender) = &self.sender {
            sender
                .send(text.to_string())
                .await
                .map_err(|e| BotError::Network(e.to_string()))?;
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
