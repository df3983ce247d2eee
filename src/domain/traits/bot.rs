use async_trait::async_trait;
use crate::domain::entities::Reply;
use crate::application::errors::BotError;

/// Bot trait - abstraction for the chat side that delivers replies
#[async_trait]
pub trait Bot: Send + Sync {
    /// Prepare the adapter for delivery
    async fn start(&self) -> Result<(), BotError>;

    /// Deliver one merged reply to its channel
    async fn deliver(&self, reply: &Reply) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
