//! Incoming-webhook adapter
//!
//! Posts the reply envelope as JSON, which is the shape Slack-compatible
//! incoming webhooks accept.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::errors::BotError;
use crate::domain::entities::Reply;
use crate::domain::traits::{Bot, BotInfo};

pub struct WebhookAdapter {
    client: Client,
    url: String,
    info: BotInfo,
}

impl WebhookAdapter {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            info: BotInfo {
                id: "webhook".to_string(),
                name: name.into(),
            },
        })
    }
}

#[async_trait]
impl Bot for WebhookAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Delivering replies to incoming webhook");
        Ok(())
    }

    async fn deliver(&self, reply: &Reply) -> Result<(), BotError> {
        let response = self
            .client
            .post(&self.url)
            .json(reply)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook rejected reply: {} {}", status, body);
            return Err(BotError::Network(format!("status: {}, body: {}", status, body)));
        }

        debug!("[{}] reply delivered", reply.channel);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
