//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::infrastructure::trello::API_BASE;

/// Bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub trello: TrelloConfig,
    pub adapters: AdaptersConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    /// Sender name put on every reply
    pub name: String,
    /// Channel used for messages typed on the console
    pub channel: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "trellobot".to_string(),
            channel: "#general".to_string(),
        }
    }
}

/// Trello credentials and the board/lists the plugin works on.
///
/// `key`, `token`, `board` and `list` are required; `create-in` falls back
/// to `list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TrelloConfig {
    pub key: String,
    pub token: String,
    pub board: String,
    pub list: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_in: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl TrelloConfig {
    pub fn new(
        key: impl Into<String>,
        token: impl Into<String>,
        board: impl Into<String>,
        list: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            token: token.into(),
            board: board.into(),
            list: list.into(),
            create_in: None,
            api_base: None,
        }
    }

    pub fn with_create_in(mut self, list: impl Into<String>) -> Self {
        self.create_in = Some(list.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Refuse a config the plugin cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("key", &self.key),
            ("token", &self.token),
            ("board", &self.board),
            ("list", &self.list),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(format!("trello.{}", field)));
            }
        }
        if matches!(&self.create_in, Some(list) if list.trim().is_empty()) {
            return Err(ConfigError::InvalidValue("trello.create-in is empty".to_string()));
        }
        Ok(())
    }

    /// List new cards are created in
    pub fn create_in_list(&self) -> &str {
        self.create_in.as_deref().unwrap_or(&self.list)
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(API_BASE)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AdaptersConfig {
    pub console: Option<ConsoleConfig>,
    pub webhook: Option<WebhookConfig>,
}

impl Default for AdaptersConfig {
    fn default() -> Self {
        Self {
            console: Some(ConsoleConfig { enabled: true }),
            webhook: Some(WebhookConfig {
                enabled: false,
                url: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

/// Slack-style incoming webhook
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: Option<String>,
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override file values with environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("TRELLO_KEY") {
            self.trello.key = key;
        }
        if let Some(token) = lookup("TRELLO_TOKEN") {
            self.trello.token = token;
        }
        if let Some(board) = lookup("TRELLO_BOARD") {
            self.trello.board = board;
        }
        if let Some(list) = lookup("TRELLO_LIST") {
            self.trello.list = list;
        }
        if let Some(list) = lookup("TRELLO_CREATE_IN") {
            self.trello.create_in = Some(list);
        }
        if let Some(name) = lookup("BOT_NAME") {
            self.bot.name = name;
        }
        if let Some(channel) = lookup("BOT_CHANNEL") {
            self.bot.channel = channel;
        }
        if let Some(url) = lookup("WEBHOOK_URL") {
            self.adapters.webhook = Some(WebhookConfig {
                enabled: true,
                url: Some(url),
            });
        }
    }

    /// Webhook URL, if the webhook adapter is switched on
    pub fn webhook_url(&self) -> Option<&str> {
        self.adapters
            .webhook
            .as_ref()
            .filter(|w| w.enabled)
            .and_then(|w| w.url.as_deref())
    }
}
