//! Plugin trait definitions

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::entities::Message;

/// Core plugin trait that all chat plugins implement
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique identifier for the plugin
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Whether this plugin wants to handle `text`
    fn matches(&self, text: &str) -> bool;

    /// Handle a message. Implementations finish by calling `message.done`
    /// exactly once, whatever happened.
    async fn respond(&self, message: Message);

    /// Usage text
    fn help(&self) -> String;

    /// Optional: Cleanup resources when plugin is unloaded
    fn cleanup(&self) {}

    /// Optional: Get plugin metadata
    fn metadata(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}
