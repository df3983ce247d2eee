//! Plugin manager - handles plugin registration and message routing

use crate::domain::entities::Message;
use crate::plugins::trait_def::Plugin;
use std::sync::Arc;
use tracing::{debug, info};

/// Manages all plugins for the bot, in registration order
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), String> {
        self.register_shared(Arc::new(plugin))
    }

    pub fn register_shared(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), String> {
        let name = plugin.name().to_string();

        if self.has_plugin(&name) {
            return Err(format!("Plugin '{}' already registered", name));
        }

        info!("Registering plugin: {}", name);
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregister a plugin
    pub fn unregister(&mut self, name: &str) -> Result<(), String> {
        match self.plugins.iter().position(|p| p.name() == name) {
            Some(index) => {
                let plugin = self.plugins.remove(index);
                plugin.cleanup();
                info!("Unregistered plugin: {}", name);
                Ok(())
            }
            None => Err(format!("Plugin '{}' not found", name)),
        }
    }

    /// First plugin whose pattern matches `text`
    pub fn find(&self, text: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.iter().find(|p| p.matches(text)).cloned()
    }

    /// Route a message to the first matching plugin and wait for it to
    /// finish. Returns false (and closes the message) when nothing matched.
    pub async fn dispatch(&self, message: Message) -> bool {
        match self.find(&message.text) {
            Some(plugin) => {
                debug!("[{}] {} handles message {}", message.channel, plugin.name(), message.id);
                plugin.respond(message).await;
                true
            }
            None => {
                debug!("[{}] no plugin for message {}", message.channel, message.id);
                message.close();
                false
            }
        }
    }

    /// List all registered plugins
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugins
            .iter()
            .map(|plugin| PluginInfo {
                name: plugin.name().to_string(),
                description: plugin.description().to_string(),
                metadata: plugin.metadata(),
            })
            .collect()
    }

    /// Check if a plugin exists
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// Combined usage text of every plugin
    pub fn help(&self) -> String {
        self.plugins
            .iter()
            .map(|p| p.help())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Plugin information for listing
#[derive(Debug, Clone, serde::Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub metadata: std::collections::HashMap<String, String>,
}
