//! Delivery adapters - where replies end up

pub mod console;
pub mod webhook;

pub use console::ConsoleAdapter;
pub use webhook::WebhookAdapter;
