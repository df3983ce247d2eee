//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Trello: REST client for the Trello API
//! - Adapters: Reply delivery (console, incoming webhook)

pub mod config;
pub mod trello;
pub mod adapters;
