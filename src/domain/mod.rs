//! Domain layer - Core types shared by plugins and adapters
//!
//! This layer contains:
//! - Entities: Message and its outbound Reply envelope
//! - Traits: Abstractions for delivery adapters (Bot)

pub mod entities;
pub mod traits;
