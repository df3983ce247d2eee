//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Messaging: Routing inbound text to plugins and replies to adapters

pub mod errors;
pub mod messaging;
