//! Domain entities - Core business objects with no external dependencies

pub mod message;
pub mod reply;

pub use message::{Message, ReplyReceiver};
pub use reply::{Payload, Reply, ReplyFields};
